use clap::Parser;
use cwa_weather_core::{
    find_config_file, load_config, ConfigSource, DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_RETRIES,
    DEFAULT_STORE_PATH, DEFAULT_UPSTREAM_URL,
};
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde_json::Value;
use slog::{debug, o, Drain, Level, Logger};
use std::{env, time::Duration};

use crate::{FetchError, PipelineConfig};

#[derive(Parser, Clone, Debug, serde::Deserialize, Default)]
#[command(
    author,
    version,
    about = "CWA fetcher - downloads weather observations and stores them in SQLite"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $CWA_FETCHER_CONFIG, ./fetcher.toml,
    /// $XDG_CONFIG_HOME/cwa-weather/fetcher.toml, /etc/cwa-weather/fetcher.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "CWA_FETCHER_LEVEL")]
    pub level: Option<String>,

    /// Upstream open-data URL returning JSON
    #[arg(short, long, env = "CWA_FETCHER_URL")]
    pub url: Option<String>,

    /// Value sent as the `Authorization` query parameter
    #[arg(short, long, env = "CWA_FETCHER_AUTHORIZATION")]
    pub authorization: Option<String>,

    /// SQLite store the rows are appended to
    #[arg(short, long, env = "CWA_FETCHER_STORE_PATH")]
    #[serde(alias = "db_path")]
    pub store_path: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long, env = "CWA_FETCHER_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Retries for transient transport failures
    #[arg(short, long, env = "CWA_FETCHER_MAX_RETRIES")]
    pub max_retries: Option<u32>,

    /// HTTP User-Agent header for upstream requests
    #[arg(long, env = "CWA_FETCHER_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Write the raw upstream payload to this file for inspection
    #[arg(short, long, env = "CWA_FETCHER_RAW_DUMP")]
    pub raw_dump: Option<String>,
}

impl Cli {
    /// Get the effective configuration value with defaults
    pub fn url(&self) -> String {
        self.url
            .clone()
            .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string())
    }

    pub fn store_path(&self) -> String {
        self.store_path
            .clone()
            .unwrap_or_else(|| DEFAULT_STORE_PATH.to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(DEFAULT_FETCH_TIMEOUT))
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES)
    }

    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("cwa-fetcher/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            url: self.url(),
            authorization: self.authorization.clone(),
            store_path: self.store_path(),
            timeout: self.timeout(),
            max_retries: self.max_retries(),
            user_agent: self.user_agent(),
            raw_dump: self.raw_dump.clone(),
        }
    }
}

/// Load configuration from CLI args, config file, and environment
pub fn get_config_info() -> Cli {
    let cli_args = Cli::parse();

    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file("CWA_FETCHER_CONFIG", "fetcher.toml")
    };

    let file_config: Cli = load_config(&source).unwrap_or_default();

    // CLI args override file config (env vars are handled by clap)
    Cli {
        config: cli_args.config,
        level: cli_args.level.or(file_config.level),
        url: cli_args.url.or(file_config.url),
        authorization: cli_args.authorization.or(file_config.authorization),
        store_path: cli_args.store_path.or(file_config.store_path),
        timeout: cli_args.timeout.or(file_config.timeout),
        max_retries: cli_args.max_retries.or(file_config.max_retries),
        user_agent: cli_args.user_agent.or(file_config.user_agent),
        raw_dump: cli_args.raw_dump.or(file_config.raw_dump),
    }
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::Trace,
        "debug" => Level::Debug,
        "warn" => Level::Warning,
        "error" => Level::Error,
        _ => Level::Info,
    }
}

pub fn setup_logger(cli: &Cli) -> Logger {
    let log_level = match cli.level.as_ref() {
        Some(level) => parse_level(level),
        None => parse_level(&env::var("RUST_LOG").unwrap_or_default()),
    };

    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::CompactFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain = drain.filter_level(log_level).fuse();
    slog::Logger::root(drain, o!("version" => env!("CARGO_PKG_VERSION")))
}

pub struct JsonFetcher {
    logger: Logger,
    client: ClientWithMiddleware,
    timeout: Duration,
}

impl JsonFetcher {
    pub fn new(
        logger: Logger,
        user_agent: &str,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<JsonFetcher, FetchError> {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(max_retries);
        let client = ClientBuilder::new(
            Client::builder()
                .user_agent(user_agent)
                .connect_timeout(timeout)
                .build()
                .map_err(FetchError::Client)?,
        )
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build();

        Ok(Self {
            logger,
            client,
            timeout,
        })
    }

    /// GET `url` and parse the body as JSON. Non-success statuses are errors.
    pub async fn fetch_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, FetchError> {
        debug!(self.logger, "requesting: {}", url);
        let response = self
            .client
            .get(url)
            .query(query)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(FetchError::Body)?;
        debug!(self.logger, "received {} bytes from {}", body.len(), url);
        Ok(serde_json::from_slice(&body)?)
    }
}
