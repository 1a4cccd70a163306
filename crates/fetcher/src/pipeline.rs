use cwa_weather_core::{
    DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_RETRIES, DEFAULT_STORE_PATH, DEFAULT_UPSTREAM_URL,
};
use serde_json::Value;
use slog::{debug, info, warn, Logger};
use std::{fmt, time::Duration};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::{
    walk_response, AliasTable, FetchError, JsonFetcher, NormalizedFragment, ResponseShape,
    StoreTotals, StoreWriter, WriteSummary, DEFAULT_ALIASES,
};

/// Everything a run needs, passed in explicitly.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub url: String,
    /// Sent as the `Authorization` query parameter when set
    pub authorization: Option<String>,
    pub store_path: String,
    pub timeout: Duration,
    pub max_retries: u32,
    pub user_agent: String,
    pub raw_dump: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_UPSTREAM_URL.to_string(),
            authorization: None,
            store_path: DEFAULT_STORE_PATH.to_string(),
            timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT),
            max_retries: DEFAULT_MAX_RETRIES,
            user_agent: format!("cwa-fetcher/{}", env!("CARGO_PKG_VERSION")),
            raw_dump: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub started_at: String,
    pub shape: ResponseShape,
    pub fragments_seen: usize,
    pub fragments_skipped: usize,
    pub written: WriteSummary,
    pub totals: StoreTotals,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run complete: shape {}, fragments seen {}, skipped {}, weather inserted {} failed {}, precipitation inserted {} failed {}",
            self.shape,
            self.fragments_seen,
            self.fragments_skipped,
            self.written.weather_inserted,
            self.written.weather_failed,
            self.written.precipitation_inserted,
            self.written.precipitation_failed,
        )
    }
}

pub struct FetchOrchestrator {
    config: PipelineConfig,
    aliases: AliasTable,
    logger: Logger,
}

impl FetchOrchestrator {
    pub fn new(config: PipelineConfig, logger: Logger) -> Self {
        Self {
            config,
            aliases: DEFAULT_ALIASES,
            logger,
        }
    }

    pub fn with_aliases(mut self, aliases: AliasTable) -> Self {
        self.aliases = aliases;
        self
    }

    /// One fetch, walk and store pass.
    ///
    /// Transport, status, JSON and shape failures abort before the store is
    /// touched. Once opened, the store is closed on every path.
    pub async fn run(&self) -> Result<RunSummary, FetchError> {
        let started_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default();

        let fetcher = JsonFetcher::new(
            self.logger.clone(),
            &self.config.user_agent,
            self.config.timeout,
            self.config.max_retries,
        )?;
        let query: Vec<(&str, &str)> = self
            .config
            .authorization
            .iter()
            .map(|key| ("Authorization", key.as_str()))
            .collect();

        info!(self.logger, "fetching observations from {}", self.config.url);
        let payload = fetcher.fetch_json(&self.config.url, &query).await?;

        if let Some(path) = &self.config.raw_dump {
            self.dump_raw(path, &payload).await;
        }

        let walk = walk_response(&payload, &self.aliases)?;
        info!(
            self.logger,
            "located {} fragments at {} (alias table v{})",
            walk.fragments_seen(),
            walk.shape,
            self.aliases.version
        );
        for group in &walk.ignored_groups {
            warn!(
                self.logger,
                "ignoring group #{} at {}: no location list", group, walk.shape
            );
        }
        for skipped in &walk.skipped {
            warn!(
                self.logger,
                "skipping fragment #{} (key: {:?}): {}", skipped.index, skipped.key, skipped.reason
            );
        }

        let mut store = StoreWriter::open(&self.config.store_path, self.logger.clone()).await?;
        let persisted = persist(&mut store, &walk.fragments).await;
        let closed = store.close().await;
        let (written, totals) = persisted?;
        closed?;

        let summary = RunSummary {
            started_at,
            shape: walk.shape,
            fragments_seen: walk.fragments_seen(),
            fragments_skipped: walk.skipped.len(),
            written,
            totals,
        };
        info!(self.logger, "{}", summary);
        debug!(
            self.logger,
            "store {} now holds {} weather and {} precipitation rows",
            self.config.store_path,
            totals.weather,
            totals.precipitation
        );
        Ok(summary)
    }

    async fn dump_raw(&self, path: &str, payload: &Value) {
        let written = match serde_json::to_vec_pretty(payload) {
            Ok(bytes) => tokio::fs::write(path, bytes).await.map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        match written {
            Ok(()) => info!(self.logger, "saved raw JSON to {}", path),
            Err(e) => warn!(self.logger, "failed to save raw JSON to {}: {}", path, e),
        }
    }
}

async fn persist(
    store: &mut StoreWriter,
    fragments: &[NormalizedFragment],
) -> Result<(WriteSummary, StoreTotals), sqlx::Error> {
    store.ensure_schema().await?;
    let written = store.write_all(fragments).await?;
    let totals = store.totals().await?;
    Ok((written, totals))
}
