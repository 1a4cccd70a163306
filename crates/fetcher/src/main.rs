use fetcher::{get_config_info, setup_logger, FetchOrchestrator};
use slog::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
    let cli = get_config_info();
    let logger = setup_logger(&cli);
    let config = cli.pipeline_config();

    info!(logger, "CWA fetcher starting...");
    info!(logger, "  Store: {}", config.store_path);
    info!(logger, "  Timeout: {} seconds", config.timeout.as_secs());

    let orchestrator = FetchOrchestrator::new(config, logger.clone());
    if let Err(err) = orchestrator.run().await {
        error!(logger, "run aborted: {}", err);
        return Err(err.into());
    }
    Ok(())
}
