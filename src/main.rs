//! Sanctions Search
//!
//! Loads the watchlist into memory and keeps it refreshed. Request layers
//! embed the library and share the `Searcher`; this binary owns startup,
//! logging and the refresh schedule.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sanctions_search::{
    run_refresh_loop, JsonFileSource, RefreshPipeline, SearchConfig, Searcher, StartupMode,
};

/// Default configuration path
const DEFAULT_CONFIG_PATH: &str = "config/sanctions_search.yaml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sanctions_search=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting sanctions search");

    let config_path = std::env::var("SANCTIONS_SEARCH_CONFIG")
        .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    tracing::info!(path = %config_path, "Loading configuration");

    let config = SearchConfig::from_file(&config_path)?;

    tracing::info!(
        source = %config.source.path.display(),
        refresh_interval = config.refresh.interval_secs,
        soft_limit = config.limits.soft,
        hard_limit = config.limits.hard,
        "Configuration loaded"
    );

    let searcher = Arc::new(Searcher::new());
    let pipeline = RefreshPipeline::new(Arc::new(JsonFileSource::new(&config.source.path)));

    match config.refresh.startup_mode {
        StartupMode::Sync => {
            tracing::info!("Performing synchronous initial load");
            pipeline.refresh(&searcher).await?;
            tracing::info!("Initial load complete, searcher ready");
        }
        StartupMode::Async => {
            tracing::info!("Starting asynchronous initial load");
            let pipe = pipeline.clone();
            let s = searcher.clone();
            tokio::spawn(async move {
                if let Err(e) = pipe.refresh(&s).await {
                    tracing::error!(error = %e, "Initial async load failed");
                } else {
                    tracing::info!("Initial async load complete");
                }
            });
        }
    }

    let refresh = tokio::spawn(run_refresh_loop(
        pipeline,
        searcher.clone(),
        config.refresh.interval_secs,
    ));

    tokio::signal::ctrl_c().await?;
    tracing::info!(stats = ?searcher.stats(), "Shutting down");
    refresh.abort();

    Ok(())
}
