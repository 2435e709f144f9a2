//! Refresh pipeline: source -> validation -> searcher reload

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::{error, info};

use crate::index::{build_addresses, build_alternate_names, build_entities, IndexStats, Searcher};
use crate::refresh::source::{RecordSource, SourceError};

/// Loads datasets from a source and installs them into a searcher
#[derive(Clone)]
pub struct RefreshPipeline {
    source: Arc<dyn RecordSource>,
}

impl RefreshPipeline {
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self { source }
    }

    /// Load, validate and install one dataset.
    ///
    /// On error the searcher keeps serving whatever it had before.
    pub async fn refresh(&self, searcher: &Searcher) -> Result<IndexStats, SourceError> {
        let start = Instant::now();

        let dataset = self.source.load().await?;
        dataset.validate()?;

        let sdns = build_entities(dataset.sdns);
        let addresses = build_addresses(dataset.addresses);
        let alts = build_alternate_names(dataset.alternate_identities);

        let stats = searcher.reload(sdns, addresses, alts);

        info!(
            version = stats.version,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Refresh complete"
        );

        Ok(stats)
    }
}

/// Refresh `searcher` every `interval_secs` seconds, forever.
///
/// The first refresh happens one full interval after the call; do the
/// initial load separately. Failures are logged and retried next tick.
pub async fn run_refresh_loop(pipeline: RefreshPipeline, searcher: Arc<Searcher>, interval_secs: u64) {
    let mut timer = interval(Duration::from_secs(interval_secs.max(1)));
    // Skip the first immediate tick
    timer.tick().await;

    info!(interval_secs, "Refresh loop started");

    loop {
        timer.tick().await;

        if let Err(e) = pipeline.refresh(&searcher).await {
            error!(error = %e, "Refresh failed, keeping previous dataset");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Address, Sdn};
    use crate::refresh::source::RawDataset;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves a fresh single-SDN dataset per load, numbered by call count
    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RecordSource for CountingSource {
        async fn load(&self) -> Result<RawDataset, SourceError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(RawDataset {
                sdns: vec![Sdn {
                    entity_id: format!("{}", n),
                    sdn_name: format!("Generation {}", n),
                    ..Default::default()
                }],
                ..Default::default()
            })
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl RecordSource for BrokenSource {
        async fn load(&self) -> Result<RawDataset, SourceError> {
            Ok(RawDataset {
                addresses: vec![Address::default()],
                ..Default::default()
            })
        }
    }

    fn counting() -> Arc<CountingSource> {
        Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn test_refresh_installs_dataset() {
        let searcher = Searcher::new();
        let pipeline = RefreshPipeline::new(counting());

        let stats = pipeline.refresh(&searcher).await.unwrap();

        assert_eq!(stats.version, 1);
        assert_eq!(stats.sdns, 1);
        assert!(searcher.is_ready());
        assert!(searcher.find_entity_by_id("0").is_some());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous() {
        let searcher = Searcher::new();
        RefreshPipeline::new(counting())
            .refresh(&searcher)
            .await
            .unwrap();

        let result = RefreshPipeline::new(Arc::new(BrokenSource))
            .refresh(&searcher)
            .await;

        assert!(matches!(result, Err(SourceError::Invalid(_))));
        assert_eq!(searcher.stats().version, 1);
        assert!(searcher.find_entity_by_id("0").is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_loop_ticks() {
        let searcher = Arc::new(Searcher::new());
        let pipeline = RefreshPipeline::new(counting());

        let handle = tokio::spawn(run_refresh_loop(pipeline, searcher.clone(), 60));
        tokio::time::sleep(Duration::from_secs(121)).await;
        handle.abort();

        assert_eq!(searcher.stats().version, 2);
        assert!(searcher.find_entity_by_id("1").is_some());
        assert!(searcher.find_entity_by_id("0").is_none());
    }
}
