use std::{sync::Arc, time::Instant};

use stress_model::{Catalog, StopCondition};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::{CoreError, Dispatcher, Invoker, RunStats, RunSummary, spawn_workers, work_queue};

/// Shape of a run: pool size and the global stop rule.
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    pub workers: usize,
    pub stop: StopCondition,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            stop: StopCondition::default(),
        }
    }
}

/// Wires queue, worker pool and dispatcher for one run.
pub struct Coordinator {
    cfg: RunConfig,
    invoker: Arc<dyn Invoker>,
    shutdown: CancellationToken,
}

impl Coordinator {
    pub fn new(cfg: RunConfig, invoker: Arc<dyn Invoker>) -> Self {
        Self {
            cfg,
            invoker,
            shutdown: CancellationToken::new(),
        }
    }

    /// Token that stops production early; in-flight and buffered items still complete.
    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Run until the stop condition holds and every worker has drained the queue.
    #[instrument(level = "debug", skip(self, catalog), fields(workers = self.cfg.workers, stop = %self.cfg.stop))]
    pub async fn run(&self, catalog: Catalog) -> Result<RunSummary, CoreError> {
        if self.cfg.workers == 0 {
            return Err(CoreError::NoWorkers);
        }

        info!(
            workers = self.cfg.workers,
            items = catalog.len(),
            invoker = self.invoker.name(),
            stop = %self.cfg.stop,
            "starting run"
        );

        let start = Instant::now();
        let stats = Arc::new(RunStats::new());
        let (tx, rx) = work_queue(self.cfg.workers);

        let pool = spawn_workers(
            self.cfg.workers,
            rx,
            Arc::clone(&self.invoker),
            Arc::clone(&stats),
        );

        let dispatcher =
            Dispatcher::new(catalog, self.cfg.stop).with_shutdown(self.shutdown.clone());
        let producer = tokio::spawn(dispatcher.run(tx));

        let joined = pool.join().await;
        let pushed = producer
            .await
            .map_err(|e| CoreError::Dispatcher(e.to_string()))?;
        joined?;

        let summary = stats.snapshot(start.elapsed());
        info!(
            pushed,
            attempted = summary.attempted,
            failed = summary.failed,
            elapsed_s = summary.elapsed.as_secs_f64(),
            "run finished"
        );
        Ok(summary)
    }
}

/// Convenience wrapper: run `catalog` with `workers` units until `stop`.
pub async fn run_load(
    catalog: Catalog,
    workers: usize,
    stop: StopCondition,
    invoker: Arc<dyn Invoker>,
) -> Result<RunSummary, CoreError> {
    Coordinator::new(RunConfig { workers, stop }, invoker)
        .run(catalog)
        .await
}
