use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, trace};

use crate::{CoreError, Invoker, QueueReceiver, RunStats};

/// Fixed set of running workers; [`WorkerPool::join`] is the pool-wide completion barrier.
pub struct WorkerPool {
    handles: Vec<(usize, JoinHandle<u64>)>,
}

/// Start `count` workers draining `queue` through `invoker`.
pub fn spawn_workers(
    count: usize,
    queue: QueueReceiver,
    invoker: Arc<dyn Invoker>,
    stats: Arc<RunStats>,
) -> WorkerPool {
    let handles = (0..count)
        .map(|id| {
            let queue = queue.clone();
            let invoker = Arc::clone(&invoker);
            let stats = Arc::clone(&stats);
            (id, tokio::spawn(drain(id, queue, invoker, stats)))
        })
        .collect();
    WorkerPool { handles }
}

/// Worker loop: one invocation at a time until the queue is closed and empty.
async fn drain(
    id: usize,
    queue: QueueReceiver,
    invoker: Arc<dyn Invoker>,
    stats: Arc<RunStats>,
) -> u64 {
    debug!(target: "stress.core.worker", worker_id = id, "worker started");
    let mut processed = 0u64;

    while let Some(item) = queue.recv().await {
        trace!(target: "stress.core.worker", worker_id = id, item = %item.name, "invoke");
        let outcome = invoker.invoke(&item).await;
        stats.record(outcome);
        processed += 1;
    }

    debug!(target: "stress.core.worker", worker_id = id, processed, "queue drained; worker finished");
    processed
}

impl WorkerPool {
    /// Wait for every worker to exit and return the number of items processed in total.
    ///
    /// All workers are joined even if one of them panicked; the first panic is reported afterwards.
    pub async fn join(self) -> Result<u64, CoreError> {
        let mut total = 0u64;
        let mut first_err = None;

        for (id, handle) in self.handles {
            match handle.await {
                Ok(processed) => total += processed,
                Err(e) => {
                    error!(target: "stress.core.worker", worker_id = id, error = %e, "worker terminated abnormally");
                    first_err.get_or_insert(CoreError::WorkerPanicked {
                        id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(total),
        }
    }
}
