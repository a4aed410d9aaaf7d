use std::sync::Arc;

use stress_model::{Catalog, StopCondition};
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::QueueSender;

/// Producer that cycles the catalog into the work queue until the stop condition holds.
///
/// The stop condition is checked before every single push, and a push blocked on a full queue
/// races the duration deadline, so nothing is enqueued once the deadline has passed.
/// `MaxAttempts(n)` is counted on pushed items: a run enqueues, and therefore invokes, exactly `n`.
pub struct Dispatcher {
    catalog: Catalog,
    stop: StopCondition,
    shutdown: CancellationToken,
}

impl Dispatcher {
    pub fn new(catalog: Catalog, stop: StopCondition) -> Self {
        Self {
            catalog,
            stop,
            shutdown: CancellationToken::new(),
        }
    }

    /// External stop request (e.g. Ctrl-C); handled like a reached stop condition.
    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Feed the queue, close it, and return how many items were pushed.
    pub async fn run(self, queue: QueueSender) -> u64 {
        // A duration too large to be represented as an instant never expires.
        let deadline = match self.stop {
            StopCondition::Duration(d) => Instant::now().checked_add(d),
            StopCondition::MaxAttempts(_) => None,
        };
        let mut pushed = 0u64;

        'produce: loop {
            for item in self.catalog.iter() {
                if self.should_stop(pushed, deadline) {
                    break 'produce;
                }

                let sent = tokio::select! {
                    biased;

                    _ = self.shutdown.cancelled() => {
                        info!(target: "stress.core.dispatcher", "shutdown requested; stop producing");
                        break 'produce;
                    }
                    _ = deadline_reached(deadline) => {
                        break 'produce;
                    }
                    res = queue.push(Arc::clone(item)) => res,
                };

                if let Err(e) = sent {
                    warn!(target: "stress.core.dispatcher", error = %e, "push rejected; stop producing");
                    break 'produce;
                }
                pushed += 1;
            }
        }

        queue.close();
        debug!(target: "stress.core.dispatcher", pushed, stop = %self.stop, "queue closed");
        pushed
    }

    fn should_stop(&self, pushed: u64, deadline: Option<Instant>) -> bool {
        if self.shutdown.is_cancelled() {
            return true;
        }
        match self.stop {
            StopCondition::MaxAttempts(max) => pushed >= max,
            StopCondition::Duration(_) => deadline.is_some_and(|d| Instant::now() >= d),
        }
    }
}

async fn deadline_reached(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}
