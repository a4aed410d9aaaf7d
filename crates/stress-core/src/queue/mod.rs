//! Bounded work queue between the dispatcher and the worker pool.
//!
//! The sender half is owned by exactly one producer. Closing consumes it, so the queue cannot be
//! closed twice or written to after close. The receiver half is cloned into every worker; each
//! item is delivered to exactly one of them.
use std::sync::Arc;

use stress_model::WorkItem;
use tokio::sync::{Mutex, mpsc};

use crate::CoreError;

/// Create a queue holding at most `capacity` buffered items (minimum 1).
pub fn work_queue(capacity: usize) -> (QueueSender, QueueReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        QueueSender { tx },
        QueueReceiver {
            rx: Arc::new(Mutex::new(rx)),
        },
    )
}

/// Producer half. Not cloneable.
#[derive(Debug)]
pub struct QueueSender {
    tx: mpsc::Sender<Arc<WorkItem>>,
}

impl QueueSender {
    /// Push one item, waiting while the queue is full.
    ///
    /// Fails only when every receiver is gone.
    pub async fn push(&self, item: Arc<WorkItem>) -> Result<(), CoreError> {
        self.tx.send(item).await.map_err(|_| CoreError::QueueClosed)
    }

    /// Close the queue. Receivers drain what is buffered and then observe the end.
    pub fn close(self) {
        drop(self.tx);
    }
}

/// Consumer half shared by the worker pool.
#[derive(Debug, Clone)]
pub struct QueueReceiver {
    rx: Arc<Mutex<mpsc::Receiver<Arc<WorkItem>>>>,
}

impl QueueReceiver {
    /// Take the next item; `None` once the queue is closed and empty.
    pub async fn recv(&self) -> Option<Arc<WorkItem>> {
        self.rx.lock().await.recv().await
    }
}
