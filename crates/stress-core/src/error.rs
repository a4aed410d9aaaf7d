use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("worker count must be at least 1")]
    NoWorkers,
    #[error("work queue closed: no worker is left to receive items")]
    QueueClosed,
    #[error("worker {id} panicked: {reason}")]
    WorkerPanicked { id: usize, reason: String },
    #[error("dispatcher failed: {0}")]
    Dispatcher(String),
}
