pub mod error;
pub use error::CoreError;

pub mod invoker;
pub use invoker::{Invoker, Outcome};

pub mod stats;
pub use stats::{RunStats, RunSummary};

pub mod queue;
pub use queue::{QueueReceiver, QueueSender, work_queue};

pub mod worker;
pub use worker::{WorkerPool, spawn_workers};

pub mod dispatcher;
pub use dispatcher::Dispatcher;

pub mod coordinator;
pub use coordinator::{Coordinator, RunConfig, run_load};
