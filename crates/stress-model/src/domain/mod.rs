mod work_item;
pub use work_item::WorkItem;

mod catalog;
pub use catalog::Catalog;

mod stop;
pub use stop::StopCondition;

/// Total number of invocations a run is allowed to attempt.
pub type AttemptCount = u64;
