use async_trait::async_trait;
use stress_model::WorkItem;

/// Classification of a single invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure)
    }
}

/// Executes one work item and classifies the result.
///
/// Implementations must not panic on invocation errors: spawn problems, non-zero exits and signal
/// delivery issues are logged by the implementation and folded into [`Outcome::Failure`].
/// The same invoker is shared by every worker, so calls happen concurrently.
#[async_trait]
pub trait Invoker: Send + Sync + 'static {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn invoke(&self, item: &WorkItem) -> Outcome;
}

