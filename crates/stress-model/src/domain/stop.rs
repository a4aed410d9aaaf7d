use std::{fmt, time::Duration};

use crate::AttemptCount;

/// Global rule that ends a run.
///
/// Only the dispatcher evaluates it; workers stop when the queue closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopCondition {
    /// Stop producing once this much wall-clock time has passed.
    Duration(Duration),
    /// Stop producing once this many items have been handed to workers.
    MaxAttempts(AttemptCount),
}

impl Default for StopCondition {
    fn default() -> Self {
        StopCondition::Duration(Duration::from_secs(10 * 60))
    }
}

impl fmt::Display for StopCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopCondition::Duration(d) => write!(f, "duration={}", humantime::format_duration(*d)),
            StopCondition::MaxAttempts(n) => write!(f, "containers={n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_ten_minutes() {
        assert_eq!(
            StopCondition::default(),
            StopCondition::Duration(Duration::from_secs(600))
        );
    }

    #[test]
    fn display() {
        assert_eq!(
            StopCondition::Duration(Duration::from_secs(90)).to_string(),
            "duration=1m 30s"
        );
        assert_eq!(StopCondition::MaxAttempts(5).to_string(), "containers=5");
    }
}
