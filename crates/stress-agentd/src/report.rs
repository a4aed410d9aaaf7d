use std::fmt;

use serde::Serialize;
use stress_core::RunSummary;

/// Final run report printed to stdout.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub attempted: u64,
    pub failed: u64,
    pub succeeded: u64,
    pub elapsed_secs: f64,
    pub per_second: f64,
    pub seconds_per_attempt: f64,
}

impl From<&RunSummary> for Report {
    fn from(s: &RunSummary) -> Self {
        Self {
            attempted: s.attempted,
            failed: s.failed,
            succeeded: s.succeeded(),
            elapsed_secs: s.elapsed.as_secs_f64(),
            per_second: s.per_second(),
            seconds_per_attempt: s.seconds_per_attempt(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ran {} containers ({} failed) in {:.3} seconds ({:.3} per sec., {:.3} sec. each)",
            self.attempted, self.failed, self.elapsed_secs, self.per_second, self.seconds_per_attempt
        )
    }
}
