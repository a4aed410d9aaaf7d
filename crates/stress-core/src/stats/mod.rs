use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use crate::Outcome;

/// Live run counters shared by all workers.
///
/// Increments are atomic; the coordinator reads them once after every worker has been joined.
#[derive(Debug, Default)]
pub struct RunStats {
    attempted: AtomicU64,
    failed: AtomicU64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one finished invocation.
    #[inline]
    pub fn record(&self, outcome: Outcome) {
        self.attempted.fetch_add(1, Ordering::Relaxed);
        if outcome.is_failure() {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline]
    pub fn attempted(&self) -> u64 {
        self.attempted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Freeze the counters together with the run's wall-clock time.
    pub fn snapshot(&self, elapsed: Duration) -> RunSummary {
        RunSummary {
            attempted: self.attempted(),
            failed: self.failed(),
            elapsed,
        }
    }
}

/// Final, immutable statistics of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub attempted: u64,
    pub failed: u64,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn succeeded(&self) -> u64 {
        self.attempted - self.failed
    }

    /// Attempts per second; zero for an instantaneous run.
    pub fn per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.attempted as f64 / secs
        } else {
            0.0
        }
    }

    /// Seconds per attempt; zero when nothing was attempted.
    pub fn seconds_per_attempt(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            self.elapsed.as_secs_f64() / self.attempted as f64
        }
    }

    /// Fraction of failed attempts (0.0 - 1.0).
    pub fn failure_rate(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            self.failed as f64 / self.attempted as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_counts_attempts_and_failures() {
        let stats = RunStats::new();
        stats.record(Outcome::Success);
        stats.record(Outcome::Failure);
        stats.record(Outcome::Success);

        assert_eq!(stats.attempted(), 3);
        assert_eq!(stats.failed(), 1);
    }

    #[test]
    fn summary_rates() {
        let summary = RunSummary {
            attempted: 10,
            failed: 2,
            elapsed: Duration::from_secs(5),
        };
        assert_eq!(summary.succeeded(), 8);
        assert!((summary.per_second() - 2.0).abs() < f64::EPSILON);
        assert!((summary.seconds_per_attempt() - 0.5).abs() < f64::EPSILON);
        assert!((summary.failure_rate() - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_rates_are_zero_for_empty_run() {
        let summary = RunStats::new().snapshot(Duration::ZERO);
        assert_eq!(summary.per_second(), 0.0);
        assert_eq!(summary.seconds_per_attempt(), 0.0);
        assert_eq!(summary.failure_rate(), 0.0);
    }

    #[test]
    fn concurrent_records_are_exact() {
        let stats = std::sync::Arc::new(RunStats::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let stats = std::sync::Arc::clone(&stats);
                std::thread::spawn(move || {
                    for i in 0..1000 {
                        let outcome = if i % 2 == 0 {
                            Outcome::Success
                        } else {
                            Outcome::Failure
                        };
                        stats.record(outcome);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(stats.attempted(), 8000);
        assert_eq!(stats.failed(), 4000);
    }
}
