//! Test bodies shared by the unit tests and the `tests/` binaries.
//!
//! # Configuration
//!
//! Stress runs read their knobs from the environment:
//! - `COUPLED_STRESS_THREADS`: worker threads (default 8, never fewer than 2)
//! - `COUPLED_STRESS_MILLIS`: duration of each timed run (default 1500)
//! - `COUPLED_STRESS_KEYS`: size of the value space (default 4096)

use std::env;
use std::time::Duration;

pub mod list_core_tests;

/// Parameters for timed stress runs.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Number of worker threads.
    pub threads: usize,
    /// How long randomized workloads keep running.
    pub duration: Duration,
    /// Upper bound (exclusive) of the values workers operate on.
    pub keys: usize,
    /// Extra time granted to workers after `duration` before a run is
    /// declared deadlocked.
    pub grace: Duration,
}

impl Default for StressConfig {
    fn default() -> Self {
        StressConfig {
            threads: 8,
            duration: Duration::from_millis(1500),
            keys: 4096,
            grace: Duration::from_secs(30),
        }
    }
}

impl StressConfig {
    /// Defaults overridden by any `COUPLED_STRESS_*` variables that parse.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        StressConfig {
            threads: env_usize("COUPLED_STRESS_THREADS")
                .unwrap_or(defaults.threads)
                .max(2),
            duration: env_usize("COUPLED_STRESS_MILLIS")
                .map(|ms| Duration::from_millis(ms as u64))
                .unwrap_or(defaults.duration),
            keys: env_usize("COUPLED_STRESS_KEYS")
                .unwrap_or(defaults.keys)
                .max(1),
            grace: defaults.grace,
        }
    }

    /// Same configuration with a different thread count.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Deadline after which waiting for workers is treated as a deadlock.
    pub fn deadline(&self) -> Duration {
        self.duration + self.grace
    }
}

fn env_usize(name: &str) -> Option<usize> {
    env::var(name).ok()?.trim().parse().ok()
}
