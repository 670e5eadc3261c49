//! Shared setup for the integration test binaries.
//!
//! `RUST_LOG` filters the output (e.g. `starfish_coupled=debug`). Log events
//! are only produced when the crate is built with `--features tracing`.

#![allow(dead_code)]

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Ensures tracing is only initialized once per test binary.
static INIT: Once = Once::new();

/// Installs a test-friendly `fmt` subscriber. Safe to call from every test.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

        // Another harness may have installed a subscriber already; keep it.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_thread_names(true)
            .try_init();
    });
}
