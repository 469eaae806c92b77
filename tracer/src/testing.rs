//! Testing utilities for tracer.

use std::sync::Once;

static INIT_LOGGING: Once = Once::new();

/// Starts file and console logging for tests.
/// Safe to call multiple times - will only initialize once.
/// Respects RUST_LOG env var, defaults to "info".
pub fn init_logging() {
    INIT_LOGGING.call_once(|| {
        let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        // the handle must outlive every test in the binary
        std::mem::forget(common::setup_logging(&level));
    });
}
