//! Integration tests for installing the tracing bridge process-wide.
//!
//! Installing a global subscriber can happen once per process, so this binary
//! holds a single test that wires a capturing registry first.

#![cfg(feature = "tracing")]

use std::sync::Arc;

use logr::{CapturedOutput, FixedClock, Level, LogConfig, Registry, Stream, global};
use time::macros::datetime;
use tracing_subscriber::EnvFilter;

// ============================================================================
// Global Installation Tests
// ============================================================================

/// Verifies init_tracing_with_filter forwards filtered events to the global
/// registry and that a second installation is refused.
#[test]
fn init_with_env_filter_routes_to_global_registry() {
    let output = Arc::new(CapturedOutput::new());
    let registry = Registry::with_parts(
        LogConfig::with_level(Level::Info),
        output.clone(),
        Arc::new(FixedClock::new(datetime!(2025-01-02 03:04:05.006 UTC))),
    );
    assert!(global::install(registry).is_ok());

    logr::init_tracing_with_filter(EnvFilter::new("app=warn")).unwrap();
    tracing::info!(target: "app::jobs", "filtered out");
    tracing::warn!(target: "app::jobs", queued = 4, "backlog");
    tracing::error!(target: "app::jobs", "stalled");

    let lines = output.drain();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0].text.trim_end(),
        "[WARN][02-01-2025 03:04:05.006][jobs] backlog queued=4"
    );
    assert_eq!(lines[1].stream, Stream::Stderr);
    assert!(lines[1].text.contains("[jobs] stalled"));

    assert!(logr::init_tracing().is_err());
}
