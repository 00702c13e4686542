//! Routes `tracing` events and direct logr calls through the same registry.
//!
//! Run with `cargo run -p logr --example tracing_demo --features tracing`.

use std::io;

use logr::{Level, args, global, log_warn};

struct Worker;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logr::init_tracing()?;

    let logger = global::get_for_type::<Worker>();
    logger.info("starting %d workers", args![4])?;
    tracing::info!(target: "demo::scheduler", queued = 12, "batch accepted");
    tracing::debug!(target: "demo::scheduler", "not forwarded");

    log_warn!(logger, "worker {} is slow", 2);
    logger.err_error(&io::Error::new(io::ErrorKind::TimedOut, "worker 3 timed out"));

    global::set_log_level(Level::Error);
    logger.info("suppressed", args![])?;
    tracing::error!(target: "demo::scheduler", "batch failed");
    Ok(())
}
