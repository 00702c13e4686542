//! crates/logr/src/macros.rs
//! `format_args!`-based logging macros.
//!
//! These check the message against its arguments at compile time and defer
//! rendering until the level is known to be enabled.

/// Log at an explicit level.
///
/// # Example
/// ```
/// use logr::{Level, log_at};
///
/// let logger = logr::global::get_named("jobs");
/// log_at!(logger, Level::Warn, "{} jobs queued", 3);
/// ```
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_args($level, ::core::format_args!($($arg)+))
    };
}

/// Log at [`Level::Info`](crate::Level::Info).
///
/// # Example
/// ```
/// let logger = logr::global::get();
/// logr::log_info!(logger, "listening on port {}", 8080);
/// ```
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log at [`Level::Warn`](crate::Level::Warn).
#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Warn, $($arg)+)
    };
}

/// Log at [`Level::Error`](crate::Level::Error).
#[macro_export]
macro_rules! log_err {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Error, $($arg)+)
    };
}
