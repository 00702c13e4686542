#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Overview
//!
//! `logr` is a small leveled logging facility. Every line names the level,
//! the local time and the calling context:
//!
//! ```text
//! [INFO][29-02-2024 13:45:07.089][Scheduler] 3 jobs queued
//! ```
//!
//! `INFO` and `WARN` lines go to standard output, `ERROR` lines to standard
//! error.
//!
//! # Design
//!
//! A [`Registry`] hands out one shared [`Logger`] per [`ContextKey`] (a type,
//! an explicit name, or the anonymous `-` context) and owns the threshold all
//! of its loggers obey. Changing the threshold with
//! [`Registry::set_log_level`] affects loggers that already exist. The
//! [`global`] module wraps a lazily created process-wide registry for
//! application code; tests build their own with [`Registry::with_parts`],
//! capturing lines in a [`CapturedOutput`] and pinning time with a
//! [`FixedClock`].
//!
//! Messages are either printf-style templates checked at run time
//! ([`Logger::log`], see [`format::format`]) or `format_args!` messages checked
//! at compile time ([`log_info!`] and friends). Neither renders anything when
//! the level is filtered out.
//!
//! # Invariants
//!
//! - Equal context keys resolve to the same `Arc<Logger>`, also under
//!   concurrent first use.
//! - Each line is written with a single write while the target stream is
//!   locked, so lines from different threads never interleave.
//! - Write failures on the process streams are ignored.
//!
//! # Errors
//!
//! [`FormatError`] reports a template that does not match its arguments,
//! [`MissingContextError`] an absent value passed to
//! [`Registry::try_get_for`], and [`LevelParseError`] an unknown level name.
//!
//! # Examples
//!
//! ```
//! use logr::{Level, args, global, log_warn};
//!
//! struct Scheduler;
//!
//! let logger = global::get_for_type::<Scheduler>();
//! logger.info("%d jobs queued", args![3])?;
//! log_warn!(logger, "queue {} is {}% full", "default", 90);
//!
//! global::set_log_level(Level::Error);
//! logger.info("no longer printed", args![])?;
//! # Ok::<(), logr::FormatError>(())
//! ```

mod clock;
mod config;
pub mod context;
mod error;
pub mod format;
pub mod global;
mod level;
mod logger;
mod macros;
mod output;
mod registry;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::LogConfig;
pub use context::ContextKey;
pub use error::{FormatError, LevelParseError, MissingContextError};
pub use format::Arg;
pub use level::Level;
pub use logger::{LINE_ENDING, Logger};
pub use output::{CapturedLine, CapturedOutput, Output, StdOutput, Stream};
pub use registry::Registry;

#[cfg(feature = "tracing")]
#[cfg_attr(docsrs, doc(cfg(feature = "tracing")))]
pub use tracing_bridge::{LogrLayer, init_tracing, init_tracing_with_filter};
