//! crates/logr/src/logger.rs
//! Per-context logger: threshold check, line rendering and emission.

use std::any::type_name;
use std::backtrace::Backtrace;
use std::error::Error;
use std::fmt::{self, Write as _};
use std::sync::Arc;

use crate::clock::format_timestamp;
use crate::context::short_type_name;
use crate::error::FormatError;
use crate::format::{Arg, format};
use crate::level::Level;
use crate::registry::Shared;

/// Terminator appended to every emitted line.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
/// Terminator appended to every emitted line.
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Emits lines tagged with one fixed context.
///
/// Loggers are obtained from a [`Registry`](crate::Registry) and shared as
/// `Arc<Logger>`. Each line has the shape
///
/// ```text
/// [LEVEL][dd-MM-yyyy HH:mm:ss.SSS][context] message
/// ```
///
/// and goes to standard output for `INFO`/`WARN` and standard error for
/// `ERROR`. The registry threshold is read on every call, so changing it
/// affects loggers that already exist.
pub struct Logger {
    context: String,
    shared: Arc<Shared>,
}

impl Logger {
    pub(crate) fn new(context: String, shared: Arc<Shared>) -> Self {
        Self { context, shared }
    }

    /// Label printed in the third bracket pair.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Reports whether a line at `level` would currently be written.
    #[must_use]
    pub fn is_enabled(&self, level: Level) -> bool {
        level.is_within(self.shared.threshold())
    }

    /// Formats `format` with `args` printf-style and emits it at `level`.
    ///
    /// Nothing is formatted when `level` is below the threshold, so a broken
    /// template only surfaces once its level is enabled.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use logr::{CapturedOutput, Level, LogConfig, Registry, SystemClock, args};
    ///
    /// let output = Arc::new(CapturedOutput::new());
    /// let registry = Registry::with_parts(LogConfig::default(), output.clone(), Arc::new(SystemClock));
    ///
    /// registry.get_named("Foo").log(Level::Info, "x=%d", args![5])?;
    /// let line = &output.drain()[0].text;
    /// assert!(line.starts_with("[INFO]["));
    /// assert!(line.trim_end().ends_with("][Foo] x=5"));
    /// # Ok::<(), logr::FormatError>(())
    /// ```
    pub fn log(&self, level: Level, format: &str, args: &[Arg<'_>]) -> Result<(), FormatError> {
        if !self.is_enabled(level) {
            return Ok(());
        }
        let message = self::format(format, args)?;
        self.emit(level, &message);
        Ok(())
    }

    /// Emits pre-built [`fmt::Arguments`] at `level`.
    ///
    /// This is what the [`log_info!`](crate::log_info) family expands to; the
    /// arguments are only rendered when `level` is enabled.
    pub fn log_args(&self, level: Level, args: fmt::Arguments<'_>) {
        if !self.is_enabled(level) {
            return;
        }
        match args.as_str() {
            Some(message) => self.emit(level, message),
            None => self.emit(level, &args.to_string()),
        }
    }

    /// Shorthand for [`log`](Self::log) at [`Level::Info`].
    pub fn info(&self, format: &str, args: &[Arg<'_>]) -> Result<(), FormatError> {
        self.log(Level::Info, format, args)
    }

    /// Shorthand for [`log`](Self::log) at [`Level::Warn`].
    pub fn warn(&self, format: &str, args: &[Arg<'_>]) -> Result<(), FormatError> {
        self.log(Level::Warn, format, args)
    }

    /// Shorthand for [`log`](Self::log) at [`Level::Error`].
    pub fn err(&self, format: &str, args: &[Arg<'_>]) -> Result<(), FormatError> {
        self.log(Level::Error, format, args)
    }

    /// Emits the error's `Display` text at [`Level::Error`].
    ///
    /// The text is written as-is; `%` characters in it are not treated as
    /// specifiers.
    pub fn err_error<E: Error + ?Sized>(&self, error: &E) {
        self.log_args(Level::Error, format_args!("{error}"));
    }

    /// Emits the error's type, message, source chain and a backtrace of the
    /// calling thread as one [`Level::Error`] line.
    ///
    /// The backtrace is captured before anything is written, whatever the
    /// `RUST_BACKTRACE` setting.
    ///
    /// The type label comes from the static type `E`. A trait object such as
    /// `&*boxed` for a `Box<dyn Error>` is labelled `Error`, not with the
    /// concrete type behind it.
    pub fn err_trace<E: Error + ?Sized>(&self, error: &E) {
        if !self.is_enabled(Level::Error) {
            return;
        }
        let backtrace = Backtrace::force_capture();
        let body = trace_body(short_type_name(type_name::<E>()), error, &backtrace);
        self.emit(Level::Error, &body);
    }

    fn emit(&self, level: Level, message: &str) {
        let timestamp = format_timestamp(self.shared.now());
        let line = render_line(level, &timestamp, &self.context, message);
        self.shared.write_line(level.stream(), &line);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

pub(crate) fn render_line(level: Level, timestamp: &str, context: &str, message: &str) -> String {
    let mut line = String::with_capacity(
        level.label().len() + timestamp.len() + context.len() + message.len() + 8,
    );
    let _ = write!(line, "[{level}][{timestamp}][{context}] {message}{LINE_ENDING}");
    line
}

fn trace_body<E: Error + ?Sized>(type_label: &str, error: &E, backtrace: &Backtrace) -> String {
    let mut body = String::new();
    let _ = write!(body, "{type_label}: {error}");
    let mut source = error.source();
    while let Some(cause) = source {
        let _ = write!(body, "{LINE_ENDING}Caused by: {cause}");
        source = cause.source();
    }
    let trace = backtrace.to_string();
    let trace = trace.trim_end();
    if !trace.is_empty() {
        body.push_str(LINE_ENDING);
        body.push_str(trace);
    }
    body
}
