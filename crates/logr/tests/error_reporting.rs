//! Integration tests for ERROR-level reporting.
//!
//! Covers stream routing for errors, verbatim error messages, stack-trace
//! reports and template errors returned to the caller.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt;
use std::io;
use std::sync::Arc;

use logr::{
    CapturedOutput, FixedClock, FormatError, LINE_ENDING, Level, LogConfig, Registry, Stream,
    args,
};
use time::macros::datetime;

#[derive(Debug)]
struct ConfigError {
    path: &'static str,
    source: io::Error,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load {}", self.path)
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

fn pinned() -> (Registry, Arc<CapturedOutput>) {
    let output = Arc::new(CapturedOutput::new());
    let registry = Registry::with_parts(
        LogConfig::default(),
        output.clone(),
        Arc::new(FixedClock::new(datetime!(2019-06-15 22:10:45.123 UTC))),
    );
    (registry, output)
}

// ============================================================================
// Routing Tests
// ============================================================================

/// Verifies ERROR lines go to stderr while INFO and WARN go to stdout.
#[test]
fn errors_route_to_stderr() {
    let (registry, output) = pinned();
    let logger = registry.get();
    logger.info("a", args![]).unwrap();
    logger.warn("b", args![]).unwrap();
    logger.err("boom", args![]).unwrap();

    let streams: Vec<Stream> = output.drain().into_iter().map(|line| line.stream).collect();
    assert_eq!(streams, [Stream::Stdout, Stream::Stdout, Stream::Stderr]);
}

/// Verifies the exact text of an ERROR line.
#[test]
fn error_line_text() {
    let (registry, output) = pinned();
    registry.get().err("boom", args![]).unwrap();

    assert_eq!(
        output.drain()[0].text,
        format!("[ERROR][15-06-2019 22:10:45.123][-] boom{LINE_ENDING}")
    );
}

// ============================================================================
// Error Value Tests
// ============================================================================

/// Verifies err_error logs the message without treating `%` as a specifier.
#[test]
fn err_error_logs_display_text() {
    let (registry, output) = pinned();
    registry
        .get_named("loader")
        .err_error(&io::Error::new(io::ErrorKind::NotFound, "50% of files missing"));

    let lines = output.drain();
    assert_eq!(lines[0].stream, Stream::Stderr);
    assert_eq!(
        lines[0].text,
        format!("[ERROR][15-06-2019 22:10:45.123][loader] 50% of files missing{LINE_ENDING}")
    );
}

/// Verifies err_trace reports the type, the source chain and call frames.
#[test]
fn err_trace_reports_type_chain_and_frames() {
    let (registry, output) = pinned();
    let error = ConfigError {
        path: "/etc/app.toml",
        source: io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
    };
    registry.get_named("loader").err_trace(&error);

    let lines = output.drain();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].stream, Stream::Stderr);

    let text = &lines[0].text;
    assert!(text.starts_with(
        "[ERROR][15-06-2019 22:10:45.123][loader] ConfigError: failed to load /etc/app.toml"
    ));
    assert!(text.contains(&format!("{LINE_ENDING}Caused by: access denied")));
    assert!(text.ends_with(LINE_ENDING));
    if Backtrace::force_capture().status() == BacktraceStatus::Captured {
        assert!(text.contains("0: "), "expected frames in {text}");
    }
}

/// Verifies err_trace on a trait object is labelled with the trait name.
#[test]
fn err_trace_on_boxed_error() {
    let (registry, output) = pinned();
    let error: Box<dyn Error + Send + Sync> = "plain failure".into();
    registry.get().err_trace(&*error);

    let text = &output.drain()[0].text;
    assert!(
        text.starts_with("[ERROR][15-06-2019 22:10:45.123][-] Error: plain failure"),
        "unexpected label in {text}"
    );
}

/// Verifies err_trace below the threshold writes nothing.
#[test]
fn err_trace_is_always_within_threshold() {
    let (registry, output) = pinned();
    registry.set_log_level(Level::Error);
    registry.get().err_trace(&io::Error::other("still reported"));
    assert_eq!(output.len(), 1);
}

// ============================================================================
// Template Error Tests
// ============================================================================

/// Verifies a missing argument is reported and nothing is written.
#[test]
fn missing_argument_is_returned() {
    let (registry, output) = pinned();
    let result = registry.get().info("%s and %s", args!["one"]);

    assert_eq!(
        result,
        Err(FormatError::MissingArgument {
            specifier: "%s".to_owned()
        })
    );
    assert!(output.is_empty());
}

/// Verifies a conversion mismatch is reported.
#[test]
fn illegal_conversion_is_returned() {
    let (registry, _output) = pinned();
    let error = registry.get().warn("%d", args![1.5]).unwrap_err();
    assert!(matches!(
        error,
        FormatError::IllegalConversion { conversion: 'd', .. }
    ));
}

/// Verifies an unknown conversion is reported.
#[test]
fn unknown_conversion_is_returned() {
    let (registry, _output) = pinned();
    let error = registry.get().err("%q", args![1]).unwrap_err();
    assert!(matches!(error, FormatError::UnknownConversion { .. }));
    assert!(error.to_string().contains("%q"));
}
