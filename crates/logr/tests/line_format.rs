//! Integration tests for the emitted line layout.
//!
//! Lines have the shape `[LEVEL][dd-MM-yyyy HH:mm:ss.SSS][context] message`
//! followed by the platform line terminator.

use std::sync::Arc;

use logr::{
    CapturedOutput, ContextKey, FixedClock, LINE_ENDING, Level, LogConfig, Registry, Stream,
    SystemClock, args,
};
use time::UtcOffset;
use time::macros::datetime;

struct Foo;

mod nested {
    pub struct Handler<T>(pub T);
}

fn pinned() -> (Registry, Arc<CapturedOutput>) {
    let output = Arc::new(CapturedOutput::new());
    let registry = Registry::with_parts(
        LogConfig::default(),
        output.clone(),
        Arc::new(FixedClock::new(datetime!(2021-03-07 09:05:03.004 UTC))),
    );
    (registry, output)
}

/// Checks `line` against `[LEVEL][dd-MM-yyyy HH:mm:ss.SSS][context] message`
/// without pinning the timestamp.
fn assert_shape(line: &str, level: &str, context: &str, message: &str) {
    let body = line
        .strip_suffix(LINE_ENDING)
        .unwrap_or_else(|| panic!("missing terminator: {line:?}"));
    let rest = body
        .strip_prefix(&format!("[{level}]["))
        .unwrap_or_else(|| panic!("bad level in {line:?}"));
    let (timestamp, rest) = rest.split_at(23);
    assert_eq!(rest, format!("][{context}] {message}"));

    let bytes = timestamp.as_bytes();
    for (index, byte) in bytes.iter().enumerate() {
        match index {
            2 | 5 => assert_eq!(*byte, b'-', "{timestamp}"),
            10 => assert_eq!(*byte, b' ', "{timestamp}"),
            13 | 16 => assert_eq!(*byte, b':', "{timestamp}"),
            19 => assert_eq!(*byte, b'.', "{timestamp}"),
            _ => assert!(byte.is_ascii_digit(), "{timestamp}"),
        }
    }
}

// ============================================================================
// Layout Tests
// ============================================================================

/// Verifies the exact line for a type context with a pinned clock.
#[test]
fn info_line_for_type_context() {
    let (registry, output) = pinned();
    registry.get_for_type::<Foo>().info("x=%d", args![5]).unwrap();

    let lines = output.drain();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].stream, Stream::Stdout);
    assert_eq!(
        lines[0].text,
        format!("[INFO][07-03-2021 09:05:03.004][Foo] x=5{LINE_ENDING}")
    );
}

/// Verifies the layout against the real system clock.
#[test]
fn system_clock_line_shape() {
    let output = Arc::new(CapturedOutput::new());
    let registry = Registry::with_parts(LogConfig::default(), output.clone(), Arc::new(SystemClock));
    registry.get_for_type::<Foo>().info("x=%d", args![5]).unwrap();

    assert_shape(&output.drain()[0].text, "INFO", "Foo", "x=5");
}

/// Verifies the anonymous logger prints `-` as its context.
#[test]
fn anonymous_context_is_dash() {
    let (registry, output) = pinned();
    registry.get().warn("careful", args![]).unwrap();

    assert_eq!(
        output.drain()[0].text,
        format!("[WARN][07-03-2021 09:05:03.004][-] careful{LINE_ENDING}")
    );
}

/// Verifies generic and nested types print only their bare name.
#[test]
fn type_context_strips_path_and_generics() {
    let (registry, output) = pinned();
    registry
        .get_for(&nested::Handler(7_u8))
        .info("ok", args![])
        .unwrap();
    registry
        .get_key(ContextKey::named("db::pool"))
        .info("ok", args![])
        .unwrap();

    let lines = output.drain();
    assert!(lines[0].text.contains("][Handler] ok"));
    assert!(lines[1].text.contains("][db::pool] ok"));
}

/// Verifies the clock's offset is rendered as wall-clock time.
#[test]
fn timestamp_uses_clock_offset() {
    let output = Arc::new(CapturedOutput::new());
    let offset = UtcOffset::from_hms(2, 0, 0).unwrap();
    let clock = FixedClock::with_offset(datetime!(2020-12-31 23:30:00 UTC), offset);
    let registry = Registry::with_parts(LogConfig::default(), output.clone(), Arc::new(clock));

    registry.get().info("new year", args![]).unwrap();
    assert!(output.drain()[0].text.starts_with("[INFO][01-01-2021 01:30:00.000][-]"));
}

/// Verifies the year is the calendar year at a week-year boundary.
#[test]
fn calendar_year_at_week_boundary() {
    let output = Arc::new(CapturedOutput::new());
    let clock = FixedClock::new(datetime!(2024-12-30 12:00:00 UTC));
    let registry = Registry::with_parts(LogConfig::default(), output.clone(), Arc::new(clock));

    registry.get().info("x", args![]).unwrap();
    assert!(output.drain()[0].text.contains("[30-12-2024 12:00:00.000]"));
}

// ============================================================================
// Message Tests
// ============================================================================

/// Verifies printf substitution reaches the emitted line.
#[test]
fn printf_arguments_are_substituted() {
    let (registry, output) = pinned();
    let logger = registry.get_named("job");
    logger
        .log(Level::Info, "%s took %.2f s (%,d rows)", args!["load", 1.5, 1_234_567])
        .unwrap();

    assert!(output.drain()[0]
        .text
        .ends_with(&format!("[job] load took 1.50 s (1,234,567 rows){LINE_ENDING}")));
}

/// Verifies a message is written exactly once per call.
#[test]
fn one_line_per_call() {
    let (registry, output) = pinned();
    let logger = registry.get();
    for n in 0..5 {
        logger.info("n=%d", args![n]).unwrap();
    }

    let lines = output.drain();
    assert_eq!(lines.len(), 5);
    assert!(lines.iter().all(|line| line.text.matches(LINE_ENDING).count() == 1));
}
