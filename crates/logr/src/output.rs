//! crates/logr/src/output.rs
//! Destinations for rendered lines.
//!
//! Loggers never touch the process streams directly. They hand each finished
//! line to the registry's [`Output`], which is [`StdOutput`] unless the
//! registry was built with something else. [`CapturedOutput`] keeps lines in
//! memory so callers can [`drain`](CapturedOutput::drain) and inspect them.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// One of the two process output streams.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stream {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        })
    }
}

/// Receives fully rendered lines, terminator included.
///
/// Implementations write each line as a single unit and report nothing back;
/// a failed write is the destination's own concern.
pub trait Output: Send + Sync {
    /// Writes `line` to `stream`.
    fn write_line(&self, stream: Stream, line: &str);
}

/// Writes to the real standard output and standard error.
///
/// Each line is written under the stream's lock and flushed before the lock is
/// released. Write errors such as a closed pipe are dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdOutput;

impl Output for StdOutput {
    fn write_line(&self, stream: Stream, line: &str) {
        let _ = match stream {
            Stream::Stdout => write_locked(&mut io::stdout().lock(), line),
            Stream::Stderr => write_locked(&mut io::stderr().lock(), line),
        };
    }
}

fn write_locked<W: Write>(writer: &mut W, line: &str) -> io::Result<()> {
    writer.write_all(line.as_bytes())?;
    writer.flush()
}

/// A line recorded by [`CapturedOutput`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedLine {
    /// Stream the line was addressed to.
    pub stream: Stream,
    /// The rendered line, terminator included.
    pub text: String,
}

/// In-memory [`Output`] that records lines in arrival order.
#[derive(Debug, Default)]
pub struct CapturedOutput {
    lines: Mutex<Vec<CapturedLine>>,
}

impl CapturedOutput {
    /// Creates an empty capture buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every recorded line.
    pub fn drain(&self) -> Vec<CapturedLine> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect()
    }

    /// Returns a copy of the recorded lines without clearing them.
    pub fn lines(&self) -> Vec<CapturedLine> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of lines recorded so far.
    pub fn len(&self) -> usize {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Reports whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Output for CapturedOutput {
    fn write_line(&self, stream: Stream, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(CapturedLine {
                stream,
                text: line.to_owned(),
            });
    }
}
