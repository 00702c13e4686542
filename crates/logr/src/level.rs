//! crates/logr/src/level.rs
//! Severity levels and the output stream each level is routed to.

use std::fmt;
use std::str::FromStr;

use crate::error::LevelParseError;
use crate::output::Stream;

/// Severity of a log line.
///
/// Levels are totally ordered by severity (`Info < Warn < Error`). A line is
/// emitted when its level [is within](Self::is_within) the registry threshold.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
#[repr(u8)]
pub enum Level {
    /// Routine progress information.
    #[default]
    Info = 0,
    /// Something unexpected that does not stop the caller.
    Warn = 1,
    /// A failure.
    Error = 2,
}

impl Level {
    /// Every level, least severe first.
    pub const ALL: [Self; 3] = [Self::Info, Self::Warn, Self::Error];

    /// Reports whether a line at this level passes the given threshold.
    ///
    /// ```
    /// use logr::Level;
    ///
    /// assert!(Level::Error.is_within(Level::Warn));
    /// assert!(Level::Warn.is_within(Level::Warn));
    /// assert!(!Level::Info.is_within(Level::Warn));
    /// ```
    #[must_use]
    pub const fn is_within(self, threshold: Self) -> bool {
        self.rank() >= threshold.rank()
    }

    /// Stream that lines at this level are written to.
    #[must_use]
    pub const fn stream(self) -> Stream {
        match self {
            Self::Info | Self::Warn => Stream::Stdout,
            Self::Error => Stream::Stderr,
        }
    }

    /// Tag rendered between the first pair of brackets of a line.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    pub(crate) const fn rank(self) -> u8 {
        self as u8
    }

    pub(crate) const fn from_rank(rank: u8) -> Self {
        match rank {
            0 => Self::Info,
            1 => Self::Warn,
            _ => Self::Error,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Level {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("info") {
            Ok(Self::Info)
        } else if s.eq_ignore_ascii_case("warn") || s.eq_ignore_ascii_case("warning") {
            Ok(Self::Warn)
        } else if s.eq_ignore_ascii_case("error") || s.eq_ignore_ascii_case("err") {
            Ok(Self::Error)
        } else {
            Err(LevelParseError::new(s))
        }
    }
}
