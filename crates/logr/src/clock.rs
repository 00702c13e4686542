//! crates/logr/src/clock.rs
//! Wall-clock source and the timestamp layout used in every line.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// `dd-MM-yyyy HH:mm:ss.SSS`
pub(crate) const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[day]-[month]-[year] [hour]:[minute]:[second].[subsecond digits:3]"
);

const FALLBACK_TIMESTAMP: &str = "01-01-1970 00:00:00.000";

/// Source of the instant stamped on each emitted line.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> OffsetDateTime;
}

/// Reads the system clock in the local offset.
///
/// When the local offset cannot be determined (the `time` crate refuses to
/// query it from multi-threaded processes on some platforms) the instant is
/// reported in UTC.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
    }
}

/// Always reports the same instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock {
    instant: OffsetDateTime,
}

impl FixedClock {
    /// Creates a clock pinned to `instant`.
    #[must_use]
    pub const fn new(instant: OffsetDateTime) -> Self {
        Self { instant }
    }

    /// Creates a clock pinned to `instant` shifted into `offset`.
    #[must_use]
    pub fn with_offset(instant: OffsetDateTime, offset: UtcOffset) -> Self {
        Self::new(instant.to_offset(offset))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.instant
    }
}

/// Renders `instant` with [`TIMESTAMP_FORMAT`].
pub(crate) fn format_timestamp(instant: OffsetDateTime) -> String {
    instant
        .format(TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| FALLBACK_TIMESTAMP.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn timestamp_uses_fixed_width_fields() {
        let instant = datetime!(2024-03-05 07:08:09.012 UTC);
        assert_eq!(format_timestamp(instant), "05-03-2024 07:08:09.012");
    }

    #[test]
    fn timestamp_truncates_to_milliseconds() {
        let instant = datetime!(2023-12-31 23:59:59.999999999 UTC);
        assert_eq!(format_timestamp(instant), "31-12-2023 23:59:59.999");
    }

    #[test]
    fn timestamp_uses_calendar_year_at_week_boundary() {
        // 30 December 2024 falls in ISO week 1 of 2025.
        let instant = datetime!(2024-12-30 12:00:00 UTC);
        assert_eq!(format_timestamp(instant), "30-12-2024 12:00:00.000");
    }

    #[test]
    fn fixed_clock_reports_pinned_instant() {
        let instant = datetime!(2020-01-02 03:04:05 UTC);
        let clock = FixedClock::new(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn fixed_clock_with_offset_renders_local_fields() {
        let instant = datetime!(2020-01-02 23:30:00 UTC);
        let offset = UtcOffset::from_hms(2, 0, 0).expect("valid offset");
        let clock = FixedClock::with_offset(instant, offset);
        assert_eq!(format_timestamp(clock.now()), "03-01-2020 01:30:00.000");
    }

    #[test]
    fn system_clock_output_has_expected_shape() {
        let rendered = format_timestamp(SystemClock.now());
        assert_eq!(rendered.len(), "dd-MM-yyyy HH:mm:ss.SSS".len());
        assert_eq!(&rendered[2..3], "-");
        assert_eq!(&rendered[5..6], "-");
        assert_eq!(&rendered[10..11], " ");
        assert_eq!(&rendered[19..20], ".");
    }
}
