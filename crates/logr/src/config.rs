//! crates/logr/src/config.rs
//! Programmatic configuration for a registry.

use crate::level::Level;

/// Settings applied when a [`Registry`](crate::Registry) is built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogConfig {
    /// Minimum level that is emitted.
    pub level: Level,
}

impl LogConfig {
    /// Configuration with the given threshold.
    #[must_use]
    pub const fn with_level(level: Level) -> Self {
        Self { level }
    }
}
