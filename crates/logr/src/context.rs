//! crates/logr/src/context.rs
//! Keys that identify a logger within a registry.

use std::any::{TypeId, type_name};
use std::borrow::Cow;

/// Label printed for the anonymous logger.
pub const ANONYMOUS_LABEL: &str = "-";

/// Identity of a logger's calling context.
///
/// Two lookups with equal keys resolve to the same logger. Type keys compare
/// by [`TypeId`], so distinct types that share a short name (`a::Config` and
/// `b::Config`) get separate loggers even though both print `Config`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ContextKey {
    /// The context-free logger, printed as `-`.
    #[default]
    Anonymous,
    /// A Rust type.
    Type {
        /// Identity of the type.
        id: TypeId,
        /// Full path as reported by [`type_name`].
        name: &'static str,
    },
    /// An explicit name chosen by the caller.
    Named(String),
}

impl ContextKey {
    /// Key for the type `T`.
    ///
    /// ```
    /// use logr::ContextKey;
    ///
    /// struct Scheduler;
    /// assert_eq!(ContextKey::of::<Scheduler>().label(), "Scheduler");
    /// ```
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::Type {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Key for an explicit name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Text printed between the third pair of brackets of a line.
    #[must_use]
    pub fn label(&self) -> Cow<'_, str> {
        match self {
            Self::Anonymous => Cow::Borrowed(ANONYMOUS_LABEL),
            Self::Type { name, .. } => Cow::Borrowed(short_type_name(name)),
            Self::Named(name) => Cow::Borrowed(name.as_str()),
        }
    }
}

impl From<Option<Self>> for ContextKey {
    /// An absent key selects the anonymous logger.
    fn from(key: Option<Self>) -> Self {
        key.unwrap_or_default()
    }
}

/// Strips the module path and generic arguments from a [`type_name`] string.
///
/// Trait objects keep only their principal trait, so
/// `dyn core::error::Error + core::marker::Send` becomes `Error`.
///
/// ```
/// use logr::context::short_type_name;
///
/// assert_eq!(short_type_name("alloc::vec::Vec<my_app::Job>"), "Vec");
/// assert_eq!(short_type_name("my_app::net::Listener"), "Listener");
/// assert_eq!(short_type_name("u32"), "u32");
/// ```
#[must_use]
pub fn short_type_name(full: &str) -> &str {
    let full = full.strip_prefix("dyn ").unwrap_or(full);
    let full = full.split_once(" + ").map_or(full, |(principal, _)| principal);
    let base = full.split_once('<').map_or(full, |(base, _)| base);
    base.rsplit_once("::").map_or(base, |(_, last)| last)
}
