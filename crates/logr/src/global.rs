//! crates/logr/src/global.rs
//! Process-wide registry and free functions over it.
//!
//! The first call to any function here initialises a [`Registry`] that writes
//! to the process streams with the default threshold. Startup code that needs
//! a different output, clock or threshold calls [`install`] before that.
//!
//! ```
//! use logr::{Level, global};
//!
//! struct Server;
//!
//! let logger = global::get_for_type::<Server>();
//! assert_eq!(logger.context(), "Server");
//! assert!(std::sync::Arc::ptr_eq(&logger, &global::get_for(&Server)));
//! global::set_log_level(Level::Warn);
//! assert_eq!(global::log_level(), Level::Warn);
//! ```

use std::sync::{Arc, OnceLock};

use crate::error::MissingContextError;
use crate::level::Level;
use crate::logger::Logger;
use crate::registry::Registry;

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// The process-wide registry, created on first use.
pub fn global() -> &'static Registry {
    GLOBAL.get_or_init(Registry::new)
}

/// Makes `registry` the process-wide registry.
///
/// # Errors
///
/// Returns `registry` unchanged when the process-wide registry already exists,
/// either from an earlier `install` or because a logger was already requested.
pub fn install(registry: Registry) -> Result<(), Registry> {
    GLOBAL.set(registry)
}

/// The anonymous logger of the process-wide registry.
pub fn get() -> Arc<Logger> {
    global().get()
}

/// See [`Registry::get_for`].
pub fn get_for<T: ?Sized + 'static>(value: &T) -> Arc<Logger> {
    global().get_for(value)
}

/// See [`Registry::try_get_for`].
///
/// # Errors
///
/// Returns [`MissingContextError`] when `value` is `None`.
pub fn try_get_for<T: ?Sized + 'static>(
    value: Option<&T>,
) -> Result<Arc<Logger>, MissingContextError> {
    global().try_get_for(value)
}

/// See [`Registry::get_for_type`].
pub fn get_for_type<T: ?Sized + 'static>() -> Arc<Logger> {
    global().get_for_type::<T>()
}

/// See [`Registry::get_named`].
pub fn get_named(name: impl Into<String>) -> Arc<Logger> {
    global().get_named(name)
}

/// Sets the threshold of the process-wide registry.
pub fn set_log_level(level: Level) {
    global().set_log_level(level);
}

/// Threshold of the process-wide registry.
pub fn log_level() -> Level {
    global().log_level()
}
