//! crates/logr/src/registry.rs
//! Logger cache and the state every logger of a registry shares.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use time::OffsetDateTime;

use crate::clock::{Clock, SystemClock};
use crate::config::LogConfig;
use crate::context::ContextKey;
use crate::error::MissingContextError;
use crate::level::Level;
use crate::logger::Logger;
use crate::output::{Output, StdOutput, Stream};

/// State read by loggers on every call.
pub(crate) struct Shared {
    threshold: AtomicU8,
    output: Arc<dyn Output>,
    clock: Arc<dyn Clock>,
}

impl Shared {
    pub(crate) fn threshold(&self) -> Level {
        Level::from_rank(self.threshold.load(Ordering::Relaxed))
    }

    fn set_threshold(&self, level: Level) {
        self.threshold.store(level.rank(), Ordering::Relaxed);
    }

    pub(crate) fn now(&self) -> OffsetDateTime {
        self.clock.now()
    }

    pub(crate) fn write_line(&self, stream: Stream, line: &str) {
        self.output.write_line(stream, line);
    }
}

/// Hands out one [`Logger`] per context and owns the threshold they obey.
///
/// A registry is an ordinary value: tests and embedders build their own with
/// [`with_parts`](Self::with_parts), while application code usually goes
/// through the process-wide instance in [`global`](crate::global).
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use logr::{CapturedOutput, Level, LogConfig, Registry, SystemClock};
///
/// let output = Arc::new(CapturedOutput::new());
/// let registry = Registry::with_parts(LogConfig::default(), output.clone(), Arc::new(SystemClock));
///
/// struct Worker;
/// let logger = registry.get_for_type::<Worker>();
/// assert!(Arc::ptr_eq(&logger, &registry.get_for_type::<Worker>()));
///
/// registry.set_log_level(Level::Warn);
/// logger.info("dropped", &[]).unwrap();
/// logger.warn("kept", &[]).unwrap();
/// assert_eq!(output.drain().len(), 1);
/// ```
pub struct Registry {
    shared: Arc<Shared>,
    loggers: Mutex<HashMap<ContextKey, Arc<Logger>>>,
}

impl Registry {
    /// Registry writing to the process streams with the default threshold.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LogConfig::default())
    }

    /// Registry writing to the process streams with `config` applied.
    #[must_use]
    pub fn with_config(config: LogConfig) -> Self {
        Self::with_parts(config, Arc::new(StdOutput), Arc::new(SystemClock))
    }

    /// Registry with an explicit output and clock.
    #[must_use]
    pub fn with_parts(config: LogConfig, output: Arc<dyn Output>, clock: Arc<dyn Clock>) -> Self {
        Self {
            shared: Arc::new(Shared {
                threshold: AtomicU8::new(config.level.rank()),
                output,
                clock,
            }),
            loggers: Mutex::new(HashMap::new()),
        }
    }

    /// The anonymous logger, printed with context `-`.
    pub fn get(&self) -> Arc<Logger> {
        self.get_key(ContextKey::Anonymous)
    }

    /// Logger for the type of `value`.
    ///
    /// Equivalent to [`get_for_type::<T>()`](Self::get_for_type); the value
    /// itself is not inspected.
    pub fn get_for<T: ?Sized + 'static>(&self, value: &T) -> Arc<Logger> {
        let _ = value;
        self.get_for_type::<T>()
    }

    /// Logger for the type of an optional value.
    ///
    /// An absent value is an error, not a request for the anonymous logger;
    /// use [`get`](Self::get) for that.
    pub fn try_get_for<T: ?Sized + 'static>(
        &self,
        value: Option<&T>,
    ) -> Result<Arc<Logger>, MissingContextError> {
        value
            .map(|value| self.get_for(value))
            .ok_or(MissingContextError)
    }

    /// Logger for the type `T`.
    pub fn get_for_type<T: ?Sized + 'static>(&self) -> Arc<Logger> {
        self.get_key(ContextKey::of::<T>())
    }

    /// Logger for an explicit context name.
    pub fn get_named(&self, name: impl Into<String>) -> Arc<Logger> {
        self.get_key(ContextKey::named(name))
    }

    /// Returns the logger for `key`, creating it on first use.
    ///
    /// `None` converts to [`ContextKey::Anonymous`]. Concurrent first requests
    /// for the same key all receive the one instance that was created.
    pub fn get_key(&self, key: impl Into<ContextKey>) -> Arc<Logger> {
        let mut loggers = self.loggers.lock().unwrap_or_else(PoisonError::into_inner);
        let logger = loggers.entry(key.into()).or_insert_with_key(|key| {
            Arc::new(Logger::new(key.label().into_owned(), Arc::clone(&self.shared)))
        });
        Arc::clone(logger)
    }

    /// Reports whether a logger for `key` has been created.
    pub fn contains(&self, key: &ContextKey) -> bool {
        self.loggers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    /// Number of loggers created so far.
    pub fn len(&self) -> usize {
        self.loggers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Reports whether no logger has been created yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces the threshold for every logger of this registry, including
    /// loggers handed out earlier.
    pub fn set_log_level(&self, level: Level) {
        self.shared.set_threshold(level);
    }

    /// Current threshold.
    pub fn log_level(&self) -> Level {
        self.shared.threshold()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("log_level", &self.log_level())
            .field("loggers", &self.len())
            .finish_non_exhaustive()
    }
}
