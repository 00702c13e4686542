//! crates/logr/src/tracing_bridge.rs
//! Forwards `tracing` events into logr loggers.
//!
//! [`LogrLayer`] is a `tracing-subscriber` layer. Each event is written by the
//! logger named after the last `::` segment of its target, so an event with
//! target `app::db` prints `[db]`. `ERROR`, `WARN` and `INFO` keep their level.
//! `DEBUG` and `TRACE` have no logr counterpart and are dropped.
//!
//! ```rust,ignore
//! logr::init_tracing()?;
//! tracing::warn!(target: "app::db", retries = 3, "connection reset");
//! // [WARN][..][db] connection reset retries=3
//! ```

use std::fmt::{self, Write as _};

use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

use crate::global::global;
use crate::level::Level;
use crate::registry::Registry;

/// A tracing layer that writes events through a [`Registry`].
#[derive(Debug)]
pub struct LogrLayer {
    registry: &'static Registry,
}

impl LogrLayer {
    /// Layer writing through `registry`.
    #[must_use]
    pub const fn new(registry: &'static Registry) -> Self {
        Self { registry }
    }

    /// Layer writing through the process-wide registry.
    #[must_use]
    pub fn global() -> Self {
        Self::new(global())
    }

    fn target_to_context(target: &str) -> &str {
        target.rsplit_once("::").map_or(target, |(_, last)| last)
    }

    const fn map_level(level: &tracing::Level) -> Option<Level> {
        match *level {
            tracing::Level::ERROR => Some(Level::Error),
            tracing::Level::WARN => Some(Level::Warn),
            tracing::Level::INFO => Some(Level::Info),
            _ => None,
        }
    }
}

impl<S> Layer<S> for LogrLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let Some(level) = Self::map_level(metadata.level()) else {
            return;
        };
        let logger = self
            .registry
            .get_named(Self::target_to_context(metadata.target()));
        if !logger.is_enabled(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        logger.log_args(level, format_args!("{}", visitor.finish()));
    }
}

/// Collects the `message` field and appends the rest as `name=value`.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }

    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{name}={value}");
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.push_field(field.name(), format_args!("{value}"));
        }
    }
}

/// Installs a subscriber that forwards events to the process-wide registry.
///
/// # Errors
///
/// Fails when a global `tracing` subscriber is already set.
pub fn init_tracing() -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(LogrLayer::global())
        .try_init()
}

/// Like [`init_tracing`], with `filter` applied ahead of the logr layer.
///
/// ```rust,ignore
/// use tracing_subscriber::EnvFilter;
///
/// logr::init_tracing_with_filter(EnvFilter::new("app=info,hyper=warn"))?;
/// ```
///
/// # Errors
///
/// Fails when a global `tracing` subscriber is already set.
pub fn init_tracing_with_filter<F>(filter: F) -> Result<(), TryInitError>
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(LogrLayer::global())
        .try_init()
}
