//! Logging listener for event observation.

use herald_core::{BoxError, Event, Handler, Listener};
use std::fmt::Debug;

/// A handler that logs every event it sees and never stops propagation.
///
/// Events are reported through `tracing` at debug level when the `tracing`
/// feature is enabled; otherwise the handler does nothing.
///
/// # Example
///
/// ```rust,ignore
/// let audit = LoggingHandler::named("audit").into_listener();
/// dispatcher.add_listener_with_priority(Kind::Login, &audit, i32::MAX);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoggingHandler {
    name: &'static str,
}

impl LoggingHandler {
    /// Create a new `LoggingHandler` with a default name.
    pub fn new() -> Self {
        Self { name: "event" }
    }

    /// Create a new `LoggingHandler` with a custom name.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }

    /// Wrap the handler in a [`Listener`] carrying the same name.
    pub fn into_listener<E: Event + Debug>(self) -> Listener<E> {
        Listener::named_handler(self.name, self)
    }
}

impl Default for LoggingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event + Debug> Handler<E> for LoggingHandler {
    fn handle(&self, event: &E) -> Result<(), BoxError> {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(name = %self.name, category = ?event.category(), ?event, "processing event");
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = (self.name, event); // Suppress unused warnings
        }
        Ok(())
    }
}
