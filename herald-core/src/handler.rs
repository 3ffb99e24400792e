//! # Handler
//!
//! The behaviour half of a listener, for types that carry their own state.
//!
//! Closures are the short path (`Listener::new(|event| ...)`). When the
//! reaction needs configuration or collaborators, implement [`Handler`] on a
//! struct and wrap it with `Listener::from_handler`.

use crate::error::BoxError;

/// Reacts to a dispatched event.
///
/// # Example
///
/// ```rust
/// use herald_core::{BoxError, Handler, Listener};
///
/// struct Audit {
///     prefix: &'static str,
/// }
///
/// impl Handler<String> for Audit {
///     fn handle(&self, event: &String) -> Result<(), BoxError> {
///         if event.is_empty() {
///             return Err(format!("{}: empty event", self.prefix).into());
///         }
///         Ok(())
///     }
/// }
///
/// let listener = Listener::from_handler(Audit { prefix: "audit" });
/// assert!(listener.invoke(&"login".to_string()).is_ok());
/// assert!(listener.invoke(&String::new()).is_err());
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle events of type `{E}`",
    label = "missing `Handler<{E}>` implementation",
    note = "Handlers must implement the `handle` method for the event type `{E}`."
)]
pub trait Handler<E>: Send + Sync + 'static {
    /// Executes the handler logic.
    fn handle(&self, event: &E) -> Result<(), BoxError>;
}
