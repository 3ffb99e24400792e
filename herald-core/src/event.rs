//! # Event Layer
//!
//! The leaf of the Herald architecture: a single occurrence that listeners
//! observe, carrying a "propagation stopped" flag.
//!
//! Concrete payloads compose a [`Propagation`] and implement [`Event`],
//! either by hand or through `#[derive(Event)]` when the `macros` feature of
//! the facade crate is enabled.
//!
//! # State Machine
//!
//! Every event starts `active` and moves to `propagation-stopped` the first
//! time [`Event::stop_propagation`] is called. There is no way back.

use std::{
    fmt::{self, Debug},
    hash::Hash,
    sync::atomic::{AtomicBool, Ordering},
};

/// A key selecting which listeners apply to an event.
///
/// Blanket-implemented for every hashable, debuggable, thread-safe value, so
/// enum tags, `&'static str` names and `TypeId`-like tokens all qualify.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as an event category",
    label = "must be `Eq + Hash + Clone + Debug + Send + Sync + 'static`",
    note = "Categories key the listener table, so they must be hashable and thread-safe."
)]
pub trait Category: Eq + Hash + Clone + Debug + Send + Sync + 'static {}

impl<T> Category for T where T: Eq + Hash + Clone + Debug + Send + Sync + 'static {}

/// The propagation flag embedded in every event.
///
/// Listeners only ever see `&E`, so the flag is atomic: stopping
/// propagation goes through a shared reference.
#[derive(Default)]
pub struct Propagation {
    stopped: AtomicBool,
}

impl Propagation {
    /// Create a flag in the `active` state.
    pub const fn new() -> Self {
        Self {
            stopped: AtomicBool::new(false),
        }
    }

    /// Returns whether further listeners should be skipped.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Stop propagation. Calling this again has no further effect.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }
}

impl Clone for Propagation {
    fn clone(&self) -> Self {
        Self {
            stopped: AtomicBool::new(self.is_stopped()),
        }
    }
}

impl Debug for Propagation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Propagation")
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

/// An occurrence that can be dispatched to listeners.
///
/// # Example
///
/// ```rust
/// use herald_core::{Event, Propagation};
///
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// enum Kind {
///     Login,
///     Logout,
/// }
///
/// struct SessionEvent {
///     kind: Kind,
///     user: String,
///     propagation: Propagation,
/// }
///
/// impl Event for SessionEvent {
///     type Category = Kind;
///
///     fn category(&self) -> Kind {
///         self.kind.clone()
///     }
///
///     fn propagation(&self) -> &Propagation {
///         &self.propagation
///     }
/// }
///
/// let event = SessionEvent {
///     kind: Kind::Login,
///     user: "ada".into(),
///     propagation: Propagation::new(),
/// };
/// assert!(!event.is_propagation_stopped());
/// event.stop_propagation();
/// assert!(event.is_propagation_stopped());
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a Herald `Event`",
    label = "missing `Event` implementation",
    note = "Embed a `Propagation` field and implement `category` and `propagation`, or use `#[derive(Event)]`."
)]
pub trait Event: Send + Sync + 'static {
    /// The key type listeners are registered under.
    type Category: Category;

    /// The category of this particular occurrence.
    fn category(&self) -> Self::Category;

    /// Access the embedded propagation flag.
    fn propagation(&self) -> &Propagation;

    /// Returns whether propagation was already stopped for this event.
    fn is_propagation_stopped(&self) -> bool {
        self.propagation().is_stopped()
    }

    /// Stops the propagation of the event to further listeners.
    ///
    /// The listener calling this still runs to completion; the dispatcher
    /// checks the flag before invoking the next one.
    fn stop_propagation(&self) {
        self.propagation().stop();
    }
}
