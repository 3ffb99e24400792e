//! # herald - Synchronous In-Process Event Dispatcher
//!
//! `herald` delivers events to listeners registered by category, in priority
//! order, on the calling thread. Any listener may stop propagation, which
//! prevents every later listener from seeing the event.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use herald::prelude::*;
//!
//! #[derive(Debug, Event)]
//! struct UserCreated {
//!     id: u64,
//!     propagation: Propagation,
//! }
//!
//! let dispatcher = Dispatcher::new();
//! dispatcher.add_listener_with_priority(
//!     "UserCreated",
//!     &Listener::new(|e: &UserCreated| println!("welcome {}", e.id)),
//!     10,
//! );
//!
//! dispatcher.dispatch(&UserCreated { id: 7, propagation: Propagation::new() })?;
//! ```
//!
//! ## Crates
//!
//! - `herald-core`: [`Event`], [`Propagation`], [`Listener`], [`Handler`] and errors
//! - `herald-std`: [`Dispatcher`], the [`global`] registry and standard listeners
//! - `herald-macros` (feature `macros`): `#[derive(Event)]` and `#[listener]`

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use herald_core::{
    // Error types
    BoxError,
    BuildError,
    // Event
    Category,
    DispatchError,
    Event,
    // Handler
    Handler,
    HeraldError,
    // Response
    IntoOutcome,
    // Listener
    Listener,
    ListenerBuilder,
    ListenerId,
    Propagation,
};

// Registry
pub use herald_std::{Dispatcher, DispatcherBuilder};

/// Process-wide dispatchers, one per event type.
pub mod global {
    pub use herald_std::global::{destroy, exists, shared};
}

/// Standard listener implementations.
pub mod listeners {
    #![allow(clippy::wildcard_imports)]
    pub use herald_std::listeners::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use herald_std::testing::*;
}

/// Prelude module - common imports for Herald.
///
/// # Usage
///
/// ```rust,ignore
/// use herald::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Errors
        BoxError,
        DispatchError,
        // Registry
        Dispatcher,
        // Core traits
        Event,
        Handler,
        Listener,
        Propagation,
    };

    #[cfg(feature = "macros")]
    pub use crate::listener;
}

#[cfg(feature = "macros")]
pub use herald_macros::{Event, listener};
