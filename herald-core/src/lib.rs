//! # herald-core
//!
//! Core types for the Herald synchronous event dispatcher.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! libraries that define events or listeners without needing the registry
//! implementation in `herald-std`.
//!
//! # Layers
//!
//! ## Event ([`Event`], [`Propagation`])
//!
//! A single occurrence. Payload types embed a [`Propagation`] flag and name
//! their [`Category`], the key listeners are registered under. Any listener
//! may stop propagation; the dispatcher checks the flag before invoking the
//! next listener.
//!
//! ## Listener ([`Listener`], [`Handler`])
//!
//! A data record holding a callback, a priority (higher runs first) and a
//! process-unique identity. Callbacks are closures returning anything that
//! implements [`IntoOutcome`], or types implementing [`Handler`].
//!
//! # Error Types
//!
//! - [`HeraldError`] - Top-level error type
//! - [`DispatchError`] - A listener failed during dispatch
//! - [`BuildError`] - A listener was built without a callback

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod event;
mod handler;
mod listener;
mod response;

// Re-exports
pub use error::{BoxError, BuildError, DispatchError, HeraldError};
pub use event::{Category, Event, Propagation};
pub use handler::Handler;
pub use listener::{Listener, ListenerBuilder, ListenerId};
pub use response::IntoOutcome;
