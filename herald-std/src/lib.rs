//! # herald-std
//!
//! Standard implementations for the Herald synchronous event dispatcher.
//!
//! This crate provides:
//! - **Registry**: [`Dispatcher`] and [`DispatcherBuilder`]
//! - **Shared instances**: the [`global`] module
//! - **Standard listeners**: Logging, Filter
//! - **Testing utilities**: [`testing::Recorder`], [`testing::Signal`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use herald_core;

// Modules
pub mod dispatcher;
pub mod global;
pub mod listeners;
pub mod testing;

pub use dispatcher::{Dispatcher, DispatcherBuilder};
