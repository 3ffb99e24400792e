//! Error types for Herald.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`HeraldError`] - Top-level error type for all Herald operations
//! - [`DispatchError`] - A listener failed during dispatch
//! - [`BuildError`] - A listener could not be built

use crate::listener::ListenerId;
use std::borrow::Cow;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Herald operations.
#[derive(Error, Debug)]
pub enum HeraldError {
    /// An error occurred during event dispatch.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// A listener could not be built.
    #[error("build error: {0}")]
    Build(#[from] BuildError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors that can occur during event dispatch.
///
/// Herald never recovers from a listener failure: the remaining listeners are
/// skipped and the failure is handed back to the caller of `dispatch`.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A listener returned an error.
    #[error("listener {id} failed")]
    Listener {
        /// Identity of the failing listener.
        id: ListenerId,
        /// Name of the failing listener, if it was given one.
        name: Option<Cow<'static, str>>,
        /// The error returned by the listener.
        #[source]
        source: BoxError,
    },
}

impl DispatchError {
    /// Identity of the listener that caused the failure.
    pub fn listener_id(&self) -> ListenerId {
        match self {
            DispatchError::Listener { id, .. } => *id,
        }
    }

    /// Name of the listener that caused the failure.
    pub fn listener_name(&self) -> Option<&str> {
        match self {
            DispatchError::Listener { name, .. } => name.as_deref(),
        }
    }

    /// Unwrap the error the listener returned.
    pub fn into_source(self) -> BoxError {
        match self {
            DispatchError::Listener { source, .. } => source,
        }
    }
}

/// Errors raised while building a listener.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Neither a closure nor a handler was supplied.
    #[error("no callback was supplied for the listener; pass a closure or a handler")]
    MissingCallback,
}

// Convenience conversions
impl From<BoxError> for HeraldError {
    fn from(err: BoxError) -> Self {
        HeraldError::Custom(err)
    }
}
