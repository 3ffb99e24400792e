//! Testing utilities for Herald.
//!
//! This module provides utilities to make testing listeners and dispatch
//! order easier.
//!
//! # Features
//!
//! - [`Signal`]: A minimal event keyed by a `&'static str` category
//! - [`Recorder`]: A shared log plus factories for listeners that write to it
//! - [`IntentionalFailure`]: The error returned by failing test listeners

use herald_core::{Event, Listener, Propagation};
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;

// ============================================================================
// Signal
// ============================================================================

/// A payload-free event whose category is a plain string.
#[derive(Debug, Clone)]
pub struct Signal {
    category: &'static str,
    propagation: Propagation,
}

impl Signal {
    /// Create a new signal in the given category.
    pub fn new(category: &'static str) -> Self {
        Self {
            category,
            propagation: Propagation::new(),
        }
    }
}

impl Event for Signal {
    type Category = &'static str;

    fn category(&self) -> &'static str {
        self.category
    }

    fn propagation(&self) -> &Propagation {
        &self.propagation
    }
}

// ============================================================================
// Recorder
// ============================================================================

/// The error returned by listeners from [`Recorder::failing_listener`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("listener `{label}` failed on purpose")]
pub struct IntentionalFailure {
    /// Label of the failing listener.
    pub label: String,
}

/// A shared log of listener invocations.
///
/// Every listener created through a recorder appends its label when it runs,
/// so the log shows exactly which listeners ran and in which order.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = Recorder::new();
/// dispatcher.add_listener_with_priority("event", &recorder.listener("a"), 1);
/// dispatcher.add_listener("event", &recorder.listener("b"));
///
/// dispatcher.dispatch(&Signal::new("event"))?;
/// assert_eq!(recorder.entries(), vec!["a", "b"]);
/// ```
#[derive(Clone, Default)]
pub struct Recorder {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    /// Create a recorder with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener that records `label` and succeeds.
    pub fn listener<E: 'static>(&self, label: impl Into<String>) -> Listener<E> {
        let label = label.into();
        let entries = Arc::clone(&self.entries);
        Listener::named(label.clone(), move |_: &E| {
            entries.lock().push(label.clone());
        })
    }

    /// A listener that records `label` and then stops propagation.
    pub fn stopping_listener<E: Event>(&self, label: impl Into<String>) -> Listener<E> {
        let label = label.into();
        let entries = Arc::clone(&self.entries);
        Listener::named(label.clone(), move |event: &E| {
            entries.lock().push(label.clone());
            event.stop_propagation();
        })
    }

    /// A listener that records `label` and then fails with [`IntentionalFailure`].
    pub fn failing_listener<E: 'static>(&self, label: impl Into<String>) -> Listener<E> {
        let label = label.into();
        let entries = Arc::clone(&self.entries);
        Listener::named(label.clone(), move |_: &E| {
            entries.lock().push(label.clone());
            Err::<(), _>(IntentionalFailure {
                label: label.clone(),
            })
        })
    }

    /// Get a copy of the log.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    /// Get the number of recorded invocations.
    pub fn count(&self) -> usize {
        self.entries.lock().len()
    }

    /// Clear the log.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
