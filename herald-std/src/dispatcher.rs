//! Listener registry and synchronous dispatcher.
//!
//! A [`Dispatcher`] owns a table from category to the listeners registered
//! under it. Registration, removal and lookup take `&self`; the table sits
//! behind a `parking_lot::RwLock`, and every read copies the listener handles
//! out before the lock is released. Listeners may therefore register, remove
//! or dispatch again from inside a callback without deadlocking. Such changes
//! apply from the next dispatch on.
//!
//! # Ordering
//!
//! Lookups return a snapshot sorted by descending priority. The sort is
//! stable, so listeners with equal priority keep their registration order
//! within a category. Stored order is never touched by reads.

use herald_core::{DispatchError, Event, Listener};
use parking_lot::RwLock;
use std::{cmp::Reverse, collections::HashMap, fmt};

/// A registry of listeners keyed by event category.
///
/// # Example
/// ```
/// use herald_core::{Event, Listener, Propagation};
/// use herald_std::Dispatcher;
///
/// struct Saved {
///     propagation: Propagation,
/// }
///
/// impl Event for Saved {
///     type Category = &'static str;
///     fn category(&self) -> &'static str {
///         "saved"
///     }
///     fn propagation(&self) -> &Propagation {
///         &self.propagation
///     }
/// }
///
/// let audit = Listener::new(|_: &Saved| println!("audit"));
/// let dispatcher = Dispatcher::<Saved>::new();
/// dispatcher.add_listener_with_priority("saved", &audit, 5);
///
/// let event = Saved { propagation: Propagation::new() };
/// let returned = dispatcher.dispatch(&event).unwrap();
/// assert!(std::ptr::eq(returned, &event));
/// ```
pub struct Dispatcher<E: Event> {
    listeners: RwLock<HashMap<E::Category, Vec<Listener<E>>>>,
}

impl<E: Event> Dispatcher<E> {
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(HashMap::new()),
        }
    }

    /// Start a [`DispatcherBuilder`].
    pub fn builder() -> DispatcherBuilder<E> {
        DispatcherBuilder::new()
    }

    /// Register a listener under `category`, keeping its current priority.
    ///
    /// Registering a listener that is already present under the same
    /// category does nothing.
    pub fn add_listener(&self, category: E::Category, listener: &Listener<E>) -> &Self {
        self.insert(category, listener, None);
        self
    }

    /// Register a listener under `category` and overwrite its priority.
    ///
    /// The priority belongs to the listener, so the new value also applies
    /// to every other category it is registered under. A duplicate
    /// registration leaves both the table and the priority untouched.
    pub fn add_listener_with_priority(
        &self,
        category: E::Category,
        listener: &Listener<E>,
        priority: i32,
    ) -> &Self {
        self.insert(category, listener, Some(priority));
        self
    }

    fn insert(&self, category: E::Category, listener: &Listener<E>, priority: Option<i32>) -> bool {
        let mut table = self.listeners.write();
        if table
            .get(&category)
            .is_some_and(|entries| entries.contains(listener))
        {
            return false;
        }

        if let Some(priority) = priority {
            listener.set_priority(priority);
        }

        #[cfg(feature = "tracing")]
        {
            tracing::trace!(
                category = ?category,
                listener = %listener.id(),
                priority = listener.priority(),
                "listener registered"
            );
        }

        table.entry(category).or_default().push(listener.clone());
        true
    }

    /// Remove a listener from `category`.
    ///
    /// Does nothing if either is unknown. When the last listener of a
    /// category goes, the category itself is dropped from the table.
    pub fn remove_listener(&self, category: &E::Category, listener: &Listener<E>) -> &Self {
        self.remove(category, listener);
        self
    }

    fn remove(&self, category: &E::Category, listener: &Listener<E>) -> bool {
        let mut table = self.listeners.write();
        let Some(entries) = table.get_mut(category) else {
            return false;
        };

        let before = entries.len();
        entries.retain(|entry| entry != listener);
        let removed = entries.len() < before;
        if entries.is_empty() {
            table.remove(category);
        }

        #[cfg(feature = "tracing")]
        {
            if removed {
                tracing::trace!(category = ?category, listener = %listener.id(), "listener removed");
            }
        }

        removed
    }

    /// Listeners registered under `category`, highest priority first.
    ///
    /// Returns an empty vector for unknown categories.
    pub fn listeners(&self, category: &E::Category) -> Vec<Listener<E>> {
        let mut snapshot = self
            .listeners
            .read()
            .get(category)
            .cloned()
            .unwrap_or_default();
        sort_by_priority(&mut snapshot);
        snapshot
    }

    /// Every registration across all categories, highest priority first.
    ///
    /// A listener registered under two categories appears twice. Equal
    /// priorities from different categories come out in no particular order.
    pub fn all_listeners(&self) -> Vec<Listener<E>> {
        let mut snapshot: Vec<_> = self
            .listeners
            .read()
            .values()
            .flatten()
            .cloned()
            .collect();
        sort_by_priority(&mut snapshot);
        snapshot
    }

    /// Categories that currently have at least one listener.
    pub fn categories(&self) -> Vec<E::Category> {
        self.listeners.read().keys().cloned().collect()
    }

    /// Whether `listener` is registered under `category`.
    pub fn contains(&self, category: &E::Category, listener: &Listener<E>) -> bool {
        self.listeners
            .read()
            .get(category)
            .is_some_and(|entries| entries.contains(listener))
    }

    /// Total number of registrations across all categories.
    pub fn len(&self) -> usize {
        self.listeners.read().values().map(Vec::len).sum()
    }

    /// Check if no listener is registered at all.
    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }

    /// Drop every registration.
    pub fn clear(&self) {
        self.listeners.write().clear();
    }

    /// Dispatch an event to the listeners of its category.
    ///
    /// Listeners run on the calling thread in priority order. Before each
    /// one the propagation flag is checked; once a listener has stopped
    /// propagation, the rest are skipped. The first listener error aborts
    /// the loop and is returned. On success the very same reference comes
    /// back.
    pub fn dispatch<'a>(&self, event: &'a E) -> Result<&'a E, DispatchError> {
        let category = event.category();
        let listeners = self.listeners(&category);

        #[cfg(feature = "tracing")]
        {
            tracing::trace!(category = ?category, listeners = listeners.len(), "dispatching event");
        }

        for listener in &listeners {
            if event.is_propagation_stopped() {
                #[cfg(feature = "tracing")]
                {
                    tracing::debug!(category = ?category, "propagation stopped");
                }
                break;
            }

            if let Err(err) = listener.invoke_tracked(event) {
                #[cfg(feature = "tracing")]
                {
                    tracing::debug!(category = ?category, listener = %listener.id(), error = %err, "listener failed");
                }
                return Err(err);
            }
        }

        Ok(event)
    }
}

fn sort_by_priority<E>(listeners: &mut [Listener<E>]) {
    // Cached keys: a concurrent `set_priority` must not change a key mid-sort.
    listeners.sort_by_cached_key(|listener| Reverse(listener.priority()));
}

impl<E: Event> Default for Dispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> fmt::Debug for Dispatcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.listeners.read();
        f.debug_struct("Dispatcher")
            .field("categories", &table.len())
            .field("listeners", &table.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}

// ============================================================================
// DispatcherBuilder
// ============================================================================

/// Builder for constructing a [`Dispatcher`].
///
/// Registrations are applied in the order they were added, with the same
/// duplicate and priority rules as [`Dispatcher::add_listener`].
///
/// # Example
/// ```ignore
/// let dispatcher = Dispatcher::builder()
///     .listener(Kind::Login, &audit)
///     .listener_with_priority(Kind::Login, &guard, 100)
///     .build();
/// ```
pub struct DispatcherBuilder<E: Event> {
    entries: Vec<(E::Category, Listener<E>, Option<i32>)>,
}

impl<E: Event> DispatcherBuilder<E> {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a listener, keeping its priority.
    pub fn listener(mut self, category: E::Category, listener: &Listener<E>) -> Self {
        self.entries.push((category, listener.clone(), None));
        self
    }

    /// Register a listener with priority.
    pub fn listener_with_priority(
        mut self,
        category: E::Category,
        listener: &Listener<E>,
        priority: i32,
    ) -> Self {
        self.entries
            .push((category, listener.clone(), Some(priority)));
        self
    }

    /// Build the dispatcher.
    pub fn build(self) -> Dispatcher<E> {
        let dispatcher = Dispatcher::new();
        for (category, listener, priority) in self.entries {
            dispatcher.insert(category, &listener, priority);
        }
        dispatcher
    }

    /// Get the number of queued registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the builder has no registrations.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E: Event> Default for DispatcherBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}
