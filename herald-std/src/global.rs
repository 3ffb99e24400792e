//! Process-wide dispatchers.
//!
//! Applications that own their [`Dispatcher`] should pass it around
//! explicitly. This module is the opt-in alternative for code that needs one
//! shared instance per event family without threading it through every call.
//!
//! One dispatcher exists per event type `E`. It is created lazily on first
//! access and lives until [`destroy`] is called for that type; the next
//! access then starts from an empty dispatcher.

use crate::dispatcher::Dispatcher;
use herald_core::Event;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::Arc,
};

type Erased = Arc<dyn Any + Send + Sync>;

static INSTANCES: Lazy<RwLock<HashMap<TypeId, Erased>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// The shared dispatcher for event type `E`.
///
/// Concurrent first calls agree on a single instance: the fast path only
/// takes the read lock, and creation re-checks under the write lock.
///
/// # Example
///
/// ```rust,ignore
/// let dispatcher = herald_std::global::shared::<Signal>();
/// dispatcher.add_listener("boot", &listener);
///
/// // Elsewhere, same instance:
/// herald_std::global::shared::<Signal>().dispatch(&Signal::new("boot"))?;
/// ```
pub fn shared<E: Event>() -> Arc<Dispatcher<E>> {
    let key = TypeId::of::<E>();

    if let Some(existing) = INSTANCES.read().get(&key).and_then(downcast::<E>) {
        return existing;
    }

    let mut table = INSTANCES.write();
    if let Some(existing) = table.get(&key).and_then(downcast::<E>) {
        return existing;
    }

    #[cfg(feature = "tracing")]
    {
        tracing::trace!(event = std::any::type_name::<E>(), "creating shared dispatcher");
    }

    let created = Arc::new(Dispatcher::<E>::new());
    table.insert(key, created.clone());
    created
}

/// Whether a shared dispatcher currently exists for `E`.
pub fn exists<E: Event>() -> bool {
    INSTANCES.read().contains_key(&TypeId::of::<E>())
}

/// Tear down the shared dispatcher for `E`.
///
/// All registrations are dropped, including for callers still holding the
/// old `Arc`. Returns `false` if there was nothing to destroy.
pub fn destroy<E: Event>() -> bool {
    let removed = INSTANCES.write().remove(&TypeId::of::<E>());
    let Some(erased) = removed else {
        return false;
    };

    if let Some(dispatcher) = downcast::<E>(&erased) {
        dispatcher.clear();
    }

    #[cfg(feature = "tracing")]
    {
        tracing::trace!(event = std::any::type_name::<E>(), "shared dispatcher destroyed");
    }

    true
}

fn downcast<E: Event>(erased: &Erased) -> Option<Arc<Dispatcher<E>>> {
    Arc::clone(erased).downcast::<Dispatcher<E>>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::{Listener, Propagation};
    use std::{sync::Barrier, thread};

    // Each test uses its own event type so tests can run in parallel.
    macro_rules! test_event {
        ($name:ident) => {
            struct $name {
                propagation: Propagation,
            }

            impl Event for $name {
                type Category = ();

                fn category(&self) -> Self::Category {}

                fn propagation(&self) -> &Propagation {
                    &self.propagation
                }
            }
        };
    }

    test_event!(Lazily);
    test_event!(Destroyed);
    test_event!(Contended);
    test_event!(Stale);

    #[test]
    fn test_shared_is_lazy_and_stable() {
        assert!(!exists::<Lazily>());

        let first = shared::<Lazily>();
        assert!(exists::<Lazily>());

        let second = shared::<Lazily>();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_destroy_resets() {
        let dispatcher = shared::<Destroyed>();
        dispatcher.add_listener((), &Listener::new(|_: &Destroyed| ()));
        assert_eq!(shared::<Destroyed>().all_listeners().len(), 1);

        assert!(destroy::<Destroyed>());
        assert!(!exists::<Destroyed>());
        assert!(!destroy::<Destroyed>());

        let fresh = shared::<Destroyed>();
        assert!(fresh.all_listeners().is_empty());
        assert!(!Arc::ptr_eq(&dispatcher, &fresh));
    }

    #[test]
    fn test_destroy_clears_outstanding_handles() {
        let stale = shared::<Stale>();
        stale.add_listener((), &Listener::new(|_: &Stale| ()));

        destroy::<Stale>();
        assert!(stale.is_empty());
    }

    #[test]
    fn test_concurrent_first_access_yields_one_instance() {
        const THREADS: usize = 8;
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    shared::<Contended>()
                })
            })
            .collect();

        let instances: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for instance in &instances[1..] {
            assert!(Arc::ptr_eq(&instances[0], instance));
        }
    }
}
