//! Filter listener for conditional event processing.

use herald_core::{BoxError, Handler, Listener};

/// A handler that only forwards events matching a predicate.
///
/// Events that fail the predicate are skipped silently; they do not stop
/// propagation.
pub struct FilterHandler<F, E> {
    predicate: F,
    inner: Listener<E>,
}

impl<F, E> FilterHandler<F, E> {
    /// Create a new filter handler around an existing listener.
    pub fn new(predicate: F, inner: Listener<E>) -> Self {
        Self { predicate, inner }
    }
}

impl<F, E> Handler<E> for FilterHandler<F, E>
where
    E: 'static,
    F: Fn(&E) -> bool + Send + Sync + 'static,
{
    fn handle(&self, event: &E) -> Result<(), BoxError> {
        if (self.predicate)(event) {
            self.inner.invoke(event)
        } else {
            Ok(())
        }
    }
}

/// Wrap `inner` so it only runs for events matching `predicate`.
///
/// The returned listener has its own identity and starts with the priority
/// `inner` has at this moment.
///
/// # Example
///
/// ```rust,ignore
/// let large_orders = filter(|order: &OrderPlaced| order.total > 1_000, notify_sales);
/// dispatcher.add_listener(Kind::Order, &large_orders);
/// ```
pub fn filter<E, F>(predicate: F, inner: Listener<E>) -> Listener<E>
where
    E: 'static,
    F: Fn(&E) -> bool + Send + Sync + 'static,
{
    let name = inner.name().map(|name| format!("filter({name})"));
    let priority = inner.priority();
    let handler = FilterHandler::new(predicate, inner);
    let listener = match name {
        Some(name) => Listener::named_handler(name, handler),
        None => Listener::from_handler(handler),
    };
    listener.set_priority(priority);
    listener
}
