//! # Listener Registration
//!
//! A [`Listener`] is a plain data record: a callback, a priority and an
//! identity. It is a cheap handle (`Arc` inside), so the same listener can be
//! registered under several categories and removed again later by passing the
//! handle back.
//!
//! # Identity
//!
//! Every constructed listener receives a process-unique [`ListenerId`].
//! Clones share it; two listeners built from the same closure do not. Equality
//! and hashing use the identity only.
//!
//! # Priority
//!
//! Higher priorities run first. The priority lives in the shared record, so
//! updating it through one handle (or through a registration that supplies a
//! priority) is visible everywhere the listener is registered.

use crate::{
    error::{BoxError, BuildError, DispatchError},
    handler::Handler,
    response::IntoOutcome,
};
use std::{
    borrow::Cow,
    fmt,
    hash::{Hash, Hasher},
    sync::{
        Arc,
        atomic::{AtomicI32, AtomicU64, Ordering},
    },
};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw identifier.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type Callback<E> = dyn Fn(&E) -> Result<(), BoxError> + Send + Sync;

struct Inner<E> {
    id: ListenerId,
    name: Option<Cow<'static, str>>,
    priority: AtomicI32,
    callback: Box<Callback<E>>,
}

/// A callable unit registered with a dispatcher.
///
/// # Example
///
/// ```rust
/// use herald_core::Listener;
///
/// let greet = Listener::<String>::with_priority(|name: &String| println!("hello {name}"), 10);
/// assert_eq!(greet.priority(), 10);
///
/// let same = greet.clone();
/// assert_eq!(greet, same);
/// assert_ne!(greet, Listener::new(|_: &String| ()));
/// ```
pub struct Listener<E> {
    inner: Arc<Inner<E>>,
}

impl<E: 'static> Listener<E> {
    /// Create a listener with the default priority (0).
    pub fn new<F, R>(callback: F) -> Self
    where
        F: Fn(&E) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        Self::with_priority(callback, 0)
    }

    /// Create a listener with an explicit priority.
    pub fn with_priority<F, R>(callback: F, priority: i32) -> Self
    where
        F: Fn(&E) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        Self::from_parts(boxed_callback(callback), priority, None)
    }

    /// Create a named listener with the default priority.
    ///
    /// The name shows up in `Debug` output, logs and dispatch errors.
    pub fn named<F, R>(name: impl Into<Cow<'static, str>>, callback: F) -> Self
    where
        F: Fn(&E) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        Self::from_parts(boxed_callback(callback), 0, Some(name.into()))
    }

    /// Create a listener from a [`Handler`] implementation.
    pub fn from_handler<H: Handler<E>>(handler: H) -> Self {
        Self::from_parts(boxed_handler(handler), 0, None)
    }

    /// Create a named listener from a [`Handler`] implementation.
    pub fn named_handler<H: Handler<E>>(name: impl Into<Cow<'static, str>>, handler: H) -> Self {
        Self::from_parts(boxed_handler(handler), 0, Some(name.into()))
    }

    /// Start building a listener step by step.
    pub fn builder() -> ListenerBuilder<E> {
        ListenerBuilder::new()
    }

    fn from_parts(
        callback: Box<Callback<E>>,
        priority: i32,
        name: Option<Cow<'static, str>>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                id: ListenerId::next(),
                name,
                priority: AtomicI32::new(priority),
                callback,
            }),
        }
    }
}

impl<E> Listener<E> {
    /// The identity used for duplicate detection and removal.
    pub fn id(&self) -> ListenerId {
        self.inner.id
    }

    /// The optional human readable name.
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// Current priority. Higher runs first.
    pub fn priority(&self) -> i32 {
        self.inner.priority.load(Ordering::Acquire)
    }

    /// Overwrite the priority. Last write wins.
    pub fn set_priority(&self, priority: i32) {
        self.inner.priority.store(priority, Ordering::Release);
    }

    /// Run the callback against an event.
    pub fn invoke(&self, event: &E) -> Result<(), BoxError> {
        (self.inner.callback)(event)
    }

    /// Run the callback and attach this listener's identity to a failure.
    pub fn invoke_tracked(&self, event: &E) -> Result<(), DispatchError> {
        self.invoke(event).map_err(|source| DispatchError::Listener {
            id: self.id(),
            name: self.inner.name.clone(),
            source,
        })
    }
}

impl<E> Clone for Listener<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> PartialEq for Listener<E> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl<E> Eq for Listener<E> {}

impl<E> Hash for Listener<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl<E> fmt::Debug for Listener<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("priority", &self.priority())
            .finish_non_exhaustive()
    }
}

fn boxed_callback<E, F, R>(callback: F) -> Box<Callback<E>>
where
    E: 'static,
    F: Fn(&E) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    Box::new(move |event: &E| callback(event).into_outcome())
}

fn boxed_handler<E: 'static, H: Handler<E>>(handler: H) -> Box<Callback<E>> {
    Box::new(move |event: &E| handler.handle(event))
}

// ============================================================================
// ListenerBuilder
// ============================================================================

/// Builder for a [`Listener`].
///
/// The callback is the only required part; [`build`](Self::build) fails with
/// [`BuildError::MissingCallback`] when it was never supplied.
///
/// # Example
/// ```rust
/// use herald_core::{BuildError, Listener};
///
/// let audit = Listener::<u32>::builder()
///     .name("audit")
///     .priority(-5)
///     .callback(|n: &u32| println!("saw {n}"))
///     .build()
///     .unwrap();
/// assert_eq!(audit.name(), Some("audit"));
///
/// let missing = Listener::<u32>::builder().priority(1).build();
/// assert_eq!(missing.unwrap_err(), BuildError::MissingCallback);
/// ```
pub struct ListenerBuilder<E> {
    callback: Option<Box<Callback<E>>>,
    priority: i32,
    name: Option<Cow<'static, str>>,
}

impl<E: 'static> ListenerBuilder<E> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            callback: None,
            priority: 0,
            name: None,
        }
    }

    /// Use a closure as the callback.
    pub fn callback<F, R>(mut self, callback: F) -> Self
    where
        F: Fn(&E) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        self.callback = Some(boxed_callback(callback));
        self
    }

    /// Use a [`Handler`] as the callback.
    pub fn handler<H: Handler<E>>(mut self, handler: H) -> Self {
        self.callback = Some(boxed_handler(handler));
        self
    }

    /// Set priority.
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set name.
    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Build the listener.
    pub fn build(self) -> Result<Listener<E>, BuildError> {
        let callback = self.callback.ok_or(BuildError::MissingCallback)?;
        Ok(Listener::from_parts(callback, self.priority, self.name))
    }
}

impl<E: 'static> Default for ListenerBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        collections::HashSet,
        sync::atomic::{AtomicUsize, Ordering},
    };

    #[test]
    fn test_default_priority_is_zero() {
        let listener = Listener::new(|_: &u8| ());
        assert_eq!(listener.priority(), 0);
    }

    #[test]
    fn test_identity_is_shared_by_clones() {
        let a = Listener::new(|_: &u8| ());
        let b = Listener::new(|_: &u8| ());
        let a2 = a.clone();

        assert_eq!(a, a2);
        assert_eq!(a.id(), a2.id());
        assert_ne!(a, b);

        let set: HashSet<_> = [a.clone(), a2, b].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_priority_is_shared_by_clones() {
        let a = Listener::with_priority(|_: &u8| (), 3);
        let a2 = a.clone();
        a2.set_priority(-7);
        assert_eq!(a.priority(), -7);
    }

    #[test]
    fn test_invoke_runs_callback() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let listener = Listener::new(move |n: &usize| {
            counter.fetch_add(*n, Ordering::SeqCst);
        });

        listener.invoke(&2).unwrap();
        listener.invoke(&3).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_invoke_tracked_attaches_identity() {
        let listener = Listener::named("strict", |n: &i32| {
            if *n < 0 {
                Err(format!("negative: {n}"))
            } else {
                Ok(())
            }
        });

        assert!(listener.invoke_tracked(&1).is_ok());

        let err = listener.invoke_tracked(&-1).unwrap_err();
        assert_eq!(err.listener_id(), listener.id());
        assert_eq!(err.listener_name(), Some("strict"));
        assert_eq!(err.into_source().to_string(), "negative: -1");
    }

    struct Threshold(u32);

    impl Handler<u32> for Threshold {
        fn handle(&self, event: &u32) -> Result<(), BoxError> {
            if *event > self.0 {
                return Err("over threshold".into());
            }
            Ok(())
        }
    }

    #[test]
    fn test_from_handler() {
        let listener = Listener::from_handler(Threshold(10));
        assert!(listener.invoke(&5).is_ok());
        assert!(listener.invoke(&50).is_err());
    }

    #[test]
    fn test_builder_requires_callback() {
        let result = ListenerBuilder::<u32>::new().name("orphan").build();
        assert_eq!(result.unwrap_err(), BuildError::MissingCallback);
    }

    #[test]
    fn test_builder_with_handler() {
        let listener = Listener::<u32>::builder()
            .handler(Threshold(1))
            .priority(4)
            .name("threshold")
            .build()
            .unwrap();

        assert_eq!(listener.priority(), 4);
        assert_eq!(listener.name(), Some("threshold"));
        assert!(listener.invoke(&2).is_err());
    }

    #[test]
    fn test_debug_output() {
        let listener = Listener::named("audit", |_: &u8| ());
        let rendered = format!("{listener:?}");
        assert!(rendered.starts_with("Listener { id: ListenerId("));
        assert!(rendered.contains("name: Some(\"audit\")"));
        assert!(rendered.contains("priority: 0"));
    }
}
