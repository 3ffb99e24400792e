//! Procedural macros for Herald.
//!
//! - `#[derive(Event)]` implements `herald::Event` for a struct that carries a
//!   `Propagation` flag.
//! - `#[listener]` turns a function into a handler type with a ready-made
//!   `listener()` constructor.

use proc_macro::TokenStream;

mod event;
mod listener;

/// Derive macro for implementing the `Event` trait.
///
/// # Example
///
/// ```rust,ignore
/// use herald::{Event, Propagation};
///
/// #[derive(Event)]
/// struct UserCreated {
///     id: u64,
///     propagation: Propagation,
/// }
///
/// #[derive(Event)]
/// struct Keyed {
///     #[category]
///     kind: Kind,
///     #[propagation]
///     flag: Propagation,
/// }
/// ```
#[proc_macro_derive(Event, attributes(event, propagation, category))]
pub fn derive_event(input: TokenStream) -> TokenStream {
    event::derive_event_impl(input)
}

/// Turn a function taking `&Event` into a listener type.
///
/// Supported arguments: `priority = <i32>`, `name = "..."` and
/// `filter = <fn(&Event) -> bool>`.
///
/// # Example
///
/// ```rust,ignore
/// #[herald::listener(priority = 10)]
/// fn greet(event: &UserCreated) {
///     println!("welcome, user {}", event.id);
/// }
///
/// dispatcher.add_listener("UserCreated", &greet::listener());
/// ```
#[proc_macro_attribute]
pub fn listener(attr: TokenStream, item: TokenStream) -> TokenStream {
    listener::listener_impl(attr, item)
}
