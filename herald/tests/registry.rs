mod common;

use common::{AccountEvent, AccountKind};
use herald::{Dispatcher, Listener, ListenerBuilder};

fn noop() -> Listener<AccountEvent> {
    Listener::new(|_: &AccountEvent| ())
}

/// A dispatcher with three listeners under `Opened` and two under `Closed`.
fn populated() -> (Dispatcher<AccountEvent>, Vec<Listener<AccountEvent>>) {
    let dispatcher = Dispatcher::new();
    let listeners: Vec<_> = (0..5).map(|_| noop()).collect();

    dispatcher
        .add_listener_with_priority(AccountKind::Opened, &listeners[0], 3)
        .add_listener_with_priority(AccountKind::Opened, &listeners[1], -1)
        .add_listener_with_priority(AccountKind::Opened, &listeners[2], 7)
        .add_listener_with_priority(AccountKind::Closed, &listeners[3], 5)
        .add_listener_with_priority(AccountKind::Closed, &listeners[4], 0);

    (dispatcher, listeners)
}

fn priorities(listeners: &[Listener<AccountEvent>]) -> Vec<i32> {
    listeners.iter().map(Listener::priority).collect()
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_all_listeners_merges_categories_by_priority() {
    let (dispatcher, _) = populated();

    let all = dispatcher.all_listeners();
    assert_eq!(all.len(), 5);
    assert_eq!(priorities(&all), vec![7, 5, 3, 0, -1]);
}

#[test]
fn test_listeners_for_one_category() {
    let (dispatcher, listeners) = populated();

    let opened = dispatcher.listeners(&AccountKind::Opened);
    assert_eq!(
        opened,
        vec![
            listeners[2].clone(),
            listeners[0].clone(),
            listeners[1].clone()
        ]
    );

    let closed = dispatcher.listeners(&AccountKind::Closed);
    assert_eq!(closed, vec![listeners[3].clone(), listeners[4].clone()]);
}

#[test]
fn test_unknown_category_is_empty() {
    let (dispatcher, _) = populated();
    assert!(dispatcher.listeners(&AccountKind::Frozen).is_empty());
}

#[test]
fn test_empty_dispatcher() {
    let dispatcher: Dispatcher<AccountEvent> = Dispatcher::default();
    assert!(dispatcher.is_empty());
    assert!(dispatcher.all_listeners().is_empty());
    assert!(dispatcher.categories().is_empty());
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_add_listener_appends() {
    let (dispatcher, _) = populated();
    let extra = noop();

    dispatcher.add_listener(AccountKind::Frozen, &extra);

    assert!(dispatcher.contains(&AccountKind::Frozen, &extra));
    assert_eq!(dispatcher.listeners(&AccountKind::Frozen), vec![extra]);
    assert_eq!(dispatcher.len(), 6);
}

#[test]
fn test_add_listener_keeps_existing_priority() {
    let dispatcher: Dispatcher<AccountEvent> = Dispatcher::new();
    let listener = Listener::with_priority(|_: &AccountEvent| (), 42);

    dispatcher.add_listener(AccountKind::Opened, &listener);
    assert_eq!(listener.priority(), 42);
}

#[test]
fn test_duplicate_registration_is_ignored() {
    let dispatcher: Dispatcher<AccountEvent> = Dispatcher::new();
    let listener = noop();

    dispatcher
        .add_listener_with_priority(AccountKind::Opened, &listener, 4)
        .add_listener_with_priority(AccountKind::Opened, &listener, 9)
        .add_listener(AccountKind::Opened, &listener);

    assert_eq!(dispatcher.listeners(&AccountKind::Opened).len(), 1);
    assert_eq!(listener.priority(), 4);
}

#[test]
fn test_priority_is_shared_across_categories() {
    let dispatcher: Dispatcher<AccountEvent> = Dispatcher::new();
    let shared = noop();
    let other = Listener::with_priority(|_: &AccountEvent| (), 5);

    dispatcher
        .add_listener_with_priority(AccountKind::Opened, &shared, 1)
        .add_listener(AccountKind::Opened, &other)
        .add_listener_with_priority(AccountKind::Closed, &shared, 10);

    // The second registration moved `shared` ahead of `other` in both places.
    assert_eq!(
        dispatcher.listeners(&AccountKind::Opened),
        vec![shared.clone(), other]
    );
    assert_eq!(shared.priority(), 10);
}

#[test]
fn test_listener_from_builder() {
    let dispatcher: Dispatcher<AccountEvent> = Dispatcher::new();
    let listener = ListenerBuilder::new()
        .callback(|_: &AccountEvent| ())
        .name("audit")
        .priority(3)
        .build()
        .unwrap();

    dispatcher.add_listener(AccountKind::Closed, &listener);

    let found = dispatcher.listeners(&AccountKind::Closed);
    assert_eq!(found[0].name(), Some("audit"));
    assert_eq!(found[0].priority(), 3);
}

#[test]
fn test_builder_without_callback_fails() {
    let result = ListenerBuilder::<AccountEvent>::new().priority(1).build();
    assert_eq!(result.unwrap_err(), herald::BuildError::MissingCallback);
}

// ============================================================================
// Removal
// ============================================================================

#[test]
fn test_remove_listener() {
    let (dispatcher, listeners) = populated();

    dispatcher.remove_listener(&AccountKind::Opened, &listeners[0]);

    assert!(!dispatcher.contains(&AccountKind::Opened, &listeners[0]));
    assert_eq!(dispatcher.listeners(&AccountKind::Opened).len(), 2);
    assert_eq!(dispatcher.all_listeners().len(), 4);
}

#[test]
fn test_remove_only_affects_given_category() {
    let dispatcher: Dispatcher<AccountEvent> = Dispatcher::new();
    let listener = noop();

    dispatcher
        .add_listener(AccountKind::Opened, &listener)
        .add_listener(AccountKind::Closed, &listener)
        .remove_listener(&AccountKind::Opened, &listener);

    assert!(dispatcher.contains(&AccountKind::Closed, &listener));
    assert!(!dispatcher.contains(&AccountKind::Opened, &listener));
}

#[test]
fn test_remove_unknown_is_noop() {
    let (dispatcher, listeners) = populated();

    dispatcher
        .remove_listener(&AccountKind::Frozen, &listeners[0])
        .remove_listener(&AccountKind::Closed, &noop());

    assert_eq!(dispatcher.len(), 5);
}

#[test]
fn test_removing_last_listener_drops_category() {
    let (dispatcher, listeners) = populated();

    dispatcher
        .remove_listener(&AccountKind::Closed, &listeners[3])
        .remove_listener(&AccountKind::Closed, &listeners[4]);

    assert_eq!(dispatcher.categories(), vec![AccountKind::Opened]);
    assert!(dispatcher.listeners(&AccountKind::Closed).is_empty());
}

#[test]
fn test_clone_handle_removes_original() {
    let dispatcher: Dispatcher<AccountEvent> = Dispatcher::new();
    let listener = noop();
    let handle = listener.clone();

    dispatcher.add_listener(AccountKind::Opened, &listener);
    dispatcher.remove_listener(&AccountKind::Opened, &handle);

    assert!(dispatcher.is_empty());
}
