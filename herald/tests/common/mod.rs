#![allow(dead_code)]

use herald::{Event, Propagation};

// ============================================================================
// Test Event Types
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccountKind {
    Opened,
    Closed,
    Frozen,
}

#[derive(Debug)]
pub struct AccountEvent {
    pub kind: AccountKind,
    pub owner: String,
    propagation: Propagation,
}

impl AccountEvent {
    pub fn new(kind: AccountKind, owner: impl Into<String>) -> Self {
        Self {
            kind,
            owner: owner.into(),
            propagation: Propagation::new(),
        }
    }

    pub fn opened(owner: impl Into<String>) -> Self {
        Self::new(AccountKind::Opened, owner)
    }

    pub fn closed(owner: impl Into<String>) -> Self {
        Self::new(AccountKind::Closed, owner)
    }
}

impl Event for AccountEvent {
    type Category = AccountKind;

    fn category(&self) -> AccountKind {
        self.kind
    }

    fn propagation(&self) -> &Propagation {
        &self.propagation
    }
}
