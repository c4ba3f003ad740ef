//! Per-address listener slot.
//!
//! A slot exists exactly while its address is watched: it is created with
//! its first subscriber and a live handle, and the registry removes it as
//! soon as the subscriber set empties and the handle is released.

use std::collections::BTreeSet;
use std::fmt;

use shared_types::SessionId;

/// Opaque registration token returned by the wallet-event collaborator.
///
/// Not `Copy`: a handle must be released exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

impl ListenerHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// Subscribers of one watched address and the handle forwarding its events.
#[derive(Debug)]
pub struct ListenerSlot {
    handle: ListenerHandle,
    subscribers: BTreeSet<SessionId>,
}

impl ListenerSlot {
    /// A freshly watched address always has one subscriber.
    pub fn new(handle: ListenerHandle, first: SessionId) -> Self {
        let mut subscribers = BTreeSet::new();
        subscribers.insert(first);
        Self {
            handle,
            subscribers,
        }
    }

    pub fn handle(&self) -> &ListenerHandle {
        &self.handle
    }

    /// Add a session. Returns false if it was already subscribed.
    pub fn insert(&mut self, session: SessionId) -> bool {
        self.subscribers.insert(session)
    }

    /// Remove a session. Returns false if it was not subscribed.
    pub fn remove(&mut self, session: &SessionId) -> bool {
        self.subscribers.remove(session)
    }

    pub fn contains(&self, session: &SessionId) -> bool {
        self.subscribers.contains(session)
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Copy of the subscriber set, in session id order.
    pub fn sessions(&self) -> Vec<SessionId> {
        self.subscribers.iter().copied().collect()
    }
}
