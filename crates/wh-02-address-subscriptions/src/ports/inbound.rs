//! # Inbound Port - SubscriptionApi
//!
//! Driving port used by request handlers (subscribe, unsubscribe) and by the
//! transport on client disconnect.

use shared_types::{Address, SessionId};

use crate::error::RegistryError;

/// Per-address subscription management.
///
/// Unknown addresses and sessions are no-ops, never errors. Errors only
/// come from the wallet-event collaborator refusing an attach or detach.
pub trait SubscriptionApi: Send + Sync {
    /// Subscribe `session` to transactions paying to `address`.
    fn subscribe(&self, address: &Address, session: SessionId) -> Result<(), RegistryError>;

    /// Remove `session` from `address`.
    fn unsubscribe(&self, address: &Address, session: SessionId) -> Result<(), RegistryError>;

    /// Remove `session` from every address it is subscribed to.
    fn drop_session(&self, session: SessionId) -> Result<(), RegistryError>;

    /// Snapshot of the sessions subscribed to `address`.
    fn subscribers(&self, address: &Address) -> Vec<SessionId>;
}
