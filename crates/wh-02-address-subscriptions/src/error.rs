//! Error types for the Address Subscriptions subsystem

use shared_types::{Address, SessionId};
use thiserror::Error;

use crate::domain::ListenerHandle;

/// Failures reported by the wallet-event collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListenerError {
    #[error("Event source rejected listener for {address}: {reason}")]
    Rejected { address: Address, reason: String },

    #[error("Unknown listener handle: {0}")]
    UnknownHandle(ListenerHandle),

    #[error("Event source unavailable: {0}")]
    Unavailable(String),
}

/// Registry transition failures.
///
/// The registry is left consistent on every error: a failed attach creates
/// no slot and a failed detach keeps the slot with its session and handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Failed to attach listener for {address}: {source}")]
    AttachFailed {
        address: Address,
        #[source]
        source: ListenerError,
    },

    #[error("Failed to detach listener for {address}: {source}")]
    DetachFailed {
        address: Address,
        #[source]
        source: ListenerError,
    },
}

impl RegistryError {
    /// The address whose transition failed.
    pub fn address(&self) -> &Address {
        match self {
            Self::AttachFailed { address, .. } | Self::DetachFailed { address, .. } => address,
        }
    }
}

/// Per-session delivery failures. Never fatal for the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("Session not connected: {0}")]
    SessionNotFound(SessionId),

    #[error("Session queue full: {0}")]
    QueueFull(SessionId),

    #[error("Session channel closed: {0}")]
    Closed(SessionId),
}
