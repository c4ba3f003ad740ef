//! Outbound (Driven) ports for the Address Subscriptions subsystem.
//!
//! The registry needs two collaborators: a wallet-event source that can
//! register and release per-address listeners, and a session transport
//! that hands notifications to connected clients.

use std::sync::Arc;

use shared_bus::ReceivedTransaction;
use shared_types::{Address, BlockHash, SessionId};

use crate::domain::ListenerHandle;
use crate::domain::WalletNotification;
use crate::error::{DeliveryError, ListenerError};

/// Invoked with the watched address and the transaction that paid to it.
pub type AddressCallback = Arc<dyn Fn(&Address, &ReceivedTransaction) + Send + Sync>;

/// Invoked with the height and hash of every new best block.
pub type BlockCallback = Arc<dyn Fn(u64, &BlockHash) + Send + Sync>;

/// Wallet-event collaborator.
///
/// Attaching subscribes to future events only. Callbacks may run on any
/// thread, concurrently with registry operations.
pub trait AddressEventSource: Send + Sync {
    /// Start invoking `callback` for transactions paying to `address`.
    ///
    /// Once this returns, no later event for `address` is missed.
    fn attach_address_listener(
        &self,
        address: &Address,
        callback: AddressCallback,
    ) -> Result<ListenerHandle, ListenerError>;

    /// Stop the address listener behind `handle`. Once this returns, the
    /// callback is not invoked for any further event, buffered or not. A
    /// call already running may finish.
    fn detach_address_listener(&self, handle: &ListenerHandle) -> Result<(), ListenerError>;

    /// Start invoking `callback` on every new best block.
    fn attach_best_block_listener(
        &self,
        callback: BlockCallback,
    ) -> Result<ListenerHandle, ListenerError>;

    /// Stop the best-block listener behind `handle`, with the same guarantee
    /// as [`detach_address_listener`](Self::detach_address_listener).
    fn detach_best_block_listener(&self, handle: &ListenerHandle) -> Result<(), ListenerError>;
}

/// Delivers notifications to connected client sessions.
///
/// Both methods must return without waiting on a slow client.
pub trait SessionTransport: Send + Sync {
    /// Queue `notification` for one session.
    fn deliver(
        &self,
        session: SessionId,
        notification: &WalletNotification,
    ) -> Result<(), DeliveryError>;

    /// Queue `notification` for every connected session. Returns how many
    /// sessions accepted it.
    fn broadcast(&self, notification: &WalletNotification) -> usize;
}
