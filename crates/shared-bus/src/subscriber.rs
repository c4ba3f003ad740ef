//! # Subscriptions
//!
//! Receiving side of the wallet event bus. A [`Subscription`] filters the
//! shared broadcast stream down to the events its owner asked for and keeps
//! the bus's per-address bookkeeping up to date for as long as it lives.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use shared_types::Address;
use thiserror::Error;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::{debug, warn};

use crate::events::{EventFilter, WalletEvent};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    #[error("Event bus closed")]
    Closed,
}

/// Bookkeeping shared by a bus and every subscription it handed out.
#[derive(Debug, Default)]
pub(crate) struct Ledger {
    watchers: Mutex<HashMap<Address, usize>>,
    lagged: AtomicU64,
}

impl Ledger {
    fn opened(&self, filter: &EventFilter) {
        let mut watchers = self.watchers.lock();
        for address in &filter.addresses {
            *watchers.entry(address.clone()).or_insert(0) += 1;
        }
    }

    fn closed(&self, filter: &EventFilter) {
        let mut watchers = self.watchers.lock();
        for address in &filter.addresses {
            if let Some(count) = watchers.get_mut(address) {
                *count -= 1;
                if *count == 0 {
                    watchers.remove(address);
                }
            }
        }
    }

    pub(crate) fn watchers_of(&self, address: &Address) -> usize {
        self.watchers.lock().get(address).copied().unwrap_or(0)
    }

    pub(crate) fn watched_addresses(&self) -> usize {
        self.watchers.lock().len()
    }

    pub(crate) fn lagged_events(&self) -> u64 {
        self.lagged.load(Ordering::Relaxed)
    }
}

/// Filtered view of the bus. Dropping it unsubscribes.
pub struct Subscription {
    receiver: broadcast::Receiver<WalletEvent>,
    filter: EventFilter,
    ledger: Arc<Ledger>,
}

impl Subscription {
    pub(crate) fn open(
        receiver: broadcast::Receiver<WalletEvent>,
        filter: EventFilter,
        ledger: Arc<Ledger>,
    ) -> Self {
        ledger.opened(&filter);
        Self {
            receiver,
            filter,
            ledger,
        }
    }

    fn skipped(&self, count: u64) {
        self.ledger.lagged.fetch_add(count, Ordering::Relaxed);
        warn!(
            skipped = count,
            addresses = self.filter.addresses.len(),
            "Subscriber fell behind, events skipped"
        );
    }

    /// Wait for the next matching event. `None` once the bus is gone.
    ///
    /// Events overwritten before this subscriber read them are counted in
    /// [`InMemoryEventBus::lagged_events`](crate::InMemoryEventBus::lagged_events)
    /// and skipped.
    pub async fn recv(&mut self) -> Option<WalletEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.filter.matches(&event) => return Some(event),
                Ok(_) => {}
                Err(RecvError::Lagged(count)) => self.skipped(count),
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next matching event if one is already buffered.
    pub fn try_recv(&mut self) -> Result<Option<WalletEvent>, SubscriptionError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.filter.matches(&event) => return Ok(Some(event)),
                Ok(_) => {}
                Err(TryRecvError::Lagged(count)) => self.skipped(count),
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Closed) => return Err(SubscriptionError::Closed),
            }
        }
    }

    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.ledger.closed(&self.filter);
        debug!(addresses = self.filter.addresses.len(), "Subscription closed");
    }
}
