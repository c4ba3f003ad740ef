//! # Event Publisher
//!
//! Sending side of the wallet event bus.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use shared_types::Address;
use tokio::sync::broadcast;
use tracing::{debug, trace};

use crate::events::{EventFilter, WalletEvent};
use crate::subscriber::{Ledger, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;

/// Implemented by whatever feeds wallet events into the hub.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish `event`. Returns how many subscriptions were sent a copy,
    /// before filtering.
    async fn publish(&self, event: WalletEvent) -> usize;

    /// Events published so far, delivered or not.
    fn events_published(&self) -> u64;
}

/// Broadcast-backed bus. Every subscription sees every event and filters
/// locally.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<WalletEvent>,
    ledger: Arc<Ledger>,
    published: AtomicU64,
    capacity: usize,
}

impl InMemoryEventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Bus buffering up to `capacity` events per subscriber. Zero is raised
    /// to one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            ledger: Arc::new(Ledger::default()),
            published: AtomicU64::new(0),
            capacity,
        }
    }

    /// Subscribe to events matching `filter`.
    ///
    /// The receiver is registered before this returns, so every event
    /// published afterwards is observed by the subscription.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(topics = ?filter.topics, addresses = filter.addresses.len(), "Bus subscription opened");
        Subscription::open(self.sender.subscribe(), filter, Arc::clone(&self.ledger))
    }

    /// Live subscriptions of any kind.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Live subscriptions whose filter names `address`.
    #[must_use]
    pub fn watchers_of(&self, address: &Address) -> usize {
        self.ledger.watchers_of(address)
    }

    /// Distinct addresses named by at least one live subscription.
    #[must_use]
    pub fn watched_addresses(&self) -> usize {
        self.ledger.watched_addresses()
    }

    /// Events skipped by subscribers that fell more than `capacity` behind.
    #[must_use]
    pub fn lagged_events(&self) -> u64 {
        self.ledger.lagged_events()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: WalletEvent) -> usize {
        let topic = event.topic();
        self.published.fetch_add(1, Ordering::Relaxed);

        // No receivers is normal before anyone subscribes.
        let receivers = self.sender.send(event).unwrap_or(0);
        if receivers == 0 {
            trace!(topic = ?topic, "Event published with no subscribers");
        } else {
            debug!(topic = ?topic, receivers, "Event published");
        }
        receivers
    }

    fn events_published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventTopic;
    use shared_types::BlockHash;

    fn tip() -> WalletEvent {
        WalletEvent::NewBestBlock {
            height: 1,
            block_hash: BlockHash::zero(),
        }
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_counted() {
        let bus = InMemoryEventBus::new();

        assert_eq!(bus.publish(tip()).await, 0);
        assert_eq!(bus.events_published(), 1);
    }

    #[tokio::test]
    async fn test_publish_reaches_every_subscription_before_filtering() {
        let bus = InMemoryEventBus::new();
        let address = Address::from_payload(0x00, &[9; 20]);

        let _all = bus.subscribe(EventFilter::all());
        let _tips = bus.subscribe(EventFilter::topics(vec![EventTopic::BestBlock]));
        let _coins = bus.subscribe(EventFilter::address(address.clone()));

        assert_eq!(bus.publish(tip()).await, 3);
        assert_eq!(bus.subscriber_count(), 3);
        assert_eq!(bus.watchers_of(&address), 1);
    }

    #[test]
    fn test_capacity_is_at_least_one() {
        assert_eq!(InMemoryEventBus::default().capacity(), DEFAULT_CHANNEL_CAPACITY);
        assert_eq!(InMemoryEventBus::with_capacity(0).capacity(), 1);
    }
}
