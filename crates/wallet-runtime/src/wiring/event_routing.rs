//! # Event Routing
//!
//! Connects address listeners to the dispatcher.
//!
//! ```text
//! Event Bus ──► BusEventSource task ──► address sink ──► NotificationPump ──► EventDispatcher
//!  (wallet)      (one per address)      (unbounded)       (one task)          (SessionHub)
//! ```
//!
//! Address listener tasks never touch the registry; they only push into the
//! sink. The pump is the single consumer that fans out.
//!
//! The sink is unbounded so a listener task never waits on the pump. Its
//! depth is exported as `wh_notifications_sink_depth`.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use shared_bus::{InMemoryEventBus, ReceivedTransaction};
use shared_types::{Address, BlockHash};
use wallet_telemetry::{
    ADDRESS_SINK_DEPTH, BLOCKS_BROADCAST, BUS_LAGGED_EVENTS, BUS_WATCHED_ADDRESSES,
    NOTIFICATIONS_DELIVERED, NOTIFICATIONS_DROPPED,
};
use wh_02_address_subscriptions::{AddressCallback, BlockCallback, EventDispatcher};

/// One coins-received event for one watched address.
pub type AddressEvent = (Address, ReceivedTransaction);

/// Build the callback handed to every address listener, and the receiver
/// the pump drains.
pub fn address_sink() -> (AddressCallback, mpsc::UnboundedReceiver<AddressEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let sink: AddressCallback = Arc::new(move |address: &Address, received: &ReceivedTransaction| {
        if tx.send((address.clone(), received.clone())).is_ok() {
            ADDRESS_SINK_DEPTH.inc();
        } else {
            debug!(address = %address, "Notification pump stopped, event discarded");
        }
    });
    (sink, rx)
}

/// Build the process-lifetime best-block callback.
///
/// Runs on the listener task; the broadcast itself never waits on a client.
pub fn best_block_callback(dispatcher: Arc<EventDispatcher>) -> BlockCallback {
    Arc::new(move |height: u64, hash: &BlockHash| {
        let notified = dispatcher.on_new_best_block(height, hash);
        BLOCKS_BROADCAST.inc();
        NOTIFICATIONS_DELIVERED
            .with_label_values(&["newBlock"])
            .inc_by(notified as u64);
    })
}

/// Drains the address sink into the dispatcher.
pub struct NotificationPump {
    events: mpsc::UnboundedReceiver<AddressEvent>,
    dispatcher: Arc<EventDispatcher>,
}

impl NotificationPump {
    pub fn new(
        events: mpsc::UnboundedReceiver<AddressEvent>,
        dispatcher: Arc<EventDispatcher>,
    ) -> Self {
        Self { events, dispatcher }
    }

    /// Run until shutdown is signalled or every sink is dropped.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!("Notification pump started");
        loop {
            tokio::select! {
                event = self.events.recv() => {
                    let Some((address, received)) = event else {
                        warn!("Address sink closed, notification pump exiting");
                        break;
                    };
                    ADDRESS_SINK_DEPTH.dec();
                    self.dispatch(&address, &received);
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Notification pump shutting down");
                        break;
                    }
                }
            }
        }
    }

    fn dispatch(&self, address: &Address, received: &ReceivedTransaction) {
        let report = self.dispatcher.on_wallet_event(address, received);
        NOTIFICATIONS_DELIVERED
            .with_label_values(&["transactionReceived"])
            .inc_by(report.delivered as u64);
        NOTIFICATIONS_DROPPED.inc_by(report.dropped as u64);
    }
}

/// Copy the bus ledger into the bus metrics.
pub fn record_bus_metrics(bus: &InMemoryEventBus) {
    BUS_WATCHED_ADDRESSES.set(bus.watched_addresses() as i64);

    let lagged = bus.lagged_events();
    let recorded = BUS_LAGGED_EVENTS.get();
    if lagged > recorded {
        BUS_LAGGED_EVENTS.inc_by(lagged - recorded);
    }
}

/// Sample the bus ledger every `interval` until shutdown is signalled.
pub async fn run_bus_sampler(
    bus: Arc<InMemoryEventBus>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => record_bus_metrics(&bus),
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    record_bus_metrics(&bus);
                    break;
                }
            }
        }
    }
}
