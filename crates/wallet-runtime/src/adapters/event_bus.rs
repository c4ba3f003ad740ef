//! # Event Bus Adapter
//!
//! Implements the wallet-event port of the subscription subsystem on top of
//! the in-process event bus.
//!
//! Each attached listener owns one bus subscription and one forwarding task.
//! The bus subscription is registered before `attach_*` returns, so no event
//! published after a successful subscribe is missed. Detaching cancels the
//! listener and aborts the task, which drops the bus subscription. Events
//! the task already buffered are discarded once the listener is cancelled.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use shared_bus::{EventFilter, EventTopic, InMemoryEventBus, WalletEvent};
use shared_types::Address;
use wallet_telemetry::LISTENER_TRANSITIONS;
use wh_02_address_subscriptions::{
    AddressCallback, AddressEventSource, BlockCallback, ListenerError, ListenerHandle,
};

/// A forwarding task and the flag that stops it invoking its callback.
struct Listener {
    task: JoinHandle<()>,
    cancelled: Arc<AtomicBool>,
}

impl Listener {
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.task.abort();
    }
}

/// Wallet-event source backed by [`InMemoryEventBus`].
pub struct BusEventSource {
    bus: Arc<InMemoryEventBus>,
    runtime: Handle,
    listeners: DashMap<u64, Listener>,
    next_id: AtomicU64,
}

impl BusEventSource {
    /// Create a source that spawns forwarding tasks on the current Tokio
    /// runtime.
    pub fn new(bus: Arc<InMemoryEventBus>) -> Result<Self, ListenerError> {
        let runtime =
            Handle::try_current().map_err(|e| ListenerError::Unavailable(e.to_string()))?;
        Ok(Self::with_runtime(bus, runtime))
    }

    /// Create a source that spawns forwarding tasks on `runtime`.
    pub fn with_runtime(bus: Arc<InMemoryEventBus>, runtime: Handle) -> Self {
        Self {
            bus,
            runtime,
            listeners: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of live forwarding tasks.
    pub fn active_listeners(&self) -> usize {
        self.listeners.len()
    }

    fn register(&self, task: JoinHandle<()>, cancelled: Arc<AtomicBool>) -> ListenerHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.insert(id, Listener { task, cancelled });
        ListenerHandle::new(id)
    }

    fn cancel(&self, handle: &ListenerHandle) -> Result<(), ListenerError> {
        let (_, listener) = self
            .listeners
            .remove(&handle.id())
            .ok_or_else(|| ListenerError::UnknownHandle(handle.clone()))?;
        listener.cancel();
        Ok(())
    }
}

impl AddressEventSource for BusEventSource {
    fn attach_address_listener(
        &self,
        address: &Address,
        callback: AddressCallback,
    ) -> Result<ListenerHandle, ListenerError> {
        let mut subscription = self.bus.subscribe(EventFilter::address(address.clone()));
        let watched = address.clone();
        let cancelled = Arc::new(AtomicBool::new(false));
        let stop = Arc::clone(&cancelled);

        let task = self.runtime.spawn(async move {
            while let Some(event) = subscription.recv().await {
                if stop.load(Ordering::SeqCst) {
                    break;
                }
                // One callback per transaction, however many outputs pay here.
                if let WalletEvent::CoinsReceived(tx) = event {
                    trace!(address = %watched, tx_id = %tx.tx_id, "Forwarding coins received");
                    callback(&watched, &tx);
                }
            }
        });

        let handle = self.register(task, cancelled);
        LISTENER_TRANSITIONS.with_label_values(&["attach"]).inc();
        debug!(address = %address, handle = %handle, "Address listener attached");
        Ok(handle)
    }

    fn detach_address_listener(&self, handle: &ListenerHandle) -> Result<(), ListenerError> {
        self.cancel(handle)?;
        LISTENER_TRANSITIONS.with_label_values(&["detach"]).inc();
        debug!(handle = %handle, "Address listener detached");
        Ok(())
    }

    fn attach_best_block_listener(
        &self,
        callback: BlockCallback,
    ) -> Result<ListenerHandle, ListenerError> {
        let mut subscription = self
            .bus
            .subscribe(EventFilter::topics(vec![EventTopic::BestBlock]));
        let cancelled = Arc::new(AtomicBool::new(false));
        let stop = Arc::clone(&cancelled);

        let task = self.runtime.spawn(async move {
            while let Some(event) = subscription.recv().await {
                if stop.load(Ordering::SeqCst) {
                    break;
                }
                if let WalletEvent::NewBestBlock { height, block_hash } = event {
                    callback(height, &block_hash);
                }
            }
        });

        let handle = self.register(task, cancelled);
        debug!(handle = %handle, "Best block listener attached");
        Ok(handle)
    }

    fn detach_best_block_listener(&self, handle: &ListenerHandle) -> Result<(), ListenerError> {
        self.cancel(handle)?;
        debug!(handle = %handle, "Best block listener detached");
        Ok(())
    }
}

impl Drop for BusEventSource {
    fn drop(&mut self) {
        for entry in self.listeners.iter() {
            entry.value().cancel();
        }
    }
}
