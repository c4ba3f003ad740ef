//! # Hub Container
//!
//! Holds every hub component and wires them together.
//!
//! ## Initialization Order
//!
//! ```text
//! 1. Event bus
//! 2. Bus event source (needs a Tokio runtime)
//! 3. Address sink ──► Subscription registry
//! 4. Session hub ──► Event dispatcher
//! 5. Balance service over the candidate source
//! ```
//!
//! Components only hold `Arc`s to what sits above them in this list.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, instrument};

use shared_bus::InMemoryEventBus;
use wh_01_coin_selection::BalanceService;
use wh_02_address_subscriptions::{EventDispatcher, ListenerError, SubscriptionRegistry};

use crate::adapters::{BusEventSource, SessionHub};
use crate::container::config::RuntimeConfig;
use crate::handlers::{SharedCandidates, WalletApi};
use crate::wiring::{address_sink, AddressEvent};

/// Central container holding all hub components.
pub struct HubContainer {
    /// Wallet event bus. The wallet publishes here.
    pub event_bus: Arc<InMemoryEventBus>,

    /// Per-address and best-block listeners on the bus.
    pub event_source: Arc<BusEventSource>,

    /// Address → subscribers.
    pub registry: Arc<SubscriptionRegistry>,

    /// Connected sessions and their queues.
    pub sessions: Arc<SessionHub>,

    /// Fans wallet events out to sessions.
    pub dispatcher: Arc<EventDispatcher>,

    /// Coin selection over the candidate source.
    pub balances: Arc<BalanceService<SharedCandidates>>,

    /// Configuration (immutable after initialization).
    pub config: RuntimeConfig,
}

impl HubContainer {
    /// Build the container. Returns the receiving end of the address sink,
    /// which the notification pump drains.
    ///
    /// Must be called from within a Tokio runtime.
    #[instrument(name = "hub_init", skip(config, candidates))]
    pub fn new(
        config: RuntimeConfig,
        candidates: SharedCandidates,
    ) -> Result<(Self, mpsc::UnboundedReceiver<AddressEvent>), ListenerError> {
        info!("Initializing wallet hub container");

        let event_bus = Arc::new(InMemoryEventBus::with_capacity(config.bus.capacity));
        let event_source = Arc::new(BusEventSource::new(Arc::clone(&event_bus))?);
        info!(capacity = config.bus.capacity, "Event bus ready");

        let (sink, events) = address_sink();
        let registry = Arc::new(SubscriptionRegistry::new(event_source.clone(), sink));

        let sessions = Arc::new(SessionHub::new(config.notifications.session_queue_capacity));
        let dispatcher = Arc::new(EventDispatcher::new(registry.clone(), sessions.clone()));
        info!(
            queue_capacity = config.notifications.session_queue_capacity,
            "Subscription registry and dispatcher ready"
        );

        let balances = Arc::new(BalanceService::new(candidates));
        info!(
            min_confirmations = config.selection.min_confirmations,
            "Balance service ready"
        );

        let container = Self {
            event_bus,
            event_source,
            registry,
            sessions,
            dispatcher,
            balances,
            config,
        };
        Ok((container, events))
    }

    /// Request handlers bound to this container.
    pub fn api(&self) -> WalletApi {
        WalletApi::new(
            Arc::clone(&self.registry),
            Arc::clone(&self.sessions),
            Arc::clone(&self.balances),
            self.config.selection.min_confirmations,
        )
    }
}
