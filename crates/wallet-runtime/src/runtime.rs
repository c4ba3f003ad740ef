//! # Wallet Runtime
//!
//! Owns the container and the background work: the notification pump, the
//! bus metrics sampler and the best-block listener.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use shared_bus::InMemoryEventBus;
use wh_02_address_subscriptions::{AddressEventSource, ListenerError, ListenerHandle};

use crate::container::{ConfigError, HubContainer, RuntimeConfig};
use crate::handlers::{SharedCandidates, WalletApi};
use crate::wiring::{best_block_callback, run_bus_sampler, NotificationPump};

/// How often the bus ledger is copied into the metrics.
const BUS_SAMPLE_INTERVAL: Duration = Duration::from_secs(5);

/// Runtime lifecycle errors.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Event source unavailable: {0}")]
    Listener(#[from] ListenerError),

    #[error("Runtime already started")]
    AlreadyStarted,
}

/// The wallet hub runtime.
pub struct WalletRuntime {
    container: Arc<HubContainer>,
    api: WalletApi,
    pump: Mutex<Option<NotificationPump>>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    best_block: Mutex<Option<ListenerHandle>>,
    shutdown_tx: watch::Sender<bool>,
}

impl WalletRuntime {
    /// Validate `config` and build the container. Must be called from within
    /// a Tokio runtime.
    pub fn new(config: RuntimeConfig, candidates: SharedCandidates) -> Result<Self, RuntimeError> {
        config.validate()?;
        info!("Creating wallet hub runtime");

        let (container, events) = HubContainer::new(config, candidates)?;
        let container = Arc::new(container);
        let pump = NotificationPump::new(events, Arc::clone(&container.dispatcher));
        let api = container.api();
        let (shutdown_tx, _) = watch::channel(false);

        Ok(Self {
            container,
            api,
            pump: Mutex::new(Some(pump)),
            tasks: Mutex::new(Vec::new()),
            best_block: Mutex::new(None),
            shutdown_tx,
        })
    }

    /// Start the notification pump and the bus sampler, then attach the
    /// best-block listener.
    pub fn start(&self) -> Result<(), RuntimeError> {
        let pump = self.pump.lock().take().ok_or(RuntimeError::AlreadyStarted)?;

        {
            let mut tasks = self.tasks.lock();
            tasks.push(tokio::spawn(pump.run(self.shutdown_tx.subscribe())));
            tasks.push(tokio::spawn(run_bus_sampler(
                Arc::clone(&self.container.event_bus),
                BUS_SAMPLE_INTERVAL,
                self.shutdown_tx.subscribe(),
            )));
        }

        let callback = best_block_callback(Arc::clone(&self.container.dispatcher));
        let handle = self.container.event_source.attach_best_block_listener(callback)?;
        info!(handle = %handle, "Best block listener attached");
        *self.best_block.lock() = Some(handle);

        info!(
            host = %self.container.config.network.host,
            port = self.container.config.network.port,
            "Wallet hub started"
        );
        Ok(())
    }

    /// Stop background work.
    ///
    /// Detaching the best-block listener releases the dispatcher it holds;
    /// address listeners go away with the event source.
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");

        if self.shutdown_tx.send(true).is_err() {
            warn!("Background tasks already stopped");
        }

        let best_block = self.best_block.lock().take();
        if let Some(handle) = best_block {
            let source = &self.container.event_source;
            if let Err(e) = source.detach_best_block_listener(&handle) {
                error!(handle = %handle, error = %e, "Failed to detach best block listener");
            }
        }

        let tasks = std::mem::take(&mut *self.tasks.lock());
        for task in tasks {
            if let Err(e) = task.await {
                error!(error = %e, "Background task ended abnormally");
            }
        }

        info!("Shutdown complete");
    }

    /// Request handlers.
    pub fn api(&self) -> &WalletApi {
        &self.api
    }

    /// The bus the wallet publishes to.
    pub fn event_bus(&self) -> Arc<InMemoryEventBus> {
        Arc::clone(&self.container.event_bus)
    }

    /// Get a reference to the hub container.
    pub fn container(&self) -> Arc<HubContainer> {
        Arc::clone(&self.container)
    }
}
