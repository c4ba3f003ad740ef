//! # Wallet API
//!
//! Request handlers behind the client transport: session lifecycle,
//! address subscriptions and balance queries. Addresses arrive as text and
//! are canonicalised here before touching any subsystem.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use shared_types::{Address, AddressError, Amount, SessionId};
use wallet_telemetry::{metric_inc, BALANCE_QUERIES, WATCHED_ADDRESSES};
use wh_01_coin_selection::{BalanceApi, BalanceService, CandidateSource, CoinSelection, SelectionError};
use wh_02_address_subscriptions::{RegistryError, SubscriptionApi, SubscriptionRegistry};

use crate::adapters::{SessionHub, SessionReceiver};

/// Candidate source shared between the runtime and the balance service.
pub type SharedCandidates = Arc<dyn CandidateSource>;

/// Errors returned to the client transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] AddressError),

    #[error("Session not connected: {0}")]
    UnknownSession(SessionId),

    #[error(transparent)]
    Subscription(#[from] RegistryError),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// A freshly connected session and its notification queue.
pub struct SessionConnection {
    pub session: SessionId,
    pub notifications: SessionReceiver,
}

/// Request-handling surface of the hub.
pub struct WalletApi {
    registry: Arc<SubscriptionRegistry>,
    sessions: Arc<SessionHub>,
    balances: Arc<BalanceService<SharedCandidates>>,
    default_min_confirmations: u32,
}

impl WalletApi {
    pub fn new(
        registry: Arc<SubscriptionRegistry>,
        sessions: Arc<SessionHub>,
        balances: Arc<BalanceService<SharedCandidates>>,
        default_min_confirmations: u32,
    ) -> Self {
        Self {
            registry,
            sessions,
            balances,
            default_min_confirmations,
        }
    }

    fn record_watched(&self) {
        WATCHED_ADDRESSES.set(self.registry.watched_count() as i64);
    }

    fn require_session(&self, session: SessionId) -> Result<(), ApiError> {
        if self.sessions.is_connected(session) {
            Ok(())
        } else {
            Err(ApiError::UnknownSession(session))
        }
    }

    /// Open a session.
    pub fn connect(&self) -> SessionConnection {
        let (session, notifications) = self.sessions.connect();
        info!(session_id = %session, "Client connected");
        SessionConnection {
            session,
            notifications,
        }
    }

    /// Close a session and release every subscription it held.
    ///
    /// The session leaves the hub before its subscriptions are dropped, so a
    /// concurrent subscribe for it undoes itself.
    pub fn disconnect(&self, session: SessionId) -> Result<(), ApiError> {
        let was_connected = self.sessions.remove(session);
        let result = self.registry.drop_session(session);
        self.record_watched();

        if let Err(err) = &result {
            warn!(session_id = %session, error = %err, "Subscription cleanup failed on disconnect");
        } else if was_connected {
            info!(session_id = %session, "Client disconnected");
        }
        result.map_err(ApiError::from)
    }

    /// Subscribe a session to transactions paying to `address`.
    pub fn subscribe_address(&self, session: SessionId, address: &str) -> Result<Address, ApiError> {
        let address = Address::parse(address)?;
        self.require_session(session)?;

        self.registry.subscribe(&address, session)?;
        if !self.sessions.is_connected(session) {
            // Disconnected while subscribing; its cleanup may have run already.
            self.registry.unsubscribe(&address, session)?;
            self.record_watched();
            return Err(ApiError::UnknownSession(session));
        }

        self.record_watched();
        debug!(session_id = %session, address = %address, "Address subscribed");
        Ok(address)
    }

    /// Remove a session's subscription to `address`. Unknown pairs are a no-op.
    pub fn unsubscribe_address(
        &self,
        session: SessionId,
        address: &str,
    ) -> Result<Address, ApiError> {
        let address = Address::parse(address)?;
        self.registry.unsubscribe(&address, session)?;
        self.record_watched();
        debug!(session_id = %session, address = %address, "Address unsubscribed");
        Ok(address)
    }

    /// Addresses a session is subscribed to.
    pub fn subscriptions(&self, session: SessionId) -> Vec<Address> {
        self.registry.subscriptions_of(session)
    }

    /// Total value of eligible outputs paying to `address`.
    pub fn received_for_address(
        &self,
        address: &str,
        min_confirmations: Option<u32>,
    ) -> Result<Amount, ApiError> {
        let address = Address::parse(address)?;
        let depth = min_confirmations.unwrap_or(self.default_min_confirmations);

        let result = self.balances.received_for_address(&address, depth);
        metric_inc!(BALANCE_QUERIES, &["received", outcome(&result)]);
        Ok(result?)
    }

    /// Outputs of `address` covering `target`. A total below `target` means
    /// insufficient funds.
    pub fn select_for_spend(
        &self,
        address: &str,
        target: Amount,
        min_confirmations: Option<u32>,
    ) -> Result<CoinSelection, ApiError> {
        let address = Address::parse(address)?;
        let depth = min_confirmations.unwrap_or(self.default_min_confirmations);

        let result = self.balances.select_for_spend(&address, depth, target);
        metric_inc!(BALANCE_QUERIES, &["spend", outcome(&result)]);
        Ok(result?)
    }
}

fn outcome<T, E>(result: &Result<T, E>) -> &'static str {
    if result.is_ok() {
        "ok"
    } else {
        "error"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryCandidateStore;
    use parking_lot::Mutex;
    use shared_bus::ReceivedTransaction;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU64, Ordering};
    use wh_02_address_subscriptions::{
        AddressCallback, AddressEventSource, BlockCallback, ListenerError, ListenerHandle,
    };

    /// Disconnects `victim` from the hub while the registry attaches its
    /// listener, as a concurrent disconnect would.
    struct DisconnectingSource {
        hub: Arc<SessionHub>,
        victim: Mutex<Option<SessionId>>,
        next_id: AtomicU64,
        live: Mutex<HashSet<ListenerHandle>>,
    }

    impl AddressEventSource for DisconnectingSource {
        fn attach_address_listener(
            &self,
            _address: &Address,
            _callback: AddressCallback,
        ) -> Result<ListenerHandle, ListenerError> {
            if let Some(victim) = self.victim.lock().take() {
                self.hub.remove(victim);
            }
            let handle = ListenerHandle::new(self.next_id.fetch_add(1, Ordering::SeqCst));
            self.live.lock().insert(handle.clone());
            Ok(handle)
        }

        fn detach_address_listener(&self, handle: &ListenerHandle) -> Result<(), ListenerError> {
            if self.live.lock().remove(handle) {
                Ok(())
            } else {
                Err(ListenerError::UnknownHandle(handle.clone()))
            }
        }

        fn attach_best_block_listener(
            &self,
            _callback: BlockCallback,
        ) -> Result<ListenerHandle, ListenerError> {
            Ok(ListenerHandle::new(u64::MAX))
        }

        fn detach_best_block_listener(&self, _handle: &ListenerHandle) -> Result<(), ListenerError> {
            Ok(())
        }
    }

    fn api_with(
        source: Arc<DisconnectingSource>,
        hub: Arc<SessionHub>,
    ) -> (WalletApi, Arc<SubscriptionRegistry>) {
        let sink: AddressCallback = Arc::new(|_: &Address, _: &ReceivedTransaction| {});
        let registry = Arc::new(SubscriptionRegistry::new(source, sink));
        let candidates: SharedCandidates = Arc::new(InMemoryCandidateStore::new());
        let balances = Arc::new(BalanceService::new(candidates));
        let api = WalletApi::new(Arc::clone(&registry), hub, balances, 1);
        (api, registry)
    }

    #[test]
    fn test_subscribe_undone_when_session_leaves_midway() {
        let hub = Arc::new(SessionHub::new(8));
        let source = Arc::new(DisconnectingSource {
            hub: Arc::clone(&hub),
            victim: Mutex::new(None),
            next_id: AtomicU64::new(1),
            live: Mutex::new(HashSet::new()),
        });
        let (api, registry) = api_with(Arc::clone(&source), Arc::clone(&hub));

        let connection = api.connect();
        *source.victim.lock() = Some(connection.session);
        let watched = Address::from_payload(0x00, &[9; 20]);

        let err = api
            .subscribe_address(connection.session, watched.as_str())
            .unwrap_err();
        assert_eq!(err, ApiError::UnknownSession(connection.session));
        assert_eq!(registry.watched_count(), 0);
        assert!(registry.subscriptions_of(connection.session).is_empty());
        assert!(source.live.lock().is_empty());

        // The late cleanup finds nothing left to release.
        api.disconnect(connection.session).unwrap();
        assert_eq!(registry.watched_count(), 0);
    }

    #[test]
    fn test_subscribe_keeps_other_sessions() {
        let hub = Arc::new(SessionHub::new(8));
        let source = Arc::new(DisconnectingSource {
            hub: Arc::clone(&hub),
            victim: Mutex::new(None),
            next_id: AtomicU64::new(1),
            live: Mutex::new(HashSet::new()),
        });
        let (api, registry) = api_with(Arc::clone(&source), Arc::clone(&hub));
        let watched = Address::from_payload(0x00, &[9; 20]);

        let stays = api.connect();
        api.subscribe_address(stays.session, watched.as_str()).unwrap();

        let leaves = api.connect();
        *source.victim.lock() = Some(leaves.session);
        // The slot exists already, so no attach runs and the victim stays put.
        api.subscribe_address(leaves.session, watched.as_str()).unwrap();
        assert_eq!(registry.subscribers(&watched).len(), 2);
        assert_eq!(source.live.lock().len(), 1);
    }
}
