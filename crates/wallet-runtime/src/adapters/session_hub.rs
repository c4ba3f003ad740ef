//! # Session Hub
//!
//! In-process session transport: one bounded notification queue per
//! connected client. The socket layer (outside this crate) drains each
//! queue and writes frames to its client.

use dashmap::DashMap;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, trace};

use shared_types::SessionId;
use wallet_telemetry::CONNECTED_SESSIONS;
use wh_02_address_subscriptions::{DeliveryError, SessionTransport, WalletNotification};

/// Receiving end of one session's queue.
pub type SessionReceiver = mpsc::Receiver<WalletNotification>;

/// Registry of connected sessions and their outbound queues.
pub struct SessionHub {
    sessions: DashMap<SessionId, mpsc::Sender<WalletNotification>>,
    queue_capacity: usize,
}

impl SessionHub {
    pub fn new(queue_capacity: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            queue_capacity: queue_capacity.max(1),
        }
    }

    /// Register a new session.
    pub fn connect(&self) -> (SessionId, SessionReceiver) {
        let session = SessionId::new();
        let (tx, rx) = mpsc::channel(self.queue_capacity);
        self.sessions.insert(session, tx);
        CONNECTED_SESSIONS.set(self.sessions.len() as i64);
        debug!(session_id = %session, "Session connected");
        (session, rx)
    }

    /// Forget a session. Returns false if it was not connected.
    pub fn remove(&self, session: SessionId) -> bool {
        let removed = self.sessions.remove(&session).is_some();
        if removed {
            CONNECTED_SESSIONS.set(self.sessions.len() as i64);
            debug!(session_id = %session, "Session removed");
        }
        removed
    }

    pub fn is_connected(&self, session: SessionId) -> bool {
        self.sessions.contains_key(&session)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl SessionTransport for SessionHub {
    fn deliver(
        &self,
        session: SessionId,
        notification: &WalletNotification,
    ) -> Result<(), DeliveryError> {
        let sender = self
            .sessions
            .get(&session)
            .map(|entry| entry.value().clone())
            .ok_or(DeliveryError::SessionNotFound(session))?;

        sender
            .try_send(notification.clone())
            .map_err(|err| match err {
                TrySendError::Full(_) => DeliveryError::QueueFull(session),
                TrySendError::Closed(_) => DeliveryError::Closed(session),
            })?;
        trace!(session_id = %session, event = notification.event_name(), "Notification queued");
        Ok(())
    }

    fn broadcast(&self, notification: &WalletNotification) -> usize {
        // Clone the senders so no map shard stays locked while sending.
        let senders: Vec<_> = self
            .sessions
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();

        senders
            .into_iter()
            .filter(|(session, sender)| match sender.try_send(notification.clone()) {
                Ok(()) => true,
                Err(err) => {
                    trace!(session_id = %session, error = %err, "Broadcast skipped session");
                    false
                }
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Address, BlockHash, TxId};

    fn note() -> WalletNotification {
        WalletNotification::transaction_received(
            Address::from_payload(0x00, &[1; 20]),
            TxId::from_bytes([2; 32]),
        )
    }

    #[test]
    fn test_deliver_to_connected_session() {
        let hub = SessionHub::new(4);
        let (session, mut rx) = hub.connect();

        hub.deliver(session, &note()).unwrap();
        assert_eq!(rx.try_recv().unwrap(), note());
    }

    #[test]
    fn test_deliver_to_unknown_session() {
        let hub = SessionHub::new(4);
        let ghost = SessionId::new();
        assert_eq!(
            hub.deliver(ghost, &note()),
            Err(DeliveryError::SessionNotFound(ghost))
        );
    }

    #[test]
    fn test_full_queue_does_not_block() {
        let hub = SessionHub::new(1);
        let (session, _rx) = hub.connect();

        hub.deliver(session, &note()).unwrap();
        assert_eq!(
            hub.deliver(session, &note()),
            Err(DeliveryError::QueueFull(session))
        );
    }

    #[test]
    fn test_dropped_receiver_reports_closed() {
        let hub = SessionHub::new(4);
        let (session, rx) = hub.connect();
        drop(rx);
        assert_eq!(
            hub.deliver(session, &note()),
            Err(DeliveryError::Closed(session))
        );
    }

    #[test]
    fn test_broadcast_reaches_every_session() {
        let hub = SessionHub::new(4);
        let (_a, mut rx_a) = hub.connect();
        let (_b, mut rx_b) = hub.connect();
        let (_c, rx_c) = hub.connect();
        drop(rx_c);

        let block = WalletNotification::new_block(5, BlockHash::zero());
        assert_eq!(hub.broadcast(&block), 2);
        assert_eq!(rx_a.try_recv().unwrap(), block);
        assert_eq!(rx_b.try_recv().unwrap(), block);
    }

    #[test]
    fn test_remove() {
        let hub = SessionHub::new(4);
        let (session, _rx) = hub.connect();
        assert!(hub.remove(session));
        assert!(!hub.remove(session));
        assert!(!hub.is_connected(session));
        assert_eq!(hub.session_count(), 0);
    }
}
