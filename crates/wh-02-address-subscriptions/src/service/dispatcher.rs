//! Event dispatcher: fans wallet events out to subscribed sessions.

use std::sync::Arc;

use shared_bus::ReceivedTransaction;
use shared_types::{Address, BlockHash};
use tracing::{debug, warn};

use crate::domain::WalletNotification;
use crate::ports::{SessionTransport, SubscriptionApi};

/// Outcome of one address-scoped dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Sessions the notification was queued for.
    pub delivered: usize,
    /// Sessions that were gone or too slow.
    pub dropped: usize,
}

/// Pushes notifications to sessions.
///
/// Delivery is best-effort per session: one failing session never stops the
/// rest of the fan-out.
pub struct EventDispatcher {
    subscriptions: Arc<dyn SubscriptionApi>,
    transport: Arc<dyn SessionTransport>,
}

impl EventDispatcher {
    pub fn new(subscriptions: Arc<dyn SubscriptionApi>, transport: Arc<dyn SessionTransport>) -> Self {
        Self {
            subscriptions,
            transport,
        }
    }

    /// Notify every session subscribed to `address` about `tx`.
    pub fn on_wallet_event(&self, address: &Address, tx: &ReceivedTransaction) -> DispatchReport {
        let sessions = self.subscriptions.subscribers(address);
        let notification = WalletNotification::transaction_received(address.clone(), tx.tx_id);

        let mut report = DispatchReport::default();
        for session in sessions {
            match self.transport.deliver(session, &notification) {
                Ok(()) => report.delivered += 1,
                Err(err) => {
                    report.dropped += 1;
                    warn!(address = %address, session_id = %session, error = %err, "Notification dropped");
                }
            }
        }

        debug!(
            address = %address,
            tx_id = %tx.tx_id,
            delivered = report.delivered,
            dropped = report.dropped,
            "Dispatched transaction notification"
        );
        report
    }

    /// Notify every connected session about a new best block.
    pub fn on_new_best_block(&self, height: u64, hash: &BlockHash) -> usize {
        let notified = self
            .transport
            .broadcast(&WalletNotification::new_block(height, *hash));
        debug!(height, sessions = notified, "Broadcast new best block");
        notified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DeliveryError, RegistryError};
    use parking_lot::Mutex;
    use shared_bus::ReceivedOutput;
    use shared_types::{SessionId, TxId};
    use std::collections::HashMap;

    #[derive(Default)]
    struct FixedSubscriptions {
        by_address: HashMap<Address, Vec<SessionId>>,
    }

    impl SubscriptionApi for FixedSubscriptions {
        fn subscribe(&self, _: &Address, _: SessionId) -> Result<(), RegistryError> {
            Ok(())
        }
        fn unsubscribe(&self, _: &Address, _: SessionId) -> Result<(), RegistryError> {
            Ok(())
        }
        fn drop_session(&self, _: SessionId) -> Result<(), RegistryError> {
            Ok(())
        }
        fn subscribers(&self, address: &Address) -> Vec<SessionId> {
            self.by_address.get(address).cloned().unwrap_or_default()
        }
    }

    #[derive(Default)]
    struct RecordingTransport {
        connected: Vec<SessionId>,
        delivered: Mutex<Vec<(SessionId, WalletNotification)>>,
        broadcasts: Mutex<Vec<WalletNotification>>,
    }

    impl SessionTransport for RecordingTransport {
        fn deliver(
            &self,
            session: SessionId,
            notification: &WalletNotification,
        ) -> Result<(), DeliveryError> {
            if !self.connected.contains(&session) {
                return Err(DeliveryError::SessionNotFound(session));
            }
            self.delivered.lock().push((session, notification.clone()));
            Ok(())
        }

        fn broadcast(&self, notification: &WalletNotification) -> usize {
            self.broadcasts.lock().push(notification.clone());
            self.connected.len()
        }
    }

    fn addr(byte: u8) -> Address {
        Address::from_payload(0x00, &[byte; 20])
    }

    fn tx_to(address: &Address) -> ReceivedTransaction {
        ReceivedTransaction {
            tx_id: TxId::from_bytes([0x42; 32]),
            outputs: vec![ReceivedOutput {
                address: address.clone(),
                value: 1_000,
            }],
        }
    }

    #[test]
    fn test_fan_out_reaches_exactly_subscribers() {
        let (a, b) = (addr(1), addr(2));
        let watchers: Vec<SessionId> = (0..3).map(|_| SessionId::new()).collect();
        let other = SessionId::new();

        let mut subs = FixedSubscriptions::default();
        subs.by_address.insert(a.clone(), watchers.clone());
        subs.by_address.insert(b.clone(), vec![other]);

        let mut connected = watchers.clone();
        connected.push(other);
        let transport = Arc::new(RecordingTransport {
            connected,
            ..Default::default()
        });
        let dispatcher = EventDispatcher::new(Arc::new(subs), transport.clone());

        let report = dispatcher.on_wallet_event(&a, &tx_to(&a));

        assert_eq!(report, DispatchReport { delivered: 3, dropped: 0 });
        let delivered = transport.delivered.lock();
        assert_eq!(delivered.len(), 3);
        assert!(delivered.iter().all(|(s, _)| watchers.contains(s)));
        assert!(delivered.iter().all(|(_, n)| n.address() == Some(&a)));
    }

    #[test]
    fn test_gone_session_does_not_block_others() {
        let a = addr(1);
        let (alive, gone) = (SessionId::new(), SessionId::new());

        let mut subs = FixedSubscriptions::default();
        subs.by_address.insert(a.clone(), vec![gone, alive]);
        let transport = Arc::new(RecordingTransport {
            connected: vec![alive],
            ..Default::default()
        });
        let dispatcher = EventDispatcher::new(Arc::new(subs), transport.clone());

        let report = dispatcher.on_wallet_event(&a, &tx_to(&a));
        assert_eq!(report, DispatchReport { delivered: 1, dropped: 1 });
        assert_eq!(transport.delivered.lock()[0].0, alive);
    }

    #[test]
    fn test_unwatched_address_delivers_nothing() {
        let transport = Arc::new(RecordingTransport::default());
        let dispatcher =
            EventDispatcher::new(Arc::new(FixedSubscriptions::default()), transport.clone());

        let report = dispatcher.on_wallet_event(&addr(9), &tx_to(&addr(9)));
        assert_eq!(report, DispatchReport::default());
    }

    #[test]
    fn test_new_block_is_broadcast_to_everyone() {
        let transport = Arc::new(RecordingTransport {
            connected: vec![SessionId::new(), SessionId::new()],
            ..Default::default()
        });
        let dispatcher =
            EventDispatcher::new(Arc::new(FixedSubscriptions::default()), transport.clone());

        let notified = dispatcher.on_new_best_block(10, &BlockHash::repeat_byte(1));
        assert_eq!(notified, 2);
        assert_eq!(
            transport.broadcasts.lock()[0],
            WalletNotification::new_block(10, BlockHash::repeat_byte(1))
        );
    }
}
