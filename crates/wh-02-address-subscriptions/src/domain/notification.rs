//! Notifications pushed to client sessions.

use serde::{Deserialize, Serialize};
use shared_types::{Address, BlockHash, TxId};

/// Event delivered to a session, tagged by event name on the wire.
///
/// ```json
/// {"event":"transactionReceived","address":"1BoatSLRHtKNngkdXEeobR76b53LETtpyT","txId":"…"}
/// {"event":"newBlock","height":812345,"hash":"0x…"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum WalletNotification {
    /// A transaction paid to a subscribed address.
    #[serde(rename_all = "camelCase")]
    TransactionReceived { address: Address, tx_id: TxId },

    /// The best chain tip moved. Sent to every session.
    NewBlock { height: u64, hash: BlockHash },
}

impl WalletNotification {
    pub fn transaction_received(address: Address, tx_id: TxId) -> Self {
        Self::TransactionReceived { address, tx_id }
    }

    pub fn new_block(height: u64, hash: BlockHash) -> Self {
        Self::NewBlock { height, hash }
    }

    /// Wire name of the event.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::TransactionReceived { .. } => "transactionReceived",
            Self::NewBlock { .. } => "newBlock",
        }
    }

    /// The address an address-scoped notification concerns.
    pub fn address(&self) -> Option<&Address> {
        match self {
            Self::TransactionReceived { address, .. } => Some(address),
            Self::NewBlock { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> Address {
        Address::from_payload(0x00, &[3; 20])
    }

    #[test]
    fn test_transaction_received_wire_shape() {
        let note = WalletNotification::transaction_received(addr(), TxId::from_bytes([0xab; 32]));
        let json = serde_json::to_value(&note).unwrap();

        assert_eq!(json["event"], "transactionReceived");
        assert_eq!(json["address"], addr().as_str());
        assert!(json.get("txId").is_some());
        assert!(json.get("tx_id").is_none());
    }

    #[test]
    fn test_new_block_wire_shape() {
        let note = WalletNotification::new_block(7, BlockHash::repeat_byte(0x11));
        let json = serde_json::to_value(&note).unwrap();

        assert_eq!(json["event"], "newBlock");
        assert_eq!(json["height"], 7);
        assert_eq!(note.event_name(), "newBlock");
        assert!(note.address().is_none());
    }

    #[test]
    fn test_json_roundtrip() {
        let note = WalletNotification::transaction_received(addr(), TxId::from_bytes([1; 32]));
        let text = serde_json::to_string(&note).unwrap();
        let back: WalletNotification = serde_json::from_str(&text).unwrap();
        assert_eq!(back, note);
    }
}
