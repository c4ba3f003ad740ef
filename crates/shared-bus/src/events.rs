//! # Wallet Events
//!
//! Defines the event types that flow from the wallet through the shared bus.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, BlockHash, TxId};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WalletEvent {
    // =========================================================================
    // WALLET
    // =========================================================================
    /// The wallet saw a transaction paying to one or more of its addresses.
    CoinsReceived(ReceivedTransaction),

    // =========================================================================
    // CHAIN
    // =========================================================================
    /// The best chain tip moved.
    NewBestBlock {
        /// Height of the new tip.
        height: u64,
        /// Hash of the new tip.
        block_hash: BlockHash,
    },
}

/// A transaction that credited the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedTransaction {
    /// The receiving transaction.
    pub tx_id: TxId,
    /// Every output of the transaction with the address it pays to.
    pub outputs: Vec<ReceivedOutput>,
}

/// One output of a [`ReceivedTransaction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedOutput {
    /// Destination address.
    pub address: Address,
    /// Value in minor units.
    pub value: Amount,
}

impl ReceivedTransaction {
    /// True if at least one output pays to `address`.
    #[must_use]
    pub fn pays_to(&self, address: &Address) -> bool {
        self.outputs.iter().any(|output| &output.address == address)
    }
}

impl WalletEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::CoinsReceived(_) => EventTopic::CoinsReceived,
            Self::NewBestBlock { .. } => EventTopic::BestBlock,
        }
    }

    /// True if the event concerns `address`. Chain events concern no address.
    #[must_use]
    pub fn concerns(&self, address: &Address) -> bool {
        match self {
            Self::CoinsReceived(tx) => tx.pays_to(address),
            Self::NewBestBlock { .. } => false,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Transactions crediting the wallet.
    CoinsReceived,
    /// Best chain tip updates.
    BestBlock,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Addresses to include. Empty means any address.
    pub addresses: Vec<Address>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            addresses: Vec::new(),
        }
    }

    /// Create a filter for coins received on one address.
    #[must_use]
    pub fn address(address: Address) -> Self {
        Self {
            topics: vec![EventTopic::CoinsReceived],
            addresses: vec![address],
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &WalletEvent) -> bool {
        let topic_match = self.topics.is_empty() || self.topics.contains(&event.topic());

        let address_match =
            self.addresses.is_empty() || self.addresses.iter().any(|a| event.concerns(a));

        topic_match && address_match
    }
}
