//! # Shared Bus
//!
//! In-process bus carrying wallet events (coins received, new best block)
//! from the wallet into the hub.
//!
//! ```text
//!   Wallet ──publish()──► InMemoryEventBus ──► Subscription (address A)
//!                                │         ──► Subscription (address B)
//!                                │         ──► Subscription (best block)
//!                                ▼
//!                       ledger: watchers per address, lagged events
//! ```
//!
//! A [`Subscription`] registers its receiver at creation time, so it sees
//! every event published after `subscribe()` returns. A subscriber that
//! falls more than the bus capacity behind skips the overwritten events
//! and keeps going.

#![allow(clippy::missing_const_for_fn)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

pub use events::{EventFilter, EventTopic, ReceivedOutput, ReceivedTransaction, WalletEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{Subscription, SubscriptionError};

/// Events buffered per subscriber before it starts skipping.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
