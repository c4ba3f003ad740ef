//! # Address Subscriptions Subsystem
//!
//! **Subsystem ID:** 2
//!
//! ## Purpose
//!
//! Lets many client sessions watch wallet addresses while holding only one
//! listener per address on the wallet-event source, and fans each incoming
//! event out to the sessions watching that address.
//!
//! ## Per-Address State Machine
//!
//! ```text
//!            subscribe (first session)             unsubscribe / drop_session
//!   Absent ───────────────────────────► Watched ──────────────────────────► Absent
//!            attach listener                      (last session) detach listener
//! ```
//!
//! A slot exists only in `Watched`, and it owns the live listener handle.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | One live listener per watched address | `service/registry.rs` - attach only when no slot exists |
//! | INVARIANT-2 | Slot exists iff subscriber set is non-empty | `service/registry.rs` - `unsubscribe_locked()` |
//! | INVARIANT-3 | Failed attach/detach leaves state unchanged | `service/registry.rs` - no slot on attach error, rollback on detach error |
//! | INVARIANT-4 | One failing session never blocks fan-out | `service/dispatcher.rs` - `on_wallet_event()` |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  service/registry.rs   - SubscriptionRegistry (one mutex)       │
//! │  service/dispatcher.rs - EventDispatcher (snapshot + fan-out)   │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs   - SubscriptionApi                           │
//! │  ports/outbound.rs  - AddressEventSource, SessionTransport      │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/slot.rs         - ListenerSlot, ListenerHandle          │
//! │  domain/notification.rs - WalletNotification                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use domain::{ListenerHandle, ListenerSlot, WalletNotification};
pub use error::{DeliveryError, ListenerError, RegistryError};
pub use ports::{AddressCallback, AddressEventSource, BlockCallback, SessionTransport, SubscriptionApi};
pub use service::{DispatchReport, EventDispatcher, SubscriptionRegistry};
