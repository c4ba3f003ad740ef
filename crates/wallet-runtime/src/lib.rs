//! # Wallet Runtime Library
//!
//! Wires the coin selection and address subscription subsystems to the
//! wallet event bus and to client sessions. The `wallet-runtime` binary is
//! a thin shell around [`WalletRuntime`].
//!
//! ## Modules
//!
//! - `container/` - Configuration and the component container
//! - `adapters/` - Port implementations (event bus, sessions, candidates)
//! - `handlers/` - Client request handlers
//! - `wiring/` - Event routing from listeners to the dispatcher
//!
//! ## Event Flow
//!
//! ```text
//! Wallet ──publish──► Event Bus
//!                        │
//!          ┌─────────────┴──────────────┐
//!          ▼                            ▼
//!   address listeners            best-block listener
//!   (one per watched address)           │
//!          │                            │
//!          ▼                            │
//!   NotificationPump ──► EventDispatcher ◄┘
//!                              │
//!                              ▼
//!                     SessionHub queues ──► clients
//! ```

#![allow(clippy::type_complexity)]

pub mod adapters;
pub mod container;
pub mod handlers;
pub mod runtime;
pub mod wiring;

pub use container::{ConfigError, HubContainer, RuntimeConfig};
pub use handlers::{ApiError, SessionConnection, WalletApi};
pub use runtime::{RuntimeError, WalletRuntime};
