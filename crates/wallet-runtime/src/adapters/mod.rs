//! # Adapters
//!
//! Port implementations that connect the subsystems to the event bus, to
//! client sessions and to the wallet's output listing.

pub mod candidates;
pub mod event_bus;
pub mod session_hub;

pub use candidates::InMemoryCandidateStore;
pub use event_bus::BusEventSource;
pub use session_hub::{SessionHub, SessionReceiver};
