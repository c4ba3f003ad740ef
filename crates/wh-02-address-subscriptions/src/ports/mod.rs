//! Ports layer for the Address Subscriptions subsystem.
//!
//! - Inbound (Driving) ports: subscription API used by request handlers
//! - Outbound (Driven) ports: wallet-event source and session transport

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
