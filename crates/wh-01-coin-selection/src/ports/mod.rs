//! Ports layer for the Coin Selection subsystem.
//!
//! - Inbound (Driving) ports: selection and balance API
//! - Outbound (Driven) ports: where candidate outputs come from

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
