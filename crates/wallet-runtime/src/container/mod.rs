//! # Hub Container
//!
//! Configuration plus the container that owns every hub component.

pub mod config;
pub mod hub;

pub use config::{ConfigError, RuntimeConfig};
pub use hub::HubContainer;
