//! # Wiring
//!
//! Routes wallet events from bus listeners to the dispatcher.

pub mod event_routing;

pub use event_routing::{
    address_sink, best_block_callback, record_bus_metrics, run_bus_sampler, AddressEvent,
    NotificationPump,
};
