//! Service Layer
//!
//! The registry owns subscription state; the dispatcher turns wallet events
//! into session notifications using a registry snapshot.

pub mod dispatcher;
pub mod registry;

pub use dispatcher::{DispatchReport, EventDispatcher};
pub use registry::SubscriptionRegistry;
