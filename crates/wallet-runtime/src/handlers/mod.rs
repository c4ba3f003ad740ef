//! # Handlers
//!
//! Request handlers invoked by the client transport.

pub mod api;

pub use api::{ApiError, SessionConnection, SharedCandidates, WalletApi};
