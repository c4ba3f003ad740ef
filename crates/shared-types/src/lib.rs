//! # Shared Types Crate
//!
//! This crate contains the wallet entities that cross subsystem boundaries.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Addresses, output snapshots and identifiers
//!   are defined once here and re-used by every subsystem.
//! - **Canonical Keys**: An [`Address`] is only ever constructed through its
//!   canonical Base58Check text, so two encodings of the same address always
//!   compare equal.
//! - **Immutable Snapshots**: An [`Output`] is a point-in-time copy produced
//!   by the wallet; nothing in the hub mutates it.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
