//! # Coin Selection Subsystem
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! Chooses which spendable outputs of one address cover a target amount,
//! preferring the outputs that destroy the most coin-age (`value × depth`).
//! The same selector, run with an unbounded target, answers "how much has
//! this address received" balance queries.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Selection is a subset of the candidates | `domain/selector.rs` - `select()` only clones scanned candidates |
//! | INVARIANT-2 | `total_value` is the exact sum of `selected` | `domain/selection.rs` - `CoinSelection::push()` |
//! | INVARIANT-3 | Total order over candidates | `domain/ordering.rs` - `compare_outputs()` |
//! | INVARIANT-4 | Below-target total only when eligible outputs are exhausted | `domain/selector.rs` - early exit only on target reached |
//!
//! ## Ordering
//!
//! Most preferred first:
//!
//! 1. `value × confirmation_depth`, descending (computed in `u128`)
//! 2. `value`, descending
//! 3. parent transaction id as a 256-bit integer, ascending
//! 4. output index, ascending
//!
//! ## Eligibility
//!
//! An output is considered only if it pays to the queried address and is
//! either confirmed at least `min_depth` deep, or pending and self-originated
//! with more than one announcing peer, or pending while `min_depth == 0`.
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  service.rs         - BalanceService (CandidateSource + selector)│
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs   - CoinSelector, BalanceApi                  │
//! │  ports/outbound.rs  - CandidateSource                           │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/ordering.rs  - coin-age comparator                      │
//! │  domain/selection.rs - CoinSelection, SelectionTarget           │
//! │  domain/selector.rs  - AddressCoinSelector                      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use domain::{
    coin_age, compare_outputs, sort_outputs, AddressCoinSelector, CoinSelection, SelectionTarget,
};
pub use error::SelectionError;
pub use ports::{BalanceApi, CandidateSource, CoinSelector};
pub use service::BalanceService;
