//! Error types for the Coin Selection subsystem.
//!
//! Selection itself never fails; insufficient funds are reported by a
//! [`CoinSelection`](crate::CoinSelection) whose total is below the target.
//! Only fetching candidates can go wrong.

use thiserror::Error;

/// Errors that can occur while answering a balance or spend query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Candidate source unavailable: {0}")]
    SourceUnavailable(String),
}
