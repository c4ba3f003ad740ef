//! # Error Types
//!
//! Parsing errors for the shared identifiers.

use thiserror::Error;

/// Errors raised while parsing an [`Address`](crate::Address).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The input was empty after trimming whitespace.
    #[error("Address is empty")]
    Empty,

    /// The input is not valid Base58Check (bad alphabet or checksum).
    #[error("Invalid Base58Check encoding: {0}")]
    InvalidEncoding(String),

    /// The decoded payload has the wrong length.
    #[error("Invalid address payload length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Errors raised while parsing a [`TxId`](crate::TxId).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxIdError {
    /// The input is not hexadecimal.
    #[error("Invalid transaction id hex: {0}")]
    InvalidHex(String),

    /// The input does not decode to 32 bytes.
    #[error("Invalid transaction id length: expected 32 bytes, got {0}")]
    InvalidLength(usize),
}
