//! # Core Wallet Entities
//!
//! ## Clusters
//!
//! - **Identity**: [`Address`], [`SessionId`]
//! - **Chain**: [`TxId`], [`BlockHash`], [`Output`]
//! - **Amounts**: [`Amount`], [`MAX_MONEY`]

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AddressError, TxIdError};

// Re-export the fixed-width primitives used across all subsystems
pub use primitive_types::{H256, U256};

// =============================================================================
// CLUSTER A: AMOUNTS
// =============================================================================

/// An amount in minor units (satoshis).
pub type Amount = u64;

/// Number of minor units in one coin.
pub const COIN: Amount = 100_000_000;

/// The total money supply. Used by callers as the "select everything" target.
pub const MAX_MONEY: Amount = 21_000_000 * COIN;

// =============================================================================
// CLUSTER B: IDENTITY
// =============================================================================

/// Length of a decoded address payload: one version byte plus a 20-byte hash.
pub const ADDRESS_PAYLOAD_LEN: usize = 21;

/// A wallet address in canonical Base58Check form.
///
/// The canonical text is the only representation stored anywhere in the hub,
/// and it is the key of every address-indexed map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Parse an address from Base58Check text.
    ///
    /// Surrounding whitespace is ignored. The checksum and payload length are
    /// verified, and the stored form is the re-encoded canonical text.
    pub fn parse(text: &str) -> Result<Self, AddressError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AddressError::Empty);
        }

        let payload = bs58::decode(trimmed)
            .with_check(None)
            .into_vec()
            .map_err(|e| AddressError::InvalidEncoding(e.to_string()))?;

        if payload.len() != ADDRESS_PAYLOAD_LEN {
            return Err(AddressError::InvalidLength {
                expected: ADDRESS_PAYLOAD_LEN,
                actual: payload.len(),
            });
        }

        Ok(Self(bs58::encode(payload).with_check().into_string()))
    }

    /// Build an address from its binary form (version byte and 20-byte hash).
    pub fn from_payload(version: u8, hash: &[u8; 20]) -> Self {
        let mut payload = Vec::with_capacity(ADDRESS_PAYLOAD_LEN);
        payload.push(version);
        payload.extend_from_slice(hash);
        Self(bs58::encode(payload).with_check().into_string())
    }

    /// The canonical Base58Check text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

/// Identifier of one connected client session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh random session id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// CLUSTER C: THE CHAIN
// =============================================================================

/// Hash of a block header.
pub type BlockHash = H256;

/// A 256-bit transaction identifier.
///
/// Bytes are kept in display order, so the ordering is the numeric value of
/// the hex text read as a big-endian integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TxId(H256);

impl TxId {
    /// Wrap raw display-order bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(H256(bytes))
    }

    /// Parse from 64 hex characters, with or without a `0x` prefix.
    pub fn from_hex(text: &str) -> Result<Self, TxIdError> {
        let digits = text.trim().trim_start_matches("0x");
        let bytes = hex::decode(digits).map_err(|e| TxIdError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TxIdError::InvalidLength(bytes.len()));
        }
        Ok(Self(H256::from_slice(&bytes)))
    }

    /// Raw display-order bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_fixed_bytes()
    }

    /// The identifier as an unsigned 256-bit integer.
    pub fn to_u256(&self) -> U256 {
        U256::from_big_endian(self.0.as_bytes())
    }
}

impl Ord for TxId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_u256().cmp(&other.to_u256())
    }
}

impl PartialOrd for TxId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0.as_bytes()))
    }
}

impl FromStr for TxId {
    type Err = TxIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for TxId {
    type Error = TxIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<TxId> for String {
    fn from(id: TxId) -> Self {
        id.to_string()
    }
}

/// A spendable output as reported by the wallet for one query.
///
/// `confirmation_depth` is zero while the parent transaction is unconfirmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Output {
    /// Value in minor units.
    pub value: Amount,
    /// Blocks since the parent transaction was included (0 = pending).
    pub confirmation_depth: u32,
    /// Pending and created by this wallet.
    pub is_own_pending: bool,
    /// Number of peers that announced the parent transaction back to us.
    pub broadcast_peer_count: u32,
    /// The transaction that created this output.
    pub parent_tx_id: TxId,
    /// Position of this output within its parent transaction.
    pub output_index: u32,
    /// Address the output pays to.
    pub owner_address: Address,
}

impl Output {
    /// True once the parent transaction is in the chain.
    pub fn is_confirmed(&self) -> bool {
        self.confirmation_depth > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH_A: [u8; 20] = [0x11; 20];

    #[test]
    fn test_address_canonical_roundtrip() {
        let address = Address::from_payload(0x00, &HASH_A);
        let parsed = Address::parse(address.as_str()).unwrap();
        assert_eq!(parsed, address);
    }

    #[test]
    fn test_address_whitespace_is_canonicalised() {
        let address = Address::from_payload(0x00, &HASH_A);
        let padded = format!("  {}\n", address);
        assert_eq!(Address::parse(&padded).unwrap(), address);
    }

    #[test]
    fn test_address_rejects_bad_checksum() {
        let address = Address::from_payload(0x00, &HASH_A).to_string();
        // Flip the last character to another alphabet symbol.
        let mut chars: Vec<char> = address.chars().collect();
        let last = chars.len() - 1;
        chars[last] = if chars[last] == '2' { '3' } else { '2' };
        let tampered: String = chars.into_iter().collect();

        assert!(matches!(
            Address::parse(&tampered),
            Err(AddressError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_address_rejects_wrong_length() {
        let short = bs58::encode(vec![0u8; 10]).with_check().into_string();
        assert_eq!(
            Address::parse(&short),
            Err(AddressError::InvalidLength {
                expected: ADDRESS_PAYLOAD_LEN,
                actual: 10
            })
        );
    }

    #[test]
    fn test_address_rejects_empty() {
        assert_eq!(Address::parse("   "), Err(AddressError::Empty));
    }

    #[test]
    fn test_address_serde_is_validated() {
        let address = Address::from_payload(0x05, &HASH_A);
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{}\"", address));
        assert_eq!(serde_json::from_str::<Address>(&json).unwrap(), address);
        assert!(serde_json::from_str::<Address>("\"not-an-address\"").is_err());
    }

    #[test]
    fn test_txid_orders_numerically() {
        let mut low = [0u8; 32];
        low[31] = 0xff;
        let mut high = [0u8; 32];
        high[0] = 0x01;

        assert!(TxId::from_bytes(low) < TxId::from_bytes(high));
    }

    #[test]
    fn test_txid_hex() {
        let id = TxId::from_bytes([0xab; 32]);
        let text = id.to_string();
        assert_eq!(text.len(), 64);
        assert_eq!(TxId::from_hex(&text).unwrap(), id);
        assert_eq!(TxId::from_hex(&format!("0x{}", text)).unwrap(), id);
        assert_eq!(TxId::from_hex("abcd"), Err(TxIdError::InvalidLength(2)));
        assert!(matches!(TxId::from_hex("zz"), Err(TxIdError::InvalidHex(_))));
    }

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn test_max_money() {
        assert_eq!(MAX_MONEY, 2_100_000_000_000_000);
    }
}
