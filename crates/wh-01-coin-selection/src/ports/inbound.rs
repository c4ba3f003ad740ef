//! # Inbound Ports - CoinSelector, BalanceApi
//!
//! Driving ports used by the wallet runtime to pick outputs for a spend and
//! to answer received-balance queries.

use shared_types::{Address, Amount, Output};

use crate::domain::{AddressCoinSelector, CoinSelection, SelectionTarget};
use crate::error::SelectionError;

/// Strategy that chooses outputs to cover a target amount.
///
/// Implementations must be pure: the same candidates and target always
/// yield the same selection.
pub trait CoinSelector: Send + Sync {
    /// Choose outputs from `candidates` for `target`.
    fn select(&self, candidates: &[Output], target: SelectionTarget) -> CoinSelection;
}

impl CoinSelector for AddressCoinSelector {
    fn select(&self, candidates: &[Output], target: SelectionTarget) -> CoinSelection {
        AddressCoinSelector::select(self, candidates, target)
    }
}

/// Balance and spend queries for a single address.
///
/// # Example
///
/// ```rust,ignore
/// use wh_01_coin_selection::ports::BalanceApi;
///
/// fn example(api: &impl BalanceApi, address: &Address) {
///     let received = api.received_for_address(address, 1)?;
///     let spend = api.select_for_spend(address, 1, 50_000)?;
///     if !spend.covers(50_000) {
///         // insufficient funds
///     }
/// }
/// ```
pub trait BalanceApi: Send + Sync {
    /// Total value of every eligible output paying to `address`.
    fn received_for_address(
        &self,
        address: &Address,
        min_confirmations: u32,
    ) -> Result<Amount, SelectionError>;

    /// Outputs of `address` that cover `target`, oldest coin-age first.
    ///
    /// A selection whose total is below `target` means insufficient funds.
    fn select_for_spend(
        &self,
        address: &Address,
        min_confirmations: u32,
        target: Amount,
    ) -> Result<CoinSelection, SelectionError>;
}
