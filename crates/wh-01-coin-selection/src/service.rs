//! Balance service: binds a [`CandidateSource`] to the address selector.

use shared_types::{Address, Amount};
use tracing::{debug, instrument};

use crate::domain::{AddressCoinSelector, CoinSelection, SelectionTarget};
use crate::error::SelectionError;
use crate::ports::{BalanceApi, CandidateSource};

/// Answers balance and spend queries from a candidate source.
pub struct BalanceService<S: CandidateSource> {
    source: S,
}

impl<S: CandidateSource> BalanceService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The underlying candidate source.
    pub fn source(&self) -> &S {
        &self.source
    }

    fn run(
        &self,
        address: &Address,
        min_confirmations: u32,
        target: SelectionTarget,
    ) -> Result<CoinSelection, SelectionError> {
        let candidates = self.source.list_candidate_outputs(address)?;
        let selector = AddressCoinSelector::new(address.clone(), min_confirmations);
        let selection = selector.select(&candidates, target);

        debug!(
            address = %address,
            candidates = candidates.len(),
            selected = selection.len(),
            total = selection.total_value,
            "Coin selection complete"
        );
        Ok(selection)
    }
}

impl<S: CandidateSource> BalanceApi for BalanceService<S> {
    #[instrument(skip(self, address), fields(address = %address))]
    fn received_for_address(
        &self,
        address: &Address,
        min_confirmations: u32,
    ) -> Result<Amount, SelectionError> {
        self.run(address, min_confirmations, SelectionTarget::Unbounded)
            .map(|selection| selection.total_value)
    }

    #[instrument(skip(self, address), fields(address = %address))]
    fn select_for_spend(
        &self,
        address: &Address,
        min_confirmations: u32,
        target: Amount,
    ) -> Result<CoinSelection, SelectionError> {
        self.run(address, min_confirmations, SelectionTarget::from(target))
    }
}
