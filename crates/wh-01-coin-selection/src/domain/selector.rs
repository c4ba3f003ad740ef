//! Address-scoped coin selector.

use shared_types::{Address, Output};
use tracing::trace;

use super::ordering::sort_outputs;
use super::selection::{CoinSelection, SelectionTarget};

/// Selects outputs paying to one address, oldest coin-age first.
#[derive(Clone, Debug)]
pub struct AddressCoinSelector {
    address: Address,
    min_depth: u32,
}

impl AddressCoinSelector {
    /// Create a selector for `address` requiring `min_depth` confirmations.
    pub fn new(address: Address, min_depth: u32) -> Self {
        Self { address, min_depth }
    }

    /// The address this selector is scoped to.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Minimum confirmation depth for confirmed outputs.
    pub fn min_depth(&self) -> u32 {
        self.min_depth
    }

    /// Whether an output's confirmation state allows spending it.
    ///
    /// A pending output qualifies when this wallet created it and more than
    /// one peer has announced it back, or when `min_depth` is zero.
    pub fn is_selectable(&self, output: &Output) -> bool {
        if output.is_confirmed() {
            output.confirmation_depth >= self.min_depth
        } else {
            (output.is_own_pending && output.broadcast_peer_count > 1) || self.min_depth == 0
        }
    }

    /// Whether an output may be included in a selection.
    pub fn should_select(&self, output: &Output) -> bool {
        output.owner_address == self.address && self.is_selectable(output)
    }

    /// Select outputs from `candidates` until `target` is reached.
    ///
    /// Returns whatever was accumulated when the eligible outputs run out,
    /// which may be below the target.
    pub fn select(&self, candidates: &[Output], target: SelectionTarget) -> CoinSelection {
        let mut ordered: Vec<&Output> = candidates.iter().collect();
        if matches!(target, SelectionTarget::Amount(_)) {
            sort_outputs(&mut ordered);
        }

        let mut selection = CoinSelection::empty();
        for output in ordered {
            if target.is_reached(selection.total_value) {
                break;
            }
            if !self.should_select(output) {
                continue;
            }
            if !selection.push(output.clone()) {
                trace!(tx_id = %output.parent_tx_id, value = output.value, "Output would overflow the total, skipped");
            }
        }
        selection
    }
}
