//! # Candidate Store
//!
//! In-memory stand-in for the wallet's output listing. The wallet (or a
//! test) pushes output snapshots per address; coin selection reads them.

use std::collections::HashMap;

use parking_lot::RwLock;

use shared_types::{Address, Output};
use wh_01_coin_selection::{CandidateSource, SelectionError};

/// Output snapshots keyed by owning address.
#[derive(Default)]
pub struct InMemoryCandidateStore {
    outputs: RwLock<HashMap<Address, Vec<Output>>>,
}

impl InMemoryCandidateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one output under its owner address.
    pub fn insert(&self, output: Output) {
        self.outputs
            .write()
            .entry(output.owner_address.clone())
            .or_default()
            .push(output);
    }

    /// Replace every output of `address`.
    pub fn replace(&self, address: &Address, outputs: Vec<Output>) {
        self.outputs.write().insert(address.clone(), outputs);
    }

    /// Drop every output of `address`.
    pub fn clear(&self, address: &Address) {
        self.outputs.write().remove(address);
    }
}

impl CandidateSource for InMemoryCandidateStore {
    fn list_candidate_outputs(&self, address: &Address) -> Result<Vec<Output>, SelectionError> {
        Ok(self
            .outputs
            .read()
            .get(address)
            .cloned()
            .unwrap_or_default())
    }
}
