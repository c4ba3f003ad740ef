//! Outbound (Driven) ports for the Coin Selection subsystem.

use shared_types::{Address, Output};

use crate::error::SelectionError;

/// Supplies a fresh snapshot of candidate outputs for an address.
///
/// The snapshot may also contain outputs paying elsewhere; the selector
/// filters them out.
pub trait CandidateSource: Send + Sync {
    /// List candidate outputs for `address`.
    fn list_candidate_outputs(&self, address: &Address) -> Result<Vec<Output>, SelectionError>;
}

impl<T: CandidateSource + ?Sized> CandidateSource for std::sync::Arc<T> {
    fn list_candidate_outputs(&self, address: &Address) -> Result<Vec<Output>, SelectionError> {
        (**self).list_candidate_outputs(address)
    }
}

/// Mock candidate source for testing.
#[cfg(test)]
pub struct MockCandidateSource {
    outputs: Vec<Output>,
    fail: bool,
}

#[cfg(test)]
impl MockCandidateSource {
    pub fn new(outputs: Vec<Output>) -> Self {
        Self {
            outputs,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            outputs: Vec::new(),
            fail: true,
        }
    }
}

#[cfg(test)]
impl CandidateSource for MockCandidateSource {
    fn list_candidate_outputs(&self, _address: &Address) -> Result<Vec<Output>, SelectionError> {
        if self.fail {
            return Err(SelectionError::SourceUnavailable("mock offline".into()));
        }
        Ok(self.outputs.clone())
    }
}
