//! Selection targets and results.

use shared_types::{Amount, Output, MAX_MONEY};

/// How much value a selection should cover.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionTarget {
    /// Stop once the selected total reaches this amount.
    Amount(Amount),
    /// Take every eligible output. Ordering is skipped.
    Unbounded,
}

impl SelectionTarget {
    /// True once `total` satisfies the target.
    pub fn is_reached(&self, total: Amount) -> bool {
        match self {
            Self::Amount(target) => total >= *target,
            Self::Unbounded => false,
        }
    }
}

impl From<Amount> for SelectionTarget {
    /// [`MAX_MONEY`] is the conventional "everything" request.
    fn from(amount: Amount) -> Self {
        if amount == MAX_MONEY {
            Self::Unbounded
        } else {
            Self::Amount(amount)
        }
    }
}

/// Outputs chosen by a selector, in selection order.
///
/// `total_value` is always the exact sum of `selected`. It may be lower than
/// the requested target; callers treat that as insufficient funds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoinSelection {
    /// Sum of the selected values.
    pub total_value: Amount,
    /// Selected outputs.
    pub selected: Vec<Output>,
}

impl CoinSelection {
    /// Empty selection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add an output and its value to the running total.
    ///
    /// An output that would overflow the total is left out and `false` is
    /// returned, so `total_value` is always the exact sum of `selected`.
    pub(crate) fn push(&mut self, output: Output) -> bool {
        let Some(total) = self.total_value.checked_add(output.value) else {
            return false;
        };
        self.total_value = total;
        self.selected.push(output);
        true
    }

    /// True if the selection covers `target`.
    pub fn covers(&self, target: Amount) -> bool {
        self.total_value >= target
    }

    /// Number of selected outputs.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// True if nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
