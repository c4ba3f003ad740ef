//! Domain layer: pure selection logic, no I/O.

pub mod ordering;
pub mod selection;
pub mod selector;

pub use ordering::{coin_age, compare_outputs, sort_outputs};
pub use selection::{CoinSelection, SelectionTarget};
pub use selector::AddressCoinSelector;
