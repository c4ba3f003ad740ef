//! Coin-age ordering of candidate outputs.

use std::cmp::Ordering;

use shared_types::Output;

/// Coin-age weight of an output: `value × confirmation_depth`.
///
/// A `u64 × u32` product is below 2^96, so `u128` holds every value exactly.
/// Unconfirmed outputs have depth 0 and therefore weight 0.
pub fn coin_age(output: &Output) -> u128 {
    u128::from(output.value) * u128::from(output.confirmation_depth)
}

/// Compare two outputs, most preferred first.
pub fn compare_outputs(a: &Output, b: &Output) -> Ordering {
    // Higher coin-age = higher priority (so reverse comparison)
    coin_age(b)
        .cmp(&coin_age(a))
        // Equal coin-age: larger value first, fewer inputs
        .then_with(|| b.value.cmp(&a.value))
        // Deterministic tie-breakers
        .then_with(|| a.parent_tx_id.cmp(&b.parent_tx_id))
        .then_with(|| a.output_index.cmp(&b.output_index))
}

/// Sort outputs in place, most preferred first.
pub fn sort_outputs(outputs: &mut [&Output]) {
    outputs.sort_by(|a, b| compare_outputs(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Address, TxId};

    fn output(value: u64, depth: u32, tx_byte: u8, index: u32) -> Output {
        Output {
            value,
            confirmation_depth: depth,
            is_own_pending: false,
            broadcast_peer_count: 0,
            parent_tx_id: TxId::from_bytes([tx_byte; 32]),
            output_index: index,
            owner_address: Address::from_payload(0x00, &[9; 20]),
        }
    }

    #[test]
    fn test_coin_age_does_not_overflow() {
        let big = output(u64::MAX, u32::MAX, 1, 0);
        assert_eq!(coin_age(&big), u128::from(u64::MAX) * u128::from(u32::MAX));
    }

    #[test]
    fn test_higher_coin_age_first() {
        let young = output(5, 10, 1, 0); // 50
        let old = output(3, 100, 2, 0); // 300
        assert_eq!(compare_outputs(&old, &young), Ordering::Less);
    }

    #[test]
    fn test_equal_coin_age_prefers_larger_value() {
        let small = output(10, 20, 1, 0); // 200
        let large = output(20, 10, 2, 0); // 200
        assert_eq!(compare_outputs(&large, &small), Ordering::Less);
    }

    #[test]
    fn test_full_tie_breaks_on_txid_ascending() {
        let mut low = [0u8; 32];
        low[31] = 1;
        let mut high = [0u8; 32];
        high[0] = 1;

        let a = Output {
            parent_tx_id: TxId::from_bytes(high),
            ..output(7, 0, 0, 0)
        };
        let b = Output {
            parent_tx_id: TxId::from_bytes(low),
            ..output(7, 0, 0, 0)
        };
        assert_eq!(compare_outputs(&b, &a), Ordering::Less);
    }

    #[test]
    fn test_same_tx_breaks_on_index() {
        let first = output(7, 3, 4, 0);
        let second = output(7, 3, 4, 1);
        assert_eq!(compare_outputs(&first, &second), Ordering::Less);
        assert_eq!(compare_outputs(&first, &first), Ordering::Equal);
    }

    #[test]
    fn test_sort_outputs_example() {
        let a = output(5, 10, 1, 0);
        let b = output(3, 100, 2, 0);
        let c = output(1, 1, 3, 0);
        let mut refs = vec![&a, &b, &c];
        sort_outputs(&mut refs);

        let values: Vec<u64> = refs.iter().map(|o| o.value).collect();
        assert_eq!(values, vec![3, 5, 1]);
    }
}
