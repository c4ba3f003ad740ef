//! Property tests for coin-age selection.

use std::cmp::Ordering;

use proptest::prelude::*;
use shared_types::{Address, Output, TxId};
use wh_01_coin_selection::{compare_outputs, AddressCoinSelector, SelectionTarget};

fn addr(byte: u8) -> Address {
    Address::from_payload(0x00, &[byte; 20])
}

fn output_strategy() -> impl Strategy<Value = Output> {
    (
        1u64..1_000_000,
        0u32..200,
        any::<bool>(),
        0u32..4,
        any::<[u8; 32]>(),
        prop::bool::weighted(0.8),
    )
        .prop_map(|(value, depth, own, peers, tx, is_mine)| Output {
            value,
            confirmation_depth: depth,
            is_own_pending: own,
            broadcast_peer_count: peers,
            parent_tx_id: TxId::from_bytes(tx),
            output_index: 0,
            owner_address: if is_mine { addr(1) } else { addr(2) },
        })
}

/// Candidates with unique (tx, index) keys, plus a shuffled copy.
fn candidates_and_shuffle() -> impl Strategy<Value = (Vec<Output>, Vec<Output>)> {
    prop::collection::vec(output_strategy(), 0..24)
        .prop_map(|mut outputs| {
            for (index, output) in outputs.iter_mut().enumerate() {
                output.output_index = index as u32;
            }
            outputs
        })
        .prop_flat_map(|outputs| (Just(outputs.clone()), Just(outputs).prop_shuffle()))
}

proptest! {
    #[test]
    fn selection_is_subset_with_exact_total(
        (candidates, _) in candidates_and_shuffle(),
        min_depth in 0u32..5,
        target in 0u64..5_000_000,
    ) {
        let selector = AddressCoinSelector::new(addr(1), min_depth);
        let selection = selector.select(&candidates, SelectionTarget::Amount(target));

        for chosen in &selection.selected {
            prop_assert!(candidates.contains(chosen));
            prop_assert!(selector.should_select(chosen));
        }
        let sum: u64 = selection.selected.iter().map(|o| o.value).sum();
        prop_assert_eq!(selection.total_value, sum);
    }

    #[test]
    fn below_target_only_when_eligible_exhausted(
        (candidates, _) in candidates_and_shuffle(),
        min_depth in 0u32..5,
        target in 1u64..5_000_000,
    ) {
        let selector = AddressCoinSelector::new(addr(1), min_depth);
        let selection = selector.select(&candidates, SelectionTarget::Amount(target));

        if selection.total_value < target {
            let eligible = candidates.iter().filter(|o| selector.should_select(o)).count();
            prop_assert_eq!(selection.len(), eligible);
        } else if let Some(last) = selection.selected.last() {
            // Stops as soon as the target is reached.
            prop_assert!(selection.total_value - last.value < target);
        }
    }

    #[test]
    fn selection_follows_preference_order(
        (candidates, _) in candidates_and_shuffle(),
        target in 1u64..5_000_000,
    ) {
        let selector = AddressCoinSelector::new(addr(1), 1);
        let selection = selector.select(&candidates, SelectionTarget::Amount(target));

        for pair in selection.selected.windows(2) {
            prop_assert_eq!(compare_outputs(&pair[0], &pair[1]), Ordering::Less);
        }
    }

    #[test]
    fn selection_ignores_input_order(
        (candidates, shuffled) in candidates_and_shuffle(),
        min_depth in 0u32..5,
        target in 0u64..5_000_000,
    ) {
        let selector = AddressCoinSelector::new(addr(1), min_depth);
        let first = selector.select(&candidates, SelectionTarget::Amount(target));
        let second = selector.select(&shuffled, SelectionTarget::Amount(target));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn unbounded_selects_every_eligible_output(
        (candidates, shuffled) in candidates_and_shuffle(),
        min_depth in 0u32..5,
    ) {
        let selector = AddressCoinSelector::new(addr(1), min_depth);
        let first = selector.select(&candidates, SelectionTarget::Unbounded);
        let second = selector.select(&shuffled, SelectionTarget::Unbounded);

        let eligible: Vec<&Output> =
            candidates.iter().filter(|o| selector.should_select(o)).collect();
        prop_assert_eq!(first.len(), eligible.len());
        prop_assert_eq!(first.total_value, second.total_value);

        let mut a = first.selected.clone();
        let mut b = second.selected.clone();
        a.sort_by(compare_outputs);
        b.sort_by(compare_outputs);
        prop_assert_eq!(a, b);
    }
}

#[test]
fn coin_age_example_selects_two_outputs() {
    let make = |value, depth, tx: u8| Output {
        value,
        confirmation_depth: depth,
        is_own_pending: false,
        broadcast_peer_count: 0,
        parent_tx_id: TxId::from_bytes([tx; 32]),
        output_index: 0,
        owner_address: addr(1),
    };
    let candidates = vec![make(5, 10, 1), make(3, 100, 2), make(1, 1, 3)];

    let selector = AddressCoinSelector::new(addr(1), 1);
    let selection = selector.select(&candidates, SelectionTarget::Amount(4));

    assert_eq!(selection.total_value, 8);
    assert_eq!(selection.selected, vec![candidates[1].clone(), candidates[0].clone()]);
}
