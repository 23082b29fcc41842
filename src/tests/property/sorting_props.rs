//! Property-based tests for list ordering
//!
//! Tests invariants:
//! - Sorting is a permutation
//! - IDs at or above the Trailblazer floor come after every other character
//! - Shop lightcones come after every other lightcone
//! - Each block is descending

use std::ops::RangeInclusive;

use proptest::prelude::*;
use serde_json::{json, Value};

use crate::core::catalog::{numeric_id, sort_characters, sort_lightcones, sort_relics};

const FLOOR: u64 = 8000;
const SHOP: RangeInclusive<u64> = 24000..=24999;

// ============================================================================
// Strategies
// ============================================================================

fn arb_records(ids: impl Strategy<Value = u64>) -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(ids, 0..40)
        .prop_map(|ids| ids.into_iter().map(|id| json!({ "id": id.to_string() })).collect())
}

fn sorted_ids(list: &[Value]) -> Vec<u64> {
    let mut ids: Vec<u64> = list.iter().map(numeric_id).collect();
    ids.sort_unstable();
    ids
}

fn is_descending(ids: &[u64]) -> bool {
    ids.windows(2).all(|w| w[0] >= w[1])
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_characters_partitioned_and_descending(list in arb_records(1000u64..9000)) {
        let before = sorted_ids(&list);
        let mut sorted = list;
        sort_characters(&mut sorted, FLOOR);

        prop_assert_eq!(sorted_ids(&sorted), before);

        let ids: Vec<u64> = sorted.iter().map(numeric_id).collect();
        let split = ids.iter().position(|&id| id >= FLOOR).unwrap_or(ids.len());
        prop_assert!(ids[split..].iter().all(|&id| id >= FLOOR));
        prop_assert!(is_descending(&ids[..split]));
        prop_assert!(is_descending(&ids[split..]));
    }

    #[test]
    fn prop_lightcones_shop_block_last(list in arb_records(20000u64..25500)) {
        let before = sorted_ids(&list);
        let mut sorted = list;
        sort_lightcones(&mut sorted, &SHOP);

        prop_assert_eq!(sorted_ids(&sorted), before);

        let ids: Vec<u64> = sorted.iter().map(numeric_id).collect();
        let split = ids.iter().position(|id| SHOP.contains(id)).unwrap_or(ids.len());
        prop_assert!(ids[split..].iter().all(|id| SHOP.contains(id)));
        prop_assert!(is_descending(&ids[..split]));
        prop_assert!(is_descending(&ids[split..]));
    }

    #[test]
    fn prop_relics_strictly_by_id(list in arb_records(100u64..400)) {
        let mut sorted = list;
        sort_relics(&mut sorted);

        let ids: Vec<u64> = sorted.iter().map(numeric_id).collect();
        prop_assert!(is_descending(&ids));
    }
}
