//! Property-based tests for skill-tree aggregation
//!
//! Tests invariants:
//! - Never more than three bonus abilities
//! - The kept bonus abilities are the last ones in tree list order
//! - Each stat appears once, however many nodes grant it

use proptest::prelude::*;
use serde_json::json;

use crate::core::enrich::{aggregate, StatAliases, MAX_BONUS_ABILITIES};
use crate::core::models::CharacterRecord;
use crate::core::tables::RawTable;

#[derive(Debug, Clone)]
enum Node {
    Bonus,
    Stat(&'static str, f64),
    Empty,
}

// ============================================================================
// Strategies
// ============================================================================

fn arb_node() -> impl Strategy<Value = Node> {
    prop_oneof![
        Just(Node::Bonus),
        (
            prop_oneof![
                Just("AttackAddedRatio"),
                Just("HPAddedRatio"),
                Just("SpeedDelta")
            ],
            0.0f64..0.1
        )
            .prop_map(|(kind, value)| Node::Stat(kind, value)),
        Just(Node::Empty),
    ]
}

fn build(nodes: &[Node]) -> (CharacterRecord, RawTable) {
    let mut trees = RawTable::new();
    let mut ids = Vec::new();

    for (i, node) in nodes.iter().enumerate() {
        let id = format!("1001{i:03}");
        let record = match node {
            Node::Bonus => json!({
                "id": id, "name": format!("Bonus {i}"), "max_level": 1,
                "desc": "Increases DMG.", "levels": [{"properties": []}]
            }),
            Node::Stat(kind, value) => json!({
                "id": id, "name": "Stat", "max_level": 1, "desc": "",
                "levels": [{"properties": [{"type": kind, "value": value}]}]
            }),
            Node::Empty => json!({
                "id": id, "name": "Skill", "max_level": 10, "desc": "", "levels": []
            }),
        };
        trees.insert(id.clone(), record);
        ids.push(id);
    }

    let character = CharacterRecord {
        id: "1001".to_string(),
        skill_trees: ids,
        ..CharacterRecord::default()
    };
    (character, trees)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_bonus_abilities_are_last_three(nodes in prop::collection::vec(arb_node(), 0..30)) {
        let (character, trees) = build(&nodes);
        let summary = aggregate(&character, &trees, &RawTable::new(), &StatAliases::default());

        let expected: Vec<String> = nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| matches!(node, Node::Bonus))
            .map(|(i, _)| format!("Bonus {i}"))
            .collect();
        let skip = expected.len().saturating_sub(MAX_BONUS_ABILITIES);

        let names: Vec<String> = summary.bonus_abilities.iter().map(|b| b.name.clone()).collect();
        prop_assert!(names.len() <= MAX_BONUS_ABILITIES);
        prop_assert_eq!(names, expected[skip..].to_vec());
    }

    #[test]
    fn prop_stat_names_are_unique(nodes in prop::collection::vec(arb_node(), 0..30)) {
        let (character, trees) = build(&nodes);
        let summary = aggregate(&character, &trees, &RawTable::new(), &StatAliases::default());

        let mut names: Vec<&str> = summary.stat_totals.iter().map(|s| s.name.as_str()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        prop_assert_eq!(names.len(), total);

        let granted = nodes.iter().any(|node| matches!(node, Node::Stat(..)));
        prop_assert_eq!(total > 0, granted);
    }
}
