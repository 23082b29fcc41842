//! Skill-tree stat aggregation.
//!
//! Tree nodes either grant stats (first level carries `properties`) or are
//! single-level bonus abilities (a description and nothing else). Stats are
//! summed per canonical name; bonus abilities keep the last few seen.

use indexmap::IndexMap;
use serde_json::Value;

use super::parse_record;
use super::rules::StatAliases;
use crate::core::markup::round_one_decimal;
use crate::core::models::{flatten_numbers, BonusAbility, CharacterRecord, SkillTreeNode, StatTotal};
use crate::core::tables::RawTable;

/// Bonus abilities kept per character.
pub const MAX_BONUS_ABILITIES: usize = 3;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatSummary {
    pub stat_totals: Vec<StatTotal>,
    pub bonus_abilities: Vec<BonusAbility>,
}

#[derive(Debug)]
struct Accumulator {
    total: f64,
    percent: bool,
    icon: Option<String>,
}

impl Accumulator {
    fn formatted(&self) -> String {
        if self.percent {
            format!("{:.1}%", round_one_decimal(self.total * 100.0))
        } else {
            format!("{:.1}", round_one_decimal(self.total))
        }
    }
}

/// Walk the character's tree nodes in list order.
pub fn aggregate(
    character: &CharacterRecord,
    trees: &RawTable,
    props: &RawTable,
    aliases: &StatAliases,
) -> StatSummary {
    let mut totals: IndexMap<String, Accumulator> = IndexMap::new();
    let mut bonus_abilities = Vec::new();

    let nodes = character
        .skill_trees
        .iter()
        .filter_map(|id| trees.get(id))
        .filter_map(parse_record::<SkillTreeNode>);

    for node in nodes {
        let properties = node.first_level_properties();

        if properties.is_empty() {
            if node.max_level == 1 && !node.desc.trim().is_empty() {
                bonus_abilities.push(bonus_ability(&node));
            }
            continue;
        }

        for property in properties {
            let alias = aliases.canonical(&property.kind);
            let icon = property_icon(props, &property.kind);
            let entry = totals.entry(alias.name).or_insert_with(|| Accumulator {
                total: 0.0,
                percent: alias.percent,
                icon: None,
            });
            entry.total += property.value;
            if entry.icon.is_none() {
                entry.icon = icon;
            }
        }
    }

    let excess = bonus_abilities.len().saturating_sub(MAX_BONUS_ABILITIES);
    bonus_abilities.drain(..excess);

    StatSummary {
        stat_totals: totals
            .into_iter()
            .map(|(name, acc)| StatTotal {
                value: acc.formatted(),
                icon: acc.icon,
                name,
            })
            .collect(),
        bonus_abilities,
    }
}

fn bonus_ability(node: &SkillTreeNode) -> BonusAbility {
    let mut params = flatten_numbers(&node.params);
    if params.is_empty() {
        params = node
            .levels
            .first()
            .map(|level| flatten_numbers(&level.params))
            .unwrap_or_default();
    }

    BonusAbility {
        id: node.id.clone(),
        name: node.name.clone(),
        desc: node.desc.clone(),
        icon: node.icon.clone(),
        params,
    }
}

fn property_icon(props: &RawTable, kind: &str) -> Option<String> {
    props
        .get(kind)
        .and_then(|p| p.get("icon"))
        .and_then(Value::as_str)
        .filter(|icon| !icon.is_empty())
        .map(str::to_string)
}
