//! Splits the abilities reachable from a character into the main kit and
//! companion (memosprite) abilities.

use indexmap::{IndexMap, IndexSet};

use super::parse_record;
use super::rules::CompanionRules;
use crate::core::models::{Ability, CharacterRecord, SkillTreeNode};
use crate::core::resolver::{field_string, prefix_scan};
use crate::core::tables::RawTable;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub main_kit: Vec<Ability>,
    pub companion_abilities: Vec<Ability>,
}

/// Every skill ID reachable from `character`, first occurrence order.
///
/// Sources, in order: the character's own skill list (or, when it has none,
/// every skill whose ID starts with the character ID), skills unlocked by
/// the character's tree nodes, and skills unlocked by any tree node whose ID
/// starts with the character ID.
pub fn candidate_skill_ids(
    character: &CharacterRecord,
    skills: &RawTable,
    trees: &RawTable,
) -> IndexSet<String> {
    let mut ids = IndexSet::new();

    if character.skills.is_empty() {
        ids.extend(prefix_scan(skills, "id", &character.id).filter_map(|s| field_string(s, "id")));
    } else {
        ids.extend(character.skills.iter().cloned());
    }

    let linked = character
        .skill_trees
        .iter()
        .filter_map(|tree_id| trees.get(tree_id));
    let prefixed = prefix_scan(trees, "id", &character.id);

    for node in linked.chain(prefixed).filter_map(parse_record::<SkillTreeNode>) {
        ids.extend(node.level_up_skills.iter().map(|s| s.id().to_string()));
    }

    ids
}

/// Classify the abilities reachable from `character`.
pub fn classify(
    character: &CharacterRecord,
    skills: &RawTable,
    trees: &RawTable,
    rules: &CompanionRules,
) -> Classification {
    let mut main_kit: IndexMap<String, Ability> = IndexMap::new();
    let mut companion: IndexMap<String, Ability> = IndexMap::new();

    for id in candidate_skill_ids(character, skills, trees) {
        let Some(mut ability) = skills.get(&id).and_then(parse_record::<Ability>) else {
            continue;
        };
        if ability.id.is_empty() {
            ability.id = id;
        }

        if CompanionRules::is_main_kit_type(&ability.type_text) {
            companion.shift_remove(&ability.id);
            main_kit.entry(ability.id.clone()).or_insert(ability);
            continue;
        }

        if rules.is_junk(&ability.name)
            || !rules.allows_path(&character.path)
            || main_kit.contains_key(&ability.id)
        {
            continue;
        }

        if ability.type_text.trim().is_empty() {
            ability.type_text = rules.default_type_text.clone();
        }
        companion.entry(ability.id.clone()).or_insert(ability);
    }

    log::debug!(
        "Classified character {}: {} kit, {} companion abilities",
        character.id,
        main_kit.len(),
        companion.len()
    );

    Classification {
        main_kit: main_kit.into_values().collect(),
        companion_abilities: companion.into_values().collect(),
    }
}
