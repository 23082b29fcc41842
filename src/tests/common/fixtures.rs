//! Test Fixtures
//!
//! A trimmed copy of the upstream tables with three characters and three
//! lightcones:
//! - `1402` Aglaea: Remembrance character with a memosprite
//! - `1001` March 7th: plain kit, missing eidolon 3, no promotion entry
//! - `8001` Trailblazer: `{NICKNAME}` name, description with the placeholder
//! - `21000` current rank key, `23001` old `{id}1` rank key, `24000` shop lightcone

use std::sync::Arc;

use serde_json::{json, Value};

use crate::core::catalog::{Catalog, CharacterTables, LightconeTables};
use crate::core::tables::{RawTable, StaticTableSource, TableName};

fn table(records: Vec<Value>) -> RawTable {
    RawTable::from_records(records.into_iter().map(|record| {
        let id = record["id"].as_str().unwrap_or_default().to_string();
        (id, record)
    }))
}

// =============================================================================
// Character Tables
// =============================================================================

pub fn characters() -> RawTable {
    table(vec![
        json!({
            "id": "1001", "name": "March 7th", "tag": "mar7th", "rarity": 4,
            "path": "Knight", "element": "Ice", "max_sp": 120,
            "ranks": ["100101", "100102", "100103"],
            "skills": ["100101", "100102", "100103", "100104", "100106", "100107"],
            "skill_trees": ["1001001", "1001101", "1001201", "1001202", "1001203"],
            "icon": "icon/character/1001.png"
        }),
        json!({
            "id": "1402", "name": "Aglaea", "tag": "aglaea", "rarity": 5,
            "path": "Memory", "element": "Lightning", "max_sp": 350,
            "ranks": ["140201", "140202"],
            "skills": ["140201", "140202", "140203", "140204", "140206", "140207"],
            "skill_trees": ["1402001", "1402101", "1402102", "1402103", "1402104", "1402201", "1402202"],
            "icon": "icon/character/1402.png"
        }),
        json!({
            "id": "8001", "name": "{NICKNAME}", "tag": "playerboy", "rarity": 5,
            "path": "Warrior", "element": "Physical",
            "ranks": [], "skills": ["800101"], "skill_trees": [],
            "icon": "icon/character/8001.png"
        }),
    ])
}

fn skill(id: &str, name: &str, type_text: &str, desc: &str) -> Value {
    json!({
        "id": id, "name": name, "max_level": 10, "element": "Lightning",
        "type": "", "type_text": type_text, "desc": desc,
        "params": [[0.5, 2], [0.6, 2]],
        "icon": format!("icon/skill/{id}.png")
    })
}

pub fn skills() -> RawTable {
    table(vec![
        skill("100101", "Frigid Cold Arrow", "Basic ATK", "Deals Ice DMG equal to #1[i]% of ATK."),
        skill("100102", "The Power of Cuteness", "Skill", "Provides a shield."),
        skill("100103", "Glacial Cascade", "Ultimate", "Deals Ice DMG to all enemies."),
        skill("100104", "Girl Power", "Talent", "Counters the attacker."),
        skill("100106", "Attack", "", "Overworld attack."),
        skill("100107", "Freezing Beauty", "Technique", "Freezes enemies."),
        skill("140201", "Thorned Nectar", "Basic ATK", "Deals Lightning DMG."),
        skill(
            "140202",
            "Rise, Exalted Renown",
            "Skill",
            "Summons memosprite <u>Garmentmaker</u>. If it is already on the field, restores HP.",
        ),
        skill("140203", "Dance, Destined Weaveress", "Ultimate", "Enters Supreme Stance."),
        skill("140204", "Rosy-Fingered", "Talent", "Garmentmaker gains SPD."),
        skill("140206", "Attack", "", "Overworld attack."),
        skill("140207", "Meteoric Sword", "Technique", "Summons Garmentmaker."),
        skill("140211", "Thorned Snare", "Memosprite Skill", "Deals Lightning DMG."),
        skill(
            "140212",
            "A Body Brewed by Tears",
            "Memosprite Talent",
            "When Garmentmaker is on the field, Garmentmaker's SPD increases.",
        ),
        skill("140213", "Radiant Strings", "", "Extra memosprite action."),
        skill("800101", "Farewell Hit", "Basic ATK", "{NICKNAME} deals Physical DMG."),
    ])
}

pub fn ranks() -> RawTable {
    table(vec![
        json!({"id": "100101", "name": "Memory of You", "rank": 1, "desc": "Gains energy."}),
        json!({"id": "100102", "name": "Memory of It", "rank": 2, "desc": "Shields allies."}),
        json!({"id": "140201", "name": "Last Thread of Fate", "rank": 1, "desc": "Vulnerability."}),
        json!({"id": "140202", "name": "Thread of Everlasting", "rank": 2, "desc": "DEF ignore."}),
    ])
}

fn stat_node(id: &str, kind: &str, value: f64) -> Value {
    json!({
        "id": id, "name": "Stat Boost", "max_level": 1, "desc": "",
        "level_up_skills": [],
        "levels": [{"promotion": 2, "level": 0, "properties": [{"type": kind, "value": value}]}],
        "icon": "icon/property/stat.png"
    })
}

fn bonus_node(id: &str, name: &str) -> Value {
    json!({
        "id": id, "name": name, "max_level": 1,
        "desc": "Increases DMG dealt by #1[i]%.",
        "params": [[0.1]],
        "level_up_skills": [],
        "levels": [{"promotion": 3, "level": 0, "properties": []}],
        "icon": format!("icon/skill/{id}.png")
    })
}

fn skill_node(id: &str, skills: &[&str]) -> Value {
    json!({
        "id": id, "name": "Skill Upgrade", "max_level": 10, "desc": "",
        "level_up_skills": skills.iter().map(|s| json!({"id": s, "num": 1})).collect::<Vec<_>>(),
        "levels": [{"promotion": 0, "level": 1, "properties": []}]
    })
}

pub fn trees() -> RawTable {
    table(vec![
        skill_node("1001001", &["100101"]),
        bonus_node("1001101", "Purify"),
        stat_node("1001201", "IceAddedRatio", 0.032),
        stat_node("1001202", "DefenceAddedRatio", 0.04),
        stat_node("1001203", "IceAddedRatio", 0.032),
        skill_node("1402001", &["140201"]),
        bonus_node("1402101", "The Myopic's Doom"),
        bonus_node("1402102", "Last Thread of Fate"),
        bonus_node("1402103", "Stardust Within"),
        bonus_node("1402104", "Extra Node"),
        stat_node("1402201", "AttackAddedRatio", 0.08),
        stat_node("1402202", "AttackAddedRatio", 0.04),
        // Not in Aglaea's skill_trees list; reached only through the ID prefix.
        skill_node("1402301", &["140211", "140212", "140213"]),
    ])
}

pub fn properties() -> RawTable {
    RawTable::from_records([
        (
            "AttackAddedRatio",
            json!({"type": "AttackAddedRatio", "name": "ATK", "icon": "icon/property/IconAttack.png"}),
        ),
        (
            "DefenceAddedRatio",
            json!({"type": "DefenceAddedRatio", "name": "DEF", "icon": "icon/property/IconDefence.png"}),
        ),
        (
            "IceAddedRatio",
            json!({"type": "IceAddedRatio", "name": "Ice DMG Boost", "icon": "icon/property/IconIceAddedRatio.png"}),
        ),
    ])
}

pub fn promotions() -> RawTable {
    table(vec![
        json!({"id": "1402", "values": [{"hp": {"base": 180, "step": 9}}]}),
        json!({"id": "8001", "values": [{"hp": {"base": 163, "step": 8}}]}),
    ])
}

pub fn descriptions() -> RawTable {
    table(vec![
        json!({"id": "d1", "title": "Aglaea (Trial)", "desc": "Wrong entry."}),
        json!({"id": "d2", "title": "Aglaea", "desc": "The Chrysos Heir who seeks the Coreflame."}),
        json!({"id": "d3", "title": "{NICKNAME}", "desc": "{NICKNAME} boarded the Astral Express."}),
    ])
}

pub fn character_tables() -> CharacterTables {
    CharacterTables {
        characters: characters(),
        skills: skills(),
        ranks: ranks(),
        trees: trees(),
        properties: properties(),
        promotions: promotions(),
        descriptions: descriptions(),
    }
}

// =============================================================================
// Lightcone Tables
// =============================================================================

pub fn lightcones() -> RawTable {
    table(vec![
        json!({"id": "21000", "name": "Post-Op Conversation", "rarity": 4, "path": "Priest"}),
        json!({"id": "23001", "name": "In the Night", "rarity": 5, "path": "Rogue"}),
        json!({"id": "24000", "name": "On the Fall of an Aeon", "rarity": 5, "path": "Warrior"}),
        json!({"id": "20000", "name": "Arrows", "rarity": 3, "path": "Rogue"}),
    ])
}

pub fn lightcone_ranks() -> RawTable {
    table(vec![
        json!({
            "id": "21000", "skill": "Mutual Healing",
            "desc": "Increases Energy Regeneration Rate by #1[i]%.",
            "params": [[0.08], [0.1]]
        }),
        json!({
            "id": "230011", "skill": "Flowers and Butterflies",
            "desc": "CRIT Rate +#1[i]%",
            "params": [[0.18], [0.21]]
        }),
    ])
}

pub fn lightcone_promotions() -> RawTable {
    table(vec![
        json!({"id": "21000", "values": [{"atk": {"base": 19.2, "step": 2.88}}]}),
        json!({"id": "23001", "values": [{"atk": {"base": 26.4, "step": 3.96}}]}),
    ])
}

pub fn lightcone_tables() -> LightconeTables {
    LightconeTables {
        lightcones: lightcones(),
        ranks: lightcone_ranks(),
        promotions: lightcone_promotions(),
    }
}

pub fn relic_sets() -> RawTable {
    table(vec![
        json!({"id": "101", "name": "Passerby of Wandering Cloud"}),
        json!({"id": "310", "name": "Broken Keel"}),
        json!({"id": "124", "name": "Poet of Mourning Collapse"}),
    ])
}

// =============================================================================
// Sources
// =============================================================================

pub fn create_test_source() -> StaticTableSource {
    StaticTableSource::new()
        .with_table(TableName::Characters, characters())
        .with_table(TableName::Skills, skills())
        .with_table(TableName::Ranks, ranks())
        .with_table(TableName::SkillTrees, trees())
        .with_table(TableName::Properties, properties())
        .with_table(TableName::Promotions, promotions())
        .with_table(TableName::Descriptions, descriptions())
        .with_table(TableName::LightCones, lightcones())
        .with_table(TableName::LightConeRanks, lightcone_ranks())
        .with_table(TableName::LightConePromotions, lightcone_promotions())
        .with_table(TableName::RelicSets, relic_sets())
}

pub fn create_test_catalog() -> Catalog {
    Catalog::new(Arc::new(create_test_source()))
}
