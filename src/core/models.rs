//! Typed views over upstream records and the enriched output records.
//!
//! Upstream records are loosely typed, so every view is `#[serde(default)]`,
//! every present field goes through a lenient deserializer (`null` becomes
//! the default, numbers may arrive as strings and the reverse) and unknown
//! fields are kept in a flattened `extra` map. A record that exists is never
//! rejected for the shape of one field. Enriched records serialize as the raw
//! record plus the derived fields.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Upstream Views
// ============================================================================

/// A row of `characters.json`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CharacterRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub path: String,
    #[serde(deserialize_with = "lenient_string")]
    pub element: String,
    #[serde(deserialize_with = "lenient_u8")]
    pub rarity: u8,
    #[serde(deserialize_with = "lenient_string")]
    pub icon: String,
    #[serde(deserialize_with = "lenient_id_list")]
    pub ranks: Vec<String>,
    #[serde(deserialize_with = "lenient_id_list")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "lenient_id_list")]
    pub skill_trees: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A row of `character_skills.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ability {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    /// Display classification, e.g. `Basic ATK` or `Memosprite Skill`.
    #[serde(deserialize_with = "lenient_string")]
    pub type_text: String,
    #[serde(deserialize_with = "lenient_string")]
    pub desc: String,
    #[serde(deserialize_with = "lenient_string")]
    pub icon: String,
    /// Parameter values per skill level; non-numeric entries are dropped.
    #[serde(deserialize_with = "lenient_params")]
    pub params: Vec<Vec<f64>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A row of `character_skill_trees.json`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SkillTreeNode {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub desc: String,
    #[serde(deserialize_with = "lenient_string")]
    pub icon: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub max_level: u32,
    pub params: Value,
    #[serde(deserialize_with = "lenient_list")]
    pub level_up_skills: Vec<LevelUpSkill>,
    #[serde(deserialize_with = "lenient_list")]
    pub levels: Vec<TreeLevel>,
}

impl SkillTreeNode {
    /// Properties granted by the node's first level.
    pub fn first_level_properties(&self) -> &[StatProperty] {
        self.levels
            .first()
            .map(|level| level.properties.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TreeLevel {
    #[serde(deserialize_with = "lenient_list")]
    pub properties: Vec<StatProperty>,
    pub params: Value,
}

/// A single stat contribution, e.g. `{"type": "AttackAddedRatio", "value": 0.04}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StatProperty {
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub value: f64,
}

/// Tree nodes list unlocked skills either as bare IDs or as `{id, num}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LevelUpSkill {
    // Tried first: `Id` accepts anything, so it must not see objects.
    Entry {
        #[serde(default, deserialize_with = "lenient_string")]
        id: String,
        #[serde(default, deserialize_with = "lenient_u32")]
        num: u32,
    },
    Id(#[serde(deserialize_with = "lenient_string")] String),
}

impl LevelUpSkill {
    pub fn id(&self) -> &str {
        match self {
            Self::Entry { id, .. } => id,
            Self::Id(id) => id,
        }
    }
}

// ============================================================================
// Enriched Records
// ============================================================================

/// A character joined with its skills, eidolons, promotions and tree stats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Character {
    /// The upstream row exactly as served.
    #[serde(flatten)]
    pub raw: Map<String, Value>,
    #[serde(skip)]
    pub record: CharacterRecord,
    /// `name` with the nickname placeholder substituted.
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub path_name: String,
    pub kit: Vec<Ability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servant: Option<Servant>,
    /// One slot per rank ID; unresolved ranks stay as `null`.
    pub eidolons: Vec<Option<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotions: Option<Value>,
    pub stat_totals: Vec<StatTotal>,
    pub bonus_abilities: Vec<BonusAbility>,
}

/// Companion entity inferred from a character's non-kit abilities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Servant {
    pub name: String,
    pub icon: String,
    pub abilities: Vec<Ability>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatTotal {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A single-level tree node that grants an ability instead of stats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BonusAbility {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub icon: String,
    pub params: Vec<f64>,
}

/// A lightcone joined with its passive ability and promotions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lightcone {
    #[serde(flatten)]
    pub record: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill: Option<LightconeSkill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotions: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightconeSkill {
    pub name: String,
    pub desc: String,
    /// Parameter values per superimposition.
    pub params: Vec<Vec<f64>>,
    /// `desc` translated with the superimposition 1 parameters.
    pub rendered: String,
}

// ============================================================================
// Helpers
// ============================================================================

/// Every number nested anywhere in `value`, depth first.
pub fn flatten_numbers(value: &Value) -> Vec<f64> {
    fn walk(value: &Value, out: &mut Vec<f64>) {
        match value {
            Value::Number(n) => out.extend(n.as_f64()),
            Value::Array(items) => items.iter().for_each(|item| walk(item, out)),
            _ => {}
        }
    }

    let mut out = Vec::new();
    walk(value, &mut out);
    out
}

fn scalar_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(scalar_to_string)
}

fn number_from(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_from(&Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_f64(deserializer)?;
    Ok(if (0.0..=u32::MAX as f64).contains(&value) {
        value as u32
    } else {
        0
    })
}

fn lenient_u8<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(u8::try_from(lenient_u32(deserializer)?).unwrap_or_default())
}

/// One row per level; each row keeps only its numbers.
fn lenient_params<'de, D>(deserializer: D) -> Result<Vec<Vec<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(rows) => rows.iter().map(flatten_numbers).collect(),
        _ => Vec::new(),
    })
}

/// Elements that fit `T`; anything else, including `null`, is skipped.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_id_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(scalar_to_string).collect(),
        _ => Vec::new(),
    })
}
