//! Upstream Tables
//!
//! Every upstream dataset is a JSON object keyed by string ID
//! (`{"1001": {...}, "1002": {...}}`). A [`RawTable`] keeps that mapping in
//! source insertion order and offers a value-order view for the places that
//! treat the dictionary as a list.

pub mod source;

pub use source::{HttpTableSource, StaticTableSource, TableSource};

use indexmap::IndexMap;
use serde_json::Value;

use crate::core::error::{CatalogError, Result};

// ============================================================================
// Table Names
// ============================================================================

/// The upstream datasets the catalog knows how to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableName {
    Characters,
    Skills,
    Ranks,
    SkillTrees,
    Properties,
    Promotions,
    Descriptions,
    LightCones,
    LightConeRanks,
    LightConePromotions,
    RelicSets,
}

impl TableName {
    pub const ALL: [TableName; 11] = [
        TableName::Characters,
        TableName::Skills,
        TableName::Ranks,
        TableName::SkillTrees,
        TableName::Properties,
        TableName::Promotions,
        TableName::Descriptions,
        TableName::LightCones,
        TableName::LightConeRanks,
        TableName::LightConePromotions,
        TableName::RelicSets,
    ];

    /// File name of the dataset inside the upstream language directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Characters => "characters.json",
            Self::Skills => "character_skills.json",
            Self::Ranks => "character_ranks.json",
            Self::SkillTrees => "character_skill_trees.json",
            Self::Properties => "properties.json",
            Self::Promotions => "character_promotions.json",
            Self::Descriptions => "descriptions.json",
            Self::LightCones => "light_cones.json",
            Self::LightConeRanks => "light_cone_ranks.json",
            Self::LightConePromotions => "light_cone_promotions.json",
            Self::RelicSets => "relic_sets.json",
        }
    }
}

impl std::fmt::Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name().trim_end_matches(".json"))
    }
}

// ============================================================================
// Raw Table
// ============================================================================

/// Mapping from string ID to an arbitrarily shaped record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    records: IndexMap<String, Value>,
}

impl RawTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the serialized text of `table`. The top level must be an object.
    pub fn parse(table: TableName, text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(|e| CatalogError::Malformed {
            table: table.to_string(),
            reason: e.to_string(),
        })?;

        match value {
            Value::Object(map) => Ok(Self {
                records: map.into_iter().collect(),
            }),
            other => Err(CatalogError::Malformed {
                table: table.to_string(),
                reason: format!("expected an object at the top level, found {}", kind_of(&other)),
            }),
        }
    }

    /// Build a table from `(id, record)` pairs, keeping their order.
    pub fn from_records<I, K>(records: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            records: records.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn insert(&mut self, id: impl Into<String>, record: Value) {
        self.records.insert(id.into(), record);
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(id, record)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.records.iter()
    }

    /// Records in source order, ignoring their keys.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.records.values()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.records.into_values().collect()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
