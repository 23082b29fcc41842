//! Catalog Assembly
//!
//! Loads the tables a request needs (concurrently, all-or-nothing), looks up
//! the root entity and joins everything else onto it. The root lookup is the
//! only lookup that can fail; every other association is optional.

use std::cmp::Reverse;
use std::ops::RangeInclusive;
use std::sync::Arc;

use serde_json::Value;

use crate::config::AppConfig;
use crate::core::enrich::{self, CompanionContext, EnrichRules, NameInference};
use crate::core::error::{CatalogError, EntityKind, Result};
use crate::core::formatters::{official_path, substitute_nickname};
use crate::core::markup::translate;
use crate::core::models::{Character, CharacterRecord, Lightcone, LightconeSkill, Servant};
use crate::core::resolver::{field_string, find_by_field, resolve, resolve_any};
use crate::core::tables::{RawTable, TableName, TableSource};

const DEFAULT_LIGHTCONE_SKILL_NAME: &str = "Lightcone Ability";

// ============================================================================
// Table Bundles
// ============================================================================

/// Everything needed to assemble a character.
#[derive(Debug, Clone, Default)]
pub struct CharacterTables {
    pub characters: RawTable,
    pub skills: RawTable,
    pub ranks: RawTable,
    pub trees: RawTable,
    pub properties: RawTable,
    pub promotions: RawTable,
    pub descriptions: RawTable,
}

impl CharacterTables {
    pub async fn load(source: &dyn TableSource) -> Result<Self> {
        let (characters, skills, ranks, trees, properties, promotions, descriptions) = tokio::try_join!(
            source.load(TableName::Characters),
            source.load(TableName::Skills),
            source.load(TableName::Ranks),
            source.load(TableName::SkillTrees),
            source.load(TableName::Properties),
            source.load(TableName::Promotions),
            source.load(TableName::Descriptions),
        )?;

        Ok(Self {
            characters,
            skills,
            ranks,
            trees,
            properties,
            promotions,
            descriptions,
        })
    }
}

/// Everything needed to assemble a lightcone.
#[derive(Debug, Clone, Default)]
pub struct LightconeTables {
    pub lightcones: RawTable,
    pub ranks: RawTable,
    pub promotions: RawTable,
}

impl LightconeTables {
    pub async fn load(source: &dyn TableSource) -> Result<Self> {
        let (lightcones, ranks, promotions) = tokio::try_join!(
            source.load(TableName::LightCones),
            source.load(TableName::LightConeRanks),
            source.load(TableName::LightConePromotions),
        )?;

        Ok(Self {
            lightcones,
            ranks,
            promotions,
        })
    }
}

// ============================================================================
// Catalog
// ============================================================================

pub struct Catalog {
    source: Arc<dyn TableSource>,
    rules: EnrichRules,
    names: NameInference,
    nickname: String,
    trailblazer_floor: u64,
    shop_range: RangeInclusive<u64>,
}

impl Catalog {
    /// Catalog with the built-in rules and display settings.
    pub fn new(source: Arc<dyn TableSource>) -> Self {
        Self::from_config(source, &AppConfig::default())
    }

    pub fn from_config(source: Arc<dyn TableSource>, config: &AppConfig) -> Self {
        let rules = EnrichRules::from_config(&config.rules);
        let [shop_start, shop_end] = config.rules.shop_range;

        Self {
            source,
            names: NameInference::from_rules(&rules.companion),
            rules,
            nickname: config.display.nickname.clone(),
            trailblazer_floor: config.rules.trailblazer_floor,
            shop_range: shop_start..=shop_end,
        }
    }

    /// Replace the rule tables (and the name chain built from them).
    pub fn with_rules(mut self, rules: EnrichRules) -> Self {
        self.names = NameInference::from_rules(&rules.companion);
        self.rules = rules;
        self
    }

    /// Replace the companion name chain.
    pub fn with_name_inference(mut self, names: NameInference) -> Self {
        self.names = names;
        self
    }

    // ------------------------------------------------------------------------
    // Single entities
    // ------------------------------------------------------------------------

    pub async fn character(&self, id: &str) -> Result<Character> {
        let tables = CharacterTables::load(self.source.as_ref()).await?;
        self.assemble_character(id, &tables)
    }

    pub async fn lightcone(&self, id: &str) -> Result<Lightcone> {
        let tables = LightconeTables::load(self.source.as_ref()).await?;
        self.assemble_lightcone(id, &tables)
    }

    /// Join one character out of already loaded tables.
    pub fn assemble_character(&self, id: &str, tables: &CharacterTables) -> Result<Character> {
        let raw = tables
            .characters
            .get(id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Character, id))?
            .as_object()
            .cloned()
            .ok_or_else(|| CatalogError::Malformed {
                table: TableName::Characters.to_string(),
                reason: format!("record {id} is not an object"),
            })?;

        // Field-level leniency lives in the view; an object always fits it.
        let mut record: CharacterRecord =
            serde_json::from_value(Value::Object(raw.clone())).unwrap_or_default();
        if record.id.is_empty() {
            record.id = id.to_string();
        }

        let description = find_by_field(&tables.descriptions, "title", &record.name)
            .and_then(|entry| entry.get("desc"))
            .and_then(Value::as_str)
            .map(|desc| substitute_nickname(desc, &self.nickname));

        let classification =
            enrich::classify(&record, &tables.skills, &tables.trees, &self.rules.companion);

        let servant = (!classification.companion_abilities.is_empty()).then(|| {
            let name = self.names.infer(&CompanionContext {
                character_id: &record.id,
                main_kit: &classification.main_kit,
                companion_abilities: &classification.companion_abilities,
            });
            let icon = classification
                .companion_abilities
                .first()
                .map(|ability| ability.icon.clone())
                .filter(|icon| !icon.is_empty())
                .unwrap_or_else(|| record.icon.clone());

            Servant {
                name,
                icon,
                abilities: classification.companion_abilities.clone(),
            }
        });

        let eidolons = record
            .ranks
            .iter()
            .map(|rank_id| tables.ranks.get(rank_id).cloned())
            .collect();

        let promotions = resolve(&record.id, &tables.promotions, "id").cloned();

        let summary = enrich::aggregate(
            &record,
            &tables.trees,
            &tables.properties,
            &self.rules.stat_aliases,
        );

        log::info!(
            "Assembled character {} ({}): {} kit, servant={}, {} stats",
            record.id,
            record.name,
            classification.main_kit.len(),
            servant.as_ref().map_or("none", |s| s.name.as_str()),
            summary.stat_totals.len()
        );

        Ok(Character {
            display_name: substitute_nickname(&record.name, &self.nickname),
            path_name: official_path(&record.path).to_string(),
            description,
            kit: classification.main_kit,
            servant,
            eidolons,
            promotions,
            stat_totals: summary.stat_totals,
            bonus_abilities: summary.bonus_abilities,
            raw,
            record,
        })
    }

    /// Join one lightcone out of already loaded tables.
    pub fn assemble_lightcone(&self, id: &str, tables: &LightconeTables) -> Result<Lightcone> {
        let record = tables
            .lightcones
            .get(id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Lightcone, id))?
            .as_object()
            .cloned()
            .ok_or_else(|| CatalogError::Malformed {
                table: TableName::LightCones.to_string(),
                reason: format!("record {id} is not an object"),
            })?;

        // Direct ID first, then the older `{id}1` rank key, then any rank
        // whose ID starts with the lightcone ID.
        let rank = tables
            .ranks
            .get(id)
            .or_else(|| resolve_any([format!("{id}1"), id.to_string()], &tables.ranks, "id"));

        let skill = rank.map(lightcone_skill);
        let promotions = resolve(id, &tables.promotions, "id").cloned();

        log::info!(
            "Assembled lightcone {}: skill={}",
            id,
            skill.as_ref().map_or("none", |s| s.name.as_str())
        );

        Ok(Lightcone {
            record,
            skill,
            promotions,
        })
    }

    // ------------------------------------------------------------------------
    // Lists
    // ------------------------------------------------------------------------

    pub async fn characters(&self) -> Result<Vec<Value>> {
        let mut list = self.source.load(TableName::Characters).await?.into_values();
        sort_characters(&mut list, self.trailblazer_floor);
        Ok(list)
    }

    pub async fn lightcones(&self) -> Result<Vec<Value>> {
        let mut list = self.source.load(TableName::LightCones).await?.into_values();
        sort_lightcones(&mut list, &self.shop_range);
        Ok(list)
    }

    pub async fn relics(&self) -> Result<Vec<Value>> {
        let mut list = self.source.load(TableName::RelicSets).await?.into_values();
        sort_relics(&mut list);
        Ok(list)
    }
}

fn lightcone_skill(rank: &Value) -> LightconeSkill {
    let name = ["name", "skill"]
        .iter()
        .filter_map(|field| rank.get(*field).and_then(Value::as_str))
        .find(|name| !name.is_empty())
        .unwrap_or(DEFAULT_LIGHTCONE_SKILL_NAME)
        .to_string();
    let desc = rank
        .get("desc")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let params: Vec<Vec<f64>> = rank
        .get("params")
        .and_then(|p| serde_json::from_value(p.clone()).ok())
        .unwrap_or_default();
    let rendered = translate(&desc, params.first().map(Vec::as_slice));

    LightconeSkill {
        name,
        desc,
        params,
        rendered,
    }
}

// ============================================================================
// Sorting
// ============================================================================

/// Numeric value of a record's `id`; non-numeric IDs count as 0.
pub fn numeric_id(record: &Value) -> u64 {
    field_string(record, "id")
        .and_then(|id| id.trim().parse().ok())
        .unwrap_or(0)
}

/// Descending by ID, with IDs at or above `floor` (Trailblazer) last.
pub fn sort_characters(list: &mut [Value], floor: u64) {
    list.sort_by_key(|record| {
        let id = numeric_id(record);
        (id >= floor, Reverse(id))
    });
}

/// Descending by ID, with the shop range last.
pub fn sort_lightcones(list: &mut [Value], shop_range: &RangeInclusive<u64>) {
    list.sort_by_key(|record| {
        let id = numeric_id(record);
        (shop_range.contains(&id), Reverse(id))
    });
}

/// Strictly descending by ID.
pub fn sort_relics(list: &mut [Value]) {
    list.sort_by_key(|record| Reverse(numeric_id(record)));
}
