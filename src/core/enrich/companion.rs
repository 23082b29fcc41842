//! Companion Name Inference
//!
//! Upstream data has no field naming a character's memosprite, so the name
//! is inferred by an ordered chain of strategies; the first one that returns
//! a name wins. New heuristics are appended with [`NameInference::with_strategy`].
//!
//! Default chain:
//! 1. `static-override`: configured character ID -> name table.
//! 2. `kit-mention`: "memosprite <Name>" in the main kit descriptions.
//! 3. `talent-lead`: leading capitalized words of the companion talent, after
//!    stripping a leading "When ..., " style clause.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::rules::CompanionRules;
use crate::core::models::Ability;

/// Everything a strategy may look at.
#[derive(Debug, Clone, Copy)]
pub struct CompanionContext<'a> {
    pub character_id: &'a str,
    pub main_kit: &'a [Ability],
    pub companion_abilities: &'a [Ability],
}

pub trait NameStrategy: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    fn infer(&self, ctx: &CompanionContext<'_>) -> Option<String>;
}

// ============================================================================
// Regex Patterns
// ============================================================================

/// "memosprite" then punctuation, whitespace or tags, then one or two
/// capitalized words.
static KIT_MENTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?x)
        (?i:memosprite)
        (?:[\s:;,.!"'()\-]|<[^>]*>)*
        (?P<name>[A-Z][A-Za-z]*(?:[\x20\t]+[A-Z][A-Za-z]*)?)
        "#,
    )
    .expect("Failed to compile memosprite mention regex")
});

/// Optional leading conditional clause, then the leading capitalized words.
static TALENT_LEAD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?x)
        ^
        (?:[\s:;,.!"'()\-]|<[^>]*>)*
        (?:(?i:when|if|while|after|upon|at)\b[^,]*,)?
        (?:[\s:;,.!"'()\-]|<[^>]*>)*
        (?P<name>[A-Z][A-Za-z]*(?:[\x20\t]+[A-Z][A-Za-z]*)?)
        "#,
    )
    .expect("Failed to compile talent lead regex")
});

fn first_word(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or_default()
}

// ============================================================================
// Strategies
// ============================================================================

/// Fixed character ID -> name table.
pub struct StaticOverride {
    names: HashMap<String, String>,
}

impl StaticOverride {
    pub fn new(names: HashMap<String, String>) -> Self {
        Self { names }
    }
}

impl NameStrategy for StaticOverride {
    fn name(&self) -> &'static str {
        "static-override"
    }

    fn infer(&self, ctx: &CompanionContext<'_>) -> Option<String> {
        self.names.get(ctx.character_id).cloned()
    }
}

/// Scans the main kit descriptions for "memosprite <Name>".
pub struct KitMention {
    rules: CompanionRules,
}

impl KitMention {
    pub fn new(rules: CompanionRules) -> Self {
        Self { rules }
    }
}

impl NameStrategy for KitMention {
    fn name(&self) -> &'static str {
        "kit-mention"
    }

    fn infer(&self, ctx: &CompanionContext<'_>) -> Option<String> {
        let text = ctx
            .main_kit
            .iter()
            .map(|ability| ability.desc.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        KIT_MENTION_PATTERN
            .captures_iter(&text)
            .map(|caps| caps["name"].to_string())
            .find(|name| !self.rules.is_filler(first_word(name)))
    }
}

/// Reads the name off the front of the companion's talent description.
pub struct TalentLead {
    rules: CompanionRules,
}

impl TalentLead {
    pub fn new(rules: CompanionRules) -> Self {
        Self { rules }
    }
}

impl NameStrategy for TalentLead {
    fn name(&self) -> &'static str {
        "talent-lead"
    }

    fn infer(&self, ctx: &CompanionContext<'_>) -> Option<String> {
        let talent = ctx
            .companion_abilities
            .iter()
            .find(|ability| ability.type_text.contains("Talent"))?;

        let caps = TALENT_LEAD_PATTERN.captures(&talent.desc)?;
        let name = caps["name"].to_string();
        (!self.rules.is_filler(first_word(&name))).then_some(name)
    }
}

// ============================================================================
// Chain
// ============================================================================

/// Ordered strategy chain with a fallback name.
pub struct NameInference {
    strategies: Vec<Box<dyn NameStrategy>>,
    fallback: String,
}

impl NameInference {
    /// Chain with no strategies; always returns `fallback`.
    pub fn empty(fallback: impl Into<String>) -> Self {
        Self {
            strategies: Vec::new(),
            fallback: fallback.into(),
        }
    }

    /// The default chain built from `rules`.
    pub fn from_rules(rules: &CompanionRules) -> Self {
        Self::empty(rules.fallback_name.clone())
            .with_strategy(StaticOverride::new(rules.name_overrides.clone()))
            .with_strategy(KitMention::new(rules.clone()))
            .with_strategy(TalentLead::new(rules.clone()))
    }

    /// Append a strategy after the existing ones.
    pub fn with_strategy(mut self, strategy: impl NameStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn infer(&self, ctx: &CompanionContext<'_>) -> String {
        for strategy in &self.strategies {
            if let Some(name) = strategy.infer(ctx) {
                log::debug!(
                    "Companion of {} named '{}' by {}",
                    ctx.character_id,
                    name,
                    strategy.name()
                );
                return name;
            }
        }

        log::debug!(
            "No strategy named the companion of {}, using '{}'",
            ctx.character_id,
            self.fallback
        );
        self.fallback.clone()
    }
}

impl Default for NameInference {
    fn default() -> Self {
        Self::from_rules(&CompanionRules::default())
    }
}
