//! Rule tables consumed by the enrichment components.
//!
//! These are plain immutable values handed to the classifier, the name
//! inference chain and the stat aggregator, so tests can swap them out and
//! deployments can extend them from the config file.

use std::collections::HashMap;

use crate::config::RulesConfig;

/// Ability type tags that make up a character's main kit.
pub const MAIN_KIT_TYPES: &[&str] = &["Basic ATK", "Skill", "Ultimate", "Talent", "Technique"];

/// Characters whose companion name cannot be read reliably from text.
pub const DEFAULT_COMPANION_NAMES: &[(&str, &str)] = &[
    ("1402", "Garmentmaker"),
    ("1407", "Pollux"),
    ("1409", "Little Ica"),
    ("8007", "Mem"),
    ("8008", "Mem"),
];

/// Words the text heuristics must never return as a name.
pub const DEFAULT_FILLER_WORDS: &[&str] = &["the", "a", "when", "if", "while", "after", "all", "any"];

/// Labels of upstream filler abilities that are neither kit nor companion.
pub const DEFAULT_JUNK_LABELS: &[&str] = &["", "Attack"];

/// `(upstream type, display name, percent valued)`.
pub const DEFAULT_STAT_ALIASES: &[(&str, &str, bool)] = &[
    ("HPAddedRatio", "HP", true),
    ("AttackAddedRatio", "ATK", true),
    ("DefenceAddedRatio", "DEF", true),
    ("DefenseAddedRatio", "DEF", true),
    ("SpeedDelta", "SPD", false),
    ("CriticalChanceBase", "CRIT Rate", true),
    ("CriticalDamageBase", "CRIT DMG", true),
    ("StatusProbabilityBase", "Effect Hit Rate", true),
    ("StatusResistanceBase", "Effect RES", true),
    ("BreakDamageAddedRatioBase", "Break Effect", true),
    ("HealRatioBase", "Outgoing Healing Boost", true),
    ("SPRatioBase", "Energy Regeneration Rate", true),
    ("PhysicalAddedRatio", "Physical DMG Boost", true),
    ("FireAddedRatio", "Fire DMG Boost", true),
    ("IceAddedRatio", "Ice DMG Boost", true),
    ("ThunderAddedRatio", "Lightning DMG Boost", true),
    ("WindAddedRatio", "Wind DMG Boost", true),
    ("QuantumAddedRatio", "Quantum DMG Boost", true),
    ("ImaginaryAddedRatio", "Imaginary DMG Boost", true),
];

// ============================================================================
// Stat Aliases
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatAlias {
    pub name: String,
    pub percent: bool,
}

/// Canonical display names for upstream stat types.
#[derive(Debug, Clone)]
pub struct StatAliases {
    aliases: HashMap<String, StatAlias>,
}

impl StatAliases {
    pub fn empty() -> Self {
        Self {
            aliases: HashMap::new(),
        }
    }

    pub fn with_alias(mut self, kind: &str, name: &str, percent: bool) -> Self {
        self.aliases.insert(
            kind.to_string(),
            StatAlias {
                name: name.to_string(),
                percent,
            },
        );
        self
    }

    /// Canonical name and percent flag for `kind`. Unknown types keep their
    /// raw name and are not percent valued.
    pub fn canonical(&self, kind: &str) -> StatAlias {
        self.aliases.get(kind).cloned().unwrap_or_else(|| StatAlias {
            name: kind.to_string(),
            percent: false,
        })
    }
}

impl Default for StatAliases {
    fn default() -> Self {
        DEFAULT_STAT_ALIASES
            .iter()
            .fold(Self::empty(), |aliases, (kind, name, percent)| {
                aliases.with_alias(kind, name, *percent)
            })
    }
}

// ============================================================================
// Companion Rules
// ============================================================================

#[derive(Debug, Clone)]
pub struct CompanionRules {
    /// Character ID -> companion name, checked before any text heuristic.
    pub name_overrides: HashMap<String, String>,
    pub filler_words: Vec<String>,
    pub junk_labels: Vec<String>,
    /// Only characters on this internal path get companion abilities.
    pub required_path: Option<String>,
    /// Type tag given to companion abilities that arrive without one.
    pub default_type_text: String,
    /// Name used when every inference strategy fails.
    pub fallback_name: String,
}

impl CompanionRules {
    pub fn is_main_kit_type(type_text: &str) -> bool {
        MAIN_KIT_TYPES.contains(&type_text)
    }

    pub fn is_junk(&self, name: &str) -> bool {
        let name = name.trim();
        self.junk_labels
            .iter()
            .any(|label| label.eq_ignore_ascii_case(name))
    }

    pub fn is_filler(&self, word: &str) -> bool {
        self.filler_words
            .iter()
            .any(|filler| filler.eq_ignore_ascii_case(word))
    }

    pub fn allows_path(&self, path: &str) -> bool {
        self.required_path
            .as_deref()
            .map_or(true, |required| required == path)
    }
}

impl Default for CompanionRules {
    fn default() -> Self {
        Self {
            name_overrides: DEFAULT_COMPANION_NAMES
                .iter()
                .map(|(id, name)| (id.to_string(), name.to_string()))
                .collect(),
            filler_words: DEFAULT_FILLER_WORDS.iter().map(|w| w.to_string()).collect(),
            junk_labels: DEFAULT_JUNK_LABELS.iter().map(|w| w.to_string()).collect(),
            required_path: None,
            default_type_text: "Memosprite Skill".to_string(),
            fallback_name: "Companion".to_string(),
        }
    }
}

// ============================================================================
// Combined
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct EnrichRules {
    pub stat_aliases: StatAliases,
    pub companion: CompanionRules,
}

impl EnrichRules {
    /// Built-in rules extended by the `[rules]` config section.
    pub fn from_config(config: &RulesConfig) -> Self {
        let mut rules = Self::default();
        rules.companion.name_overrides.extend(
            config
                .companion_names
                .iter()
                .map(|(id, name)| (id.clone(), name.clone())),
        );
        rules.companion.required_path = config.companion_path.clone();
        rules
    }
}
