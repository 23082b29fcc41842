//! Character enrichment: skill classification, companion naming and
//! skill-tree stat aggregation.

pub mod classifier;
pub mod companion;
pub mod rules;
pub mod stats;

pub use classifier::{classify, Classification};
pub use companion::{CompanionContext, NameInference, NameStrategy};
pub use rules::{CompanionRules, EnrichRules, StatAliases};
pub use stats::{aggregate, StatSummary, MAX_BONUS_ABILITIES};

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Deserialize a typed view of an upstream record. A record that does not
/// fit the view is treated like a missing one.
pub(crate) fn parse_record<T: DeserializeOwned>(record: &Value) -> Option<T> {
    match serde_json::from_value(record.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            log::debug!(
                "Skipping record {}: {e}",
                record.get("id").unwrap_or(&Value::Null)
            );
            None
        }
    }
}
