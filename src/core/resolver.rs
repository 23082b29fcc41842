//! Cross-table reference resolution.
//!
//! Upstream tables are keyed inconsistently: eidolon ranks share the
//! character's ID, lightcone superimposition IDs were historically the
//! lightcone ID plus a rank digit, and descriptions are keyed by something
//! else entirely and have to be matched by title. Nothing here fails; a miss
//! is `None` and the caller decides what to omit.

use serde_json::Value;

use crate::core::tables::RawTable;

/// Resolve `id` against `table`: exact key first, then the first record
/// whose `match_field` (stringified) starts with `id`.
pub fn resolve<'a>(id: &str, table: &'a RawTable, match_field: &str) -> Option<&'a Value> {
    if id.is_empty() {
        return None;
    }

    table.get(id).or_else(|| {
        table.values().find(|record| {
            field_string(record, match_field).is_some_and(|value| value.starts_with(id))
        })
    })
}

/// Try each candidate ID in order with [`resolve`]; the first hit wins.
pub fn resolve_any<'a, I, S>(ids: I, table: &'a RawTable, match_field: &str) -> Option<&'a Value>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ids.into_iter()
        .find_map(|id| resolve(id.as_ref(), table, match_field))
}

/// Linear scan for the first record whose `field` equals `expected` exactly.
pub fn find_by_field<'a>(table: &'a RawTable, field: &str, expected: &str) -> Option<&'a Value> {
    table
        .values()
        .find(|record| field_string(record, field).as_deref() == Some(expected))
}

/// Every record whose `field` starts with `prefix`, in table order.
pub fn prefix_scan<'a>(
    table: &'a RawTable,
    field: &str,
    prefix: &'a str,
) -> impl Iterator<Item = &'a Value> + 'a {
    let field = field.to_string();
    table.values().filter(move |record| {
        !prefix.is_empty()
            && field_string(record, &field).is_some_and(|value| value.starts_with(prefix))
    })
}

/// Stringify a scalar field the way a loosely typed consumer would:
/// strings as-is, numbers and booleans via their JSON text.
pub fn field_string(record: &Value, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
