//! Shape coercion from untyped literal values to canvas fields.

use super::keys::{KeyRule, resolve};
use crate::canvas::{Field, Section};
use serde_json::{Map, Value};
use tracing::debug;

/// Entry name for content that arrived where a named mapping was expected.
pub const UNLABELED_KEY: &str = "details";

/// Coerce to a scalar string. Sequences are joined with newlines, in order.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(_) => to_list(value).join("\n"),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{}: {}", k.trim(), inline(v)))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Coerce to a sequence of strings. A scalar becomes a one-element sequence.
pub fn to_list(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().flat_map(list_items).collect(),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{}: {}", k.trim(), inline(v)))
            .collect(),
        scalar => vec![to_text(scalar)],
    }
}

/// Items contributed by one element of a sequence: nested sequences are
/// flattened, nulls dropped.
fn list_items(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().flat_map(list_items).collect(),
        other => vec![inline(other)],
    }
}

/// Single-line rendering of a nested value.
fn inline(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(items) => items
            .iter()
            .map(inline)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{}: {}", k.trim(), inline(v)))
            .collect::<Vec<_>>()
            .join("; "),
    }
}

/// Coerce one stocks/flows entry, keeping its shape.
pub fn to_field(value: &Value, nested: Option<&'static [KeyRule]>) -> Field {
    match value {
        Value::Array(_) => Field::List(to_list(value)),
        Value::Object(map) => Field::Group(field_entries(map, nested)),
        scalar => Field::Text(to_text(scalar)),
    }
}

/// Coerce a stocks/flows section.
pub fn field_section(value: &Value, table: Option<&'static [KeyRule]>) -> Section<Field> {
    match value {
        Value::Null => Section::new(),
        Value::Object(map) => field_entries(map, table),
        other => {
            debug!("Section is not a mapping; keeping it as `{}`", UNLABELED_KEY);
            [(UNLABELED_KEY, to_field(other, None))].into_iter().collect()
        }
    }
}

fn field_entries(map: &Map<String, Value>, table: Option<&'static [KeyRule]>) -> Section<Field> {
    let mut section = Section::new();
    for (raw_key, value) in map {
        let Some((key, rule)) = entry_key(raw_key, table) else {
            continue;
        };
        let field = to_field(value, rule.and_then(|s| s.nested));
        if !section.insert_first(key, field) {
            debug!(key = raw_key.as_str(), "Duplicate canvas key ignored");
        }
    }
    section
}

/// Coerce a loops/context section: every entry becomes a sequence.
///
/// With `hoist_groups`, an entry whose value is itself a mapping (a
/// "reinforcing patterns" wrapper, say) contributes its inner entries
/// instead of being flattened to strings.
pub fn list_section(
    value: &Value,
    table: Option<&'static [KeyRule]>,
    hoist_groups: bool,
) -> Section<Vec<String>> {
    let map = match value {
        Value::Null => return Section::new(),
        Value::Object(map) => map,
        other => {
            debug!("Section is not a mapping; keeping it as `{}`", UNLABELED_KEY);
            return [(UNLABELED_KEY, to_list(other))].into_iter().collect();
        }
    };

    let mut section = Section::new();
    for (raw_key, value) in map {
        match value {
            Value::Object(inner) if hoist_groups => {
                debug!(key = raw_key.as_str(), "Hoisting nested loop group");
                for (inner_key, inner_value) in inner {
                    if let Some((key, _)) = entry_key(inner_key, table) {
                        section.insert_first(key, to_list(inner_value));
                    }
                }
            }
            _ => {
                if let Some((key, _)) = entry_key(raw_key, table) {
                    section.insert_first(key, to_list(value));
                }
            }
        }
    }
    section
}

/// Canonical name for an entry key: the table's name when recognized,
/// otherwise the trimmed original. Blank keys are dropped.
fn entry_key(
    raw_key: &str,
    table: Option<&'static [KeyRule]>,
) -> Option<(String, Option<&'static KeyRule>)> {
    let trimmed = raw_key.trim();
    if trimmed.is_empty() {
        debug!("Dropping entry with a blank key");
        return None;
    }
    match table.and_then(|t| resolve(t, trimmed)) {
        Some(rule) => Some((rule.canonical.to_string(), Some(rule))),
        None => Some((trimmed.to_string(), None)),
    }
}

#[cfg(test)]
mod tests {
    use super::super::keys::{FLOWS, STOCKS};
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_list_wraps_scalar() {
        assert_eq!(to_list(&json!("grow")), vec!["grow"]);
        assert_eq!(to_list(&json!(42)), vec!["42"]);
        assert!(to_list(&json!(null)).is_empty());
    }

    #[test]
    fn test_to_list_flattens_and_stringifies() {
        let value = json!(["a", 1, true, null, ["b", ["c"]], {"name": "Ana", "role": "CEO"}]);
        assert_eq!(
            to_list(&value),
            vec!["a", "1", "true", "b", "c", "name: Ana; role: CEO"]
        );
    }

    #[test]
    fn test_to_text_joins_with_newline() {
        assert_eq!(to_text(&json!(["first", "second"])), "first\nsecond");
        assert_eq!(to_text(&json!({"a": 1, "b": ["x", "y"]})), "a: 1\nb: x, y");
        assert_eq!(to_text(&json!("  kept as is ")), "  kept as is ");
    }

    #[test]
    fn test_field_section_canonicalizes_known_keys() {
        let value = json!({
            "Cash On Hand": 5000,
            "Team": ["Ana", "Raj"],
            "Inventory ": "200 units",
            "cash": "ignored duplicate",
        });
        let section = field_section(&value, Some(&STOCKS));
        assert_eq!(section.keys().collect::<Vec<_>>(), vec!["cash", "people", "Inventory"]);
        assert_eq!(section.get("cash"), Some(&Field::Text("5000".into())));
        assert_eq!(
            section.get("people"),
            Some(&Field::List(vec!["Ana".into(), "Raj".into()]))
        );
    }

    #[test]
    fn test_nested_operations_group() {
        let value = json!({"ops": {"Bottleneck": "hiring", "tools": ["CRM"]}});
        let section = field_section(&value, Some(&FLOWS));
        let ops = section.get("operations").and_then(Field::as_group).unwrap();
        assert_eq!(ops.get("bottleneck"), Some(&Field::Text("hiring".into())));
        assert_eq!(ops.get("tools"), Some(&Field::List(vec!["CRM".into()])));
    }

    #[test]
    fn test_non_mapping_section_is_kept_unlabeled() {
        let section = field_section(&json!(["one", "two"]), Some(&STOCKS));
        assert_eq!(
            section.get(UNLABELED_KEY),
            Some(&Field::List(vec!["one".into(), "two".into()]))
        );
    }

    #[test]
    fn test_list_section_hoists_groups() {
        let value = json!({
            "reinforcing patterns": {
                "More customers": ["More referrals", "More customers"],
                "Better product": "Higher retention"
            },
            "Balancing": ["Capacity limits growth"]
        });
        let section = list_section(&value, None, true);
        assert_eq!(
            section.keys().collect::<Vec<_>>(),
            vec!["More customers", "Better product", "Balancing"]
        );
        assert_eq!(
            section.get("Better product"),
            Some(&vec!["Higher retention".to_string()])
        );
    }

    #[test]
    fn test_list_section_without_hoisting_flattens() {
        let value = json!({"trends": {"ai": "adoption"}});
        let section = list_section(&value, None, false);
        assert_eq!(section.get("trends"), Some(&vec!["ai: adoption".to_string()]));
    }
}
