//! Schema normalization: candidate literal to canonical document.
//!
//! [`normalize`] is total. Model output drifts between runs (renamed keys,
//! flattened summaries, a string where a list was asked for); every such
//! variation is repaired here so the renderer can assume a complete
//! document.
//!
//! | Declared shape     | Accepted input                                     |
//! |--------------------|----------------------------------------------------|
//! | sequence of string | string (wrapped), sequence (items stringified)     |
//! | scalar string      | string, sequence (joined with `\n`), mapping       |
//! | mapping            | mapping; anything else is kept under `details`     |

pub mod coerce;
pub mod keys;

use crate::canvas::{CanonicalDocument, Summary};
use crate::extraction::CandidateLiteral;
use coerce::{field_section, list_section, to_list, to_text};
use keys::{CONTEXT, FLOWS, KeyRule, STOCKS, SUMMARY, TOP_LEVEL, resolve};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Coerce a candidate literal into a canonical document.
pub fn normalize(candidate: CandidateLiteral) -> CanonicalDocument {
    let root = match candidate.into_value() {
        Value::Object(map) => map,
        Value::Array(items) => {
            // Some models wrap the whole answer in a one-element list.
            match items.into_iter().find_map(|item| match item {
                Value::Object(map) => Some(map),
                _ => None,
            }) {
                Some(map) => map,
                None => {
                    warn!("Reply is a list without any mapping; canvas will be empty");
                    Map::new()
                }
            }
        }
        other => {
            warn!("Reply is a bare {}; canvas will be empty", kind(&other));
            Map::new()
        }
    };

    for key in root.keys() {
        if resolve(&TOP_LEVEL, key).is_none() && resolve(&SUMMARY, key).is_none() {
            debug!(key = key.as_str(), "Dropping unknown top-level key");
        }
    }

    let top = |canonical: &str| lookup(&root, &TOP_LEVEL, canonical);

    let stocks = top("stocks")
        .map(|v| field_section(v, Some(&STOCKS)))
        .unwrap_or_default();
    let flows = top("flows")
        .map(|v| field_section(v, Some(&FLOWS)))
        .unwrap_or_default();
    let loops = top("loops")
        .map(|v| list_section(v, None, true))
        .unwrap_or_default();
    let context = top("context")
        .map(|v| list_section(v, Some(&CONTEXT), false))
        .unwrap_or_default();
    let diagram = top("diagram").map(to_text).unwrap_or_default();

    let nested_summary = match top("summary") {
        Some(Value::Object(map)) => Some(map),
        Some(Value::Null) | None => None,
        Some(other) => {
            warn!("Summary is a {}, not a mapping; ignoring it", kind(other));
            None
        }
    };
    // Fields missing from the summary mapping fall back to the top level,
    // where the questionnaire prompt historically asked for them.
    let summary_field = |canonical: &str| {
        nested_summary
            .and_then(|map| lookup(map, &SUMMARY, canonical))
            .or_else(|| lookup(&root, &SUMMARY, canonical))
    };

    let summary = Summary {
        insights: summary_field("insights").map(to_list).unwrap_or_default(),
        bottlenecks: summary_field("bottlenecks").map(to_list).unwrap_or_default(),
        opportunities: summary_field("opportunities")
            .map(to_list)
            .unwrap_or_default(),
        strategic_recommendation: summary_field("strategic_recommendation")
            .map(to_text)
            .unwrap_or_default(),
    };

    let document = CanonicalDocument::new(stocks, flows, loops, context, summary, diagram);
    debug!(
        stocks = document.stocks().len(),
        flows = document.flows().len(),
        loops = document.loops().len(),
        context = document.context().len(),
        "Normalized canvas"
    );
    document
}

/// First value in `map` whose key names `canonical` in `table`.
fn lookup<'v>(
    map: &'v Map<String, Value>,
    table: &'static [KeyRule],
    canonical: &str,
) -> Option<&'v Value> {
    map.iter()
        .find(|(key, _)| resolve(table, key).is_some_and(|rule| rule.canonical == canonical))
        .map(|(_, value)| value)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}
