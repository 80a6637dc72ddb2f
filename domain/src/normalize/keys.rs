//! Synonym tables for canvas keys.
//!
//! Each table lists the [`KeyRule`]s for one level of the document.
//! Aliases are stored in folded form (see [`fold_key`]); lookups fold the
//! incoming key first, so case, spacing, punctuation and emoji decorations
//! never matter.

/// One recognized key with the names models use for it.
#[derive(Debug)]
pub struct KeyRule {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    /// Table for the keys of a nested group under this key.
    pub nested: Option<&'static [KeyRule]>,
}

/// The rule in `table` that `raw` names, if any.
pub fn resolve(table: &'static [KeyRule], raw: &str) -> Option<&'static KeyRule> {
    let folded = fold_key(raw);
    table
        .iter()
        .find(|rule| rule.canonical == folded || rule.aliases.contains(&folded.as_str()))
}

/// Lowercase and join the alphanumeric words of a key with `_`.
///
/// `"📦 Stocks"` → `stocks`, `"Strategic Recommendation"` →
/// `strategic_recommendation`, `"acquisition-channels"` → `acquisition_channels`.
pub fn fold_key(raw: &str) -> String {
    raw.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

const fn key(canonical: &'static str, aliases: &'static [&'static str]) -> KeyRule {
    KeyRule {
        canonical,
        aliases,
        nested: None,
    }
}

pub static TOP_LEVEL: [KeyRule; 6] = [
    key("stocks", &["stock", "resources"]),
    key("flows", &["flow"]),
    key("loops", &["loop", "feedback_loops", "reinforcing_loops"]),
    key("context", &["environment", "external_context", "market_context"]),
    key("summary", &["strategy_summary", "analysis"]),
    key("diagram", &["mermaid", "diagram_source", "system_diagram", "mermaid_diagram"]),
];

pub static SUMMARY: [KeyRule; 4] = [
    key("insights", &["insight", "key_insights"]),
    key("bottlenecks", &["bottleneck", "constraints", "key_bottlenecks"]),
    key("opportunities", &["opportunity", "key_opportunities"]),
    key(
        "strategic_recommendation",
        &[
            "strategic_recommendations",
            "recommendation",
            "recommendations",
            "strategy_recommendation",
        ],
    ),
];

pub static STOCKS: [KeyRule; 4] = [
    key("cash", &["cash_on_hand", "cash_reserves"]),
    key("assets", &["equipment", "assets_and_equipment"]),
    key("people", &["team", "staff", "employees"]),
    key("partnerships", &["partners", "suppliers", "partners_and_suppliers"]),
];

static OPERATIONS: [KeyRule; 1] = [key("bottleneck", &["bottlenecks", "main_bottleneck"])];

pub static FLOWS: [KeyRule; 4] = [
    key("revenue", &["revenues", "revenue_sources", "monthly_revenue"]),
    key("costs", &["cost", "top_costs", "expenses"]),
    key(
        "acquisition_channels",
        &["acquisition", "customer_acquisition", "channels", "acquisition_channel"],
    ),
    KeyRule {
        canonical: "operations",
        aliases: &["ops", "operation"],
        nested: Some(&OPERATIONS),
    },
];

pub static CONTEXT: [KeyRule; 3] = [
    key("trends", &["industry_trends", "market_trends"]),
    key("customer_needs", &["needs", "customer_requests"]),
    key("competition", &["competitors", "competitive_landscape"]),
];
