//! Markdown export of a canonical document.

use crate::canvas::{CanonicalDocument, Field, Section};
use chrono::NaiveDate;
use std::fmt::Write;

/// Marker written wherever a section or value is empty.
pub const EMPTY_MARKER: &str = "_None provided._";

const TITLE: &str = "Strategy Canvas";

/// Renders a [`CanonicalDocument`] as a markdown report.
///
/// Output depends only on the document and the generation date, so two
/// renders of the same document on the same day are byte-identical.
///
/// Sections always appear in the same order: Stocks, Flows, Loops, Context,
/// Insights, Bottlenecks, Opportunities, Strategic Recommendation, and a
/// mermaid Diagram block when the document carries one.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    generated_on: NaiveDate,
}

impl MarkdownRenderer {
    pub fn new(generated_on: NaiveDate) -> Self {
        Self { generated_on }
    }

    pub fn generated_on(&self) -> NaiveDate {
        self.generated_on
    }

    pub fn render(&self, doc: &CanonicalDocument) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# {}\n", TITLE);
        let _ = writeln!(out, "Generated on {}", self.generated_on.format("%Y-%m-%d"));

        heading(&mut out, "Stocks");
        field_section(&mut out, doc.stocks());

        heading(&mut out, "Flows");
        field_section(&mut out, doc.flows());

        heading(&mut out, "Loops");
        if doc.loops().is_empty() {
            line(&mut out, 0, EMPTY_MARKER);
        }
        for (label, effects) in doc.loops().iter() {
            if effects.is_empty() {
                bullet(&mut out, 0, &format!("{}: {}", label, EMPTY_MARKER));
            } else {
                bullet(&mut out, 0, &format!("{} leads to:", label));
                for effect in effects {
                    bullet(&mut out, 1, effect);
                }
            }
        }

        heading(&mut out, "Context");
        if doc.context().is_empty() {
            line(&mut out, 0, EMPTY_MARKER);
        }
        for (key, items) in doc.context().iter() {
            labeled_list(&mut out, 0, key, items);
        }

        let summary = doc.summary();
        heading(&mut out, "Insights");
        plain_list(&mut out, &summary.insights);
        heading(&mut out, "Bottlenecks");
        plain_list(&mut out, &summary.bottlenecks);
        heading(&mut out, "Opportunities");
        plain_list(&mut out, &summary.opportunities);

        heading(&mut out, "Strategic Recommendation");
        if summary.strategic_recommendation.is_empty() {
            line(&mut out, 0, EMPTY_MARKER);
        } else {
            line(&mut out, 0, &summary.strategic_recommendation);
        }

        if !doc.diagram().is_empty() {
            heading(&mut out, "Diagram");
            out.push_str("```mermaid\n");
            out.push_str(doc.diagram());
            if !doc.diagram().ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }

        out
    }
}

fn heading(out: &mut String, title: &str) {
    let _ = write!(out, "\n## {}\n\n", title);
}

/// Write `text` at `depth`, indenting continuation lines to match.
fn line(out: &mut String, depth: usize, text: &str) {
    let indent = "  ".repeat(depth);
    for part in text.split('\n') {
        let _ = writeln!(out, "{}{}", indent, part);
    }
}

/// Write a `- text` bullet; continuation lines hang under the bullet text.
fn bullet(out: &mut String, depth: usize, text: &str) {
    let indent = "  ".repeat(depth);
    let mut parts = text.split('\n');
    let first = parts.next().unwrap_or_default();
    let _ = writeln!(out, "{}- {}", indent, first);
    for part in parts {
        let _ = writeln!(out, "{}  {}", indent, part);
    }
}

fn plain_list(out: &mut String, items: &[String]) {
    if items.is_empty() {
        line(out, 0, EMPTY_MARKER);
    }
    for item in items {
        bullet(out, 0, item);
    }
}

fn labeled_list(out: &mut String, depth: usize, key: &str, items: &[String]) {
    if items.is_empty() {
        bullet(out, depth, &format!("{}: {}", key, EMPTY_MARKER));
        return;
    }
    bullet(out, depth, &format!("{}:", key));
    for item in items {
        bullet(out, depth + 1, item);
    }
}

fn field_section(out: &mut String, section: &Section<Field>) {
    if section.is_empty() {
        line(out, 0, EMPTY_MARKER);
    }
    for (key, value) in section.iter() {
        field(out, 0, key, value);
    }
}

fn field(out: &mut String, depth: usize, key: &str, value: &Field) {
    match value {
        Field::Text(text) if text.is_empty() => {
            bullet(out, depth, &format!("{}: {}", key, EMPTY_MARKER))
        }
        Field::Text(text) => bullet(out, depth, &format!("{}: {}", key, text)),
        Field::List(items) => labeled_list(out, depth, key, items),
        Field::Group(group) if group.is_empty() => {
            bullet(out, depth, &format!("{}: {}", key, EMPTY_MARKER))
        }
        Field::Group(group) => {
            bullet(out, depth, &format!("{}:", key));
            for (inner_key, inner) in group.iter() {
                field(out, depth + 1, inner_key, inner);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::extract;
    use crate::normalize::normalize;
    use serde_json::json;
    use crate::extraction::CandidateLiteral;

    fn renderer() -> MarkdownRenderer {
        MarkdownRenderer::new(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap())
    }

    fn doc(value: serde_json::Value) -> CanonicalDocument {
        normalize(CandidateLiteral::new(value))
    }

    #[test]
    fn test_empty_document_layout() {
        let rendered = renderer().render(&CanonicalDocument::default());
        let expected = "# Strategy Canvas\n\
\n\
Generated on 2024-03-09\n\
\n\
## Stocks\n\
\n\
_None provided._\n\
\n\
## Flows\n\
\n\
_None provided._\n\
\n\
## Loops\n\
\n\
_None provided._\n\
\n\
## Context\n\
\n\
_None provided._\n\
\n\
## Insights\n\
\n\
_None provided._\n\
\n\
## Bottlenecks\n\
\n\
_None provided._\n\
\n\
## Opportunities\n\
\n\
_None provided._\n\
\n\
## Strategic Recommendation\n\
\n\
_None provided._\n";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_section_order_is_fixed() {
        let rendered = renderer().render(&doc(json!({
            "summary": {"strategic_recommendation": "Focus"},
            "context": {"trends": ["AI"]},
            "stocks": {"cash": "1"},
            "diagram": "graph TD; A-->B"
        })));
        let order = [
            "## Stocks",
            "## Flows",
            "## Loops",
            "## Context",
            "## Insights",
            "## Bottlenecks",
            "## Opportunities",
            "## Strategic Recommendation",
            "## Diagram",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|h| rendered.find(h).unwrap_or_else(|| panic!("missing {}", h)))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(rendered.ends_with("```mermaid\ngraph TD; A-->B\n```\n"));
    }

    #[test]
    fn test_nested_fields() {
        let rendered = renderer().render(&doc(json!({
            "stocks": {"people": ["Owner", "2 baristas"], "notes": ""},
            "flows": {"ops": {"bottleneck": "Morning rush"}},
            "loops": {"Quality": ["Reviews", "Traffic"]}
        })));
        assert!(rendered.contains("- people:\n  - Owner\n  - 2 baristas\n"));
        assert!(rendered.contains("- notes: _None provided._\n"));
        assert!(rendered.contains("- operations:\n  - bottleneck: Morning rush\n"));
        assert!(rendered.contains("- Quality leads to:\n  - Reviews\n  - Traffic\n"));
    }

    #[test]
    fn test_multiline_values_stay_under_their_bullet() {
        let rendered = renderer().render(&doc(json!({
            "stocks": {"assets": "Van\nOven"},
            "summary": {"strategic_recommendation": "Step one.\nStep two."}
        })));
        assert!(rendered.contains("- assets: Van\n  Oven\n"));
        assert!(rendered.contains("## Strategic Recommendation\n\nStep one.\nStep two.\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let document = doc(json!({
            "stocks": {"cash": "1000", "zeta": "z", "alpha": "a"},
            "loops": {"b": ["1"], "a": ["2"]}
        }));
        let r = renderer();
        assert_eq!(r.render(&document), r.render(&document));
        let rendered = r.render(&document);
        assert!(rendered.find("zeta").unwrap() < rendered.find("alpha").unwrap());
    }

    #[test]
    fn test_fenced_reply_end_to_end() {
        let raw = "Sure! ```json\n{\"Stocks\": {\"cash\": \"1000\"}, \"Summary\": {\"Insights\": \"grow\"}}\n```";
        let document = normalize(extract(raw).unwrap());
        let rendered = renderer().render(&document);
        assert!(rendered.contains("## Stocks\n\n- cash: 1000\n"));
        assert!(rendered.contains("## Insights\n\n- grow\n"));
        assert!(!rendered.contains("```mermaid"));
    }

    #[test]
    fn test_fence_without_language_tag() {
        let raw = "```\n{\"stocks\": {\"cash\": \"1000\"}}\n```";
        let rendered = renderer().render(&normalize(extract(raw).unwrap()));
        assert!(rendered.contains("- cash: 1000"));
    }
}
