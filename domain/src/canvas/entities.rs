//! The canonical strategy canvas document.

use super::value_objects::{Field, Section};
use serde::Serialize;

/// Summary sub-document: what the model concluded from the canvas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub insights: Vec<String>,
    pub bottlenecks: Vec<String>,
    pub opportunities: Vec<String>,
    pub strategic_recommendation: String,
}

/// A schema-complete business model canvas (Entity)
///
/// Built once per submission by [`crate::normalize::normalize`] and never
/// modified afterwards. Every part is always present; an omitted part is
/// its empty form, so consumers never branch on absence.
///
/// Serializes to the same shape it is normalized from, which makes
/// normalization idempotent over its own output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CanonicalDocument {
    stocks: Section<Field>,
    flows: Section<Field>,
    loops: Section<Vec<String>>,
    context: Section<Vec<String>>,
    summary: Summary,
    diagram: String,
}

impl CanonicalDocument {
    pub(crate) fn new(
        stocks: Section<Field>,
        flows: Section<Field>,
        loops: Section<Vec<String>>,
        context: Section<Vec<String>>,
        summary: Summary,
        diagram: String,
    ) -> Self {
        Self {
            stocks,
            flows,
            loops,
            context,
            summary,
            diagram,
        }
    }

    /// Accumulated resources: cash, assets, people, partnerships, ...
    pub fn stocks(&self) -> &Section<Field> {
        &self.stocks
    }

    /// Rates of change: revenue, costs, acquisition channels, operations, ...
    pub fn flows(&self) -> &Section<Field> {
        &self.flows
    }

    /// Feedback loops: label to downstream effects, in causal order.
    pub fn loops(&self) -> &Section<Vec<String>> {
        &self.loops
    }

    /// External forces: trends, customer needs, competition, ...
    pub fn context(&self) -> &Section<Vec<String>> {
        &self.context
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Mermaid source, empty when the model did not draw one.
    pub fn diagram(&self) -> &str {
        &self.diagram
    }

    /// True when the model returned nothing recognizable at all.
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}
