//! Output format value object

use serde::{Deserialize, Serialize};

/// How a generated canvas is shown on the console
///
/// The markdown export file is written regardless of this choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The rendered markdown document (default)
    #[default]
    Markdown,
    /// The canonical document as pretty-printed JSON
    Json,
    /// A colored tree view of the canonical document
    Tree,
}
