//! Output configuration from TOML (`[output]` section)

use canvas_domain::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// Re-export OutputFormat from domain for convenience
pub use canvas_domain::OutputFormat as FileOutputFormat;

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Directory the markdown export is written to
    pub directory: PathBuf,
    /// Export file name
    pub file_name: String,
    /// Console format (uses domain type)
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            file_name: "strategy_canvas.md".to_string(),
            format: None,
            color: true,
        }
    }
}
