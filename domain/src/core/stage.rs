//! Stages a submission moves through on its way to a rendered canvas

use serde::{Deserialize, Serialize};

/// One step of turning a questionnaire submission into a canvas.
///
/// Only [`Stage::ModelCall`] blocks on I/O; the three reply stages are
/// in-memory transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    ModelCall,
    Extraction,
    Normalization,
    Rendering,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::ModelCall => "model_call",
            Stage::Extraction => "extraction",
            Stage::Normalization => "normalization",
            Stage::Rendering => "rendering",
        }
    }

    /// Human-readable label used by progress displays.
    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::ModelCall => "Asking the model",
            Stage::Extraction => "Extracting reply",
            Stage::Normalization => "Normalizing canvas",
            Stage::Rendering => "Rendering markdown",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
