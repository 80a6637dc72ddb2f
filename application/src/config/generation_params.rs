//! Generation parameters for [`GenerateCanvasUseCase`](crate::use_cases::generate_canvas::GenerateCanvasUseCase).

use canvas_domain::Model;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters for one canvas generation.
///
/// `reply_timeout` bounds the whole model call, including session setup.
/// Adapters may enforce tighter per-request limits of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub model: Model,
    pub reply_timeout: Option<Duration>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: Model::default(),
            reply_timeout: Some(Duration::from_secs(120)),
        }
    }
}

impl GenerationParams {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_reply_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.reply_timeout = timeout;
        self
    }
}
