//! Application layer for strategy-canvas
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::GenerationParams;
pub use ports::{
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    progress::{NoProgress, ProgressNotifier},
    submission_logger::{NoSubmissionLogger, SubmissionEvent, SubmissionLogger},
};
pub use use_cases::generate_canvas::{
    GenerateCanvasError, GenerateCanvasInput, GenerateCanvasUseCase,
};
pub use use_cases::process_reply::{PipelineError, PipelineOutput, ProcessReplyUseCase};
