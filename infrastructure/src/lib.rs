//! Infrastructure layer for strategy-canvas
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration loading and export.

pub mod config;
pub mod export;
pub mod logging;
pub mod openai;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileOutputFormat, FileProviderConfig, FileQuestionnaireConfig,
};
pub use export::{ExportError, MarkdownExporter};
pub use logging::JsonlSubmissionLogger;
pub use openai::{
    error::OpenAiError,
    gateway::{ApiKey, OpenAiConfig, OpenAiGateway},
    session::OpenAiSession,
};
