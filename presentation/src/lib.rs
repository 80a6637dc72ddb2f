//! Presentation layer for strategy-canvas
//!
//! This crate contains CLI definitions, the questionnaire form,
//! output formatters and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;
pub mod questionnaire;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use questionnaire::{FormError, QuestionnaireForm, ReedlineSource, read_answers_file};
