//! Domain layer for strategy-canvas
//!
//! This crate contains the core business logic: the questionnaire, the
//! canvas document, and the pipeline stages that turn a model reply into
//! that document. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Pipeline
//!
//! A raw model reply passes through three pure stages:
//!
//! 1. [`extraction::extract`]: strip fences and prose, decode a data literal
//!    without ever evaluating it
//! 2. [`normalize::normalize`]: coerce the literal into a
//!    [`CanonicalDocument`], repairing key and shape drift
//! 3. [`MarkdownRenderer::render`]: produce the markdown export
//!
//! Only the first stage can fail.

pub mod canvas;
pub mod config;
pub mod core;
pub mod extraction;
pub mod normalize;
pub mod prompt;
pub mod questionnaire;
pub mod render;
pub mod util;

// Re-export commonly used types
pub use canvas::{CanonicalDocument, Field, Section, Summary};
pub use config::OutputFormat;
pub use core::{model::Model, stage::Stage};
pub use extraction::{
    CandidateLiteral,
    error::{ExtractionError, UnsafeConstruct},
    extract,
};
pub use normalize::normalize;
pub use prompt::PromptTemplate;
pub use questionnaire::{AnsweredQuestion, Question, Questionnaire, Submission, SubmissionError};
pub use render::MarkdownRenderer;
