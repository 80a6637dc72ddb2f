//! Prompt domain
//!
//! Templates for asking a model to draft a strategy canvas.

mod template;

pub use template::PromptTemplate;
