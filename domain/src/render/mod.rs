//! Canvas rendering

pub mod markdown;

pub use markdown::MarkdownRenderer;
