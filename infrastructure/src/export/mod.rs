//! Canvas export to disk

mod markdown_file;

pub use markdown_file::{ExportError, MarkdownExporter};
