//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: the language model asked to draft the canvas
//! - [`stage::Stage`]: steps a submission moves through

pub mod model;
pub mod stage;
