//! Application-level configuration.
//!
//! - [`GenerationParams`]: which model drafts the canvas and how long to wait

pub mod generation_params;

pub use generation_params::GenerationParams;
