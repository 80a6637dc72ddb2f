//! Strategy canvas: the systems-thinking view of a business.
//!
//! - **Stocks**: accumulated resources
//! - **Flows**: rates of change
//! - **Loops**: feedback cycles
//! - **Context**: external forces

pub mod entities;
pub mod value_objects;

pub use entities::{CanonicalDocument, Summary};
pub use value_objects::{Field, Section};
