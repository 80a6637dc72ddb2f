//! Answer collection: interactive form or answers file

pub mod answers_file;
pub mod form;

pub use answers_file::read_answers_file;
pub use form::{FormError, LineSource, QuestionnaireForm, ReedlineSource};
