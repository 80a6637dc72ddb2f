//! Questionnaire collected from the business owner.
//!
//! - [`question::Questionnaire`]: the ordered business questions
//! - [`submission::Submission`]: validated answers, rendered as a transcript

pub mod question;
pub mod submission;

pub use question::{Question, Questionnaire};
pub use submission::{AnsweredQuestion, Submission, SubmissionError};
