//! A completed questionnaire, ready to be sent to the model

use super::question::{Question, Questionnaire};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a set of answers cannot be submitted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("expected {expected} answers, got {actual}")]
    AnswerCountMismatch { expected: usize, actual: usize },

    #[error("question {number} is unanswered: {question}")]
    EmptyAnswer { number: usize, question: String },
}

/// One answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredQuestion {
    pub question: Question,
    pub answer: String,
}

/// Answers paired with their questions, in questionnaire order (Entity)
///
/// Construction guarantees one non-blank answer per question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    entries: Vec<AnsweredQuestion>,
}

impl Submission {
    pub fn new(
        questionnaire: &Questionnaire,
        answers: Vec<String>,
    ) -> Result<Self, SubmissionError> {
        if answers.len() != questionnaire.len() {
            return Err(SubmissionError::AnswerCountMismatch {
                expected: questionnaire.len(),
                actual: answers.len(),
            });
        }

        let mut entries = Vec::with_capacity(answers.len());
        for (index, (question, answer)) in questionnaire.iter().zip(answers).enumerate() {
            let answer = answer.trim().to_string();
            if answer.is_empty() {
                return Err(SubmissionError::EmptyAnswer {
                    number: index + 1,
                    question: question.content().to_string(),
                });
            }
            entries.push(AnsweredQuestion {
                question: question.clone(),
                answer,
            });
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[AnsweredQuestion] {
        &self.entries
    }

    /// Numbered `Qn:` / `An:` transcript embedded in the model prompt.
    pub fn transcript(&self) -> String {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                format!(
                    "Q{n}: {}\nA{n}: {}",
                    entry.question,
                    entry.answer,
                    n = i + 1
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
