//! Interactive questionnaire form

use canvas_domain::Questionnaire;
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from collecting answers
#[derive(Error, Debug)]
pub enum FormError {
    #[error("questionnaire cancelled")]
    Cancelled,

    #[error("could not read input: {0}")]
    Io(#[from] io::Error),

    #[error("could not read answers file {path}: {source}")]
    AnswersFile { path: PathBuf, source: io::Error },
}

/// Where answer lines come from.
///
/// `Ok(None)` means the user asked to stop (Ctrl-C / Ctrl-D).
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Line editor backed by reedline.
pub struct ReedlineSource {
    editor: Reedline,
}

impl ReedlineSource {
    pub fn new() -> Self {
        Self {
            editor: Reedline::create(),
        }
    }
}

impl Default for ReedlineSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for ReedlineSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(prompt.to_string()),
            DefaultPromptSegment::Empty,
        );
        match self.editor.read_line(&prompt)? {
            Signal::Success(line) => Ok(Some(line)),
            _ => Ok(None),
        }
    }
}

/// Asks every question in order, re-asking until each answer is non-blank.
pub struct QuestionnaireForm<S: LineSource> {
    source: S,
}

impl<S: LineSource> QuestionnaireForm<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn run(&mut self, questionnaire: &Questionnaire) -> Result<Vec<String>, FormError> {
        let total = questionnaire.len();
        let mut answers = Vec::with_capacity(total);

        println!(
            "{}",
            "Answer each question; press Ctrl-D to cancel.".dimmed()
        );
        for (index, question) in questionnaire.iter().enumerate() {
            println!(
                "\n{} {}",
                format!("[{}/{}]", index + 1, total).cyan(),
                question.content().bold()
            );
            loop {
                let Some(line) = self.source.read_line("> ")? else {
                    return Err(FormError::Cancelled);
                };
                let answer = line.trim();
                if answer.is_empty() {
                    println!("{}", "An answer is required.".yellow());
                    continue;
                }
                answers.push(answer.to_string());
                break;
            }
        }

        Ok(answers)
    }
}
