//! Question and questionnaire value objects

use serde::{Deserialize, Serialize};

/// A single questionnaire prompt (Value Object)
///
/// Questions are shown to the business owner verbatim and echoed into the
/// transcript sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Question {
    content: String,
}

impl Question {
    /// Create a new question
    ///
    /// # Panics
    /// Panics if the content is empty or only whitespace
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        assert!(!content.trim().is_empty(), "Question cannot be empty");
        Self { content }
    }

    /// Try to create a new question, returning None if invalid
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self { content })
        }
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<&str> for Question {
    fn from(s: &str) -> Self {
        Question::new(s)
    }
}

/// The business questions asked before drafting a canvas.
const DEFAULT_QUESTIONS: [&str; 16] = [
    "What does your business sell?",
    "Who is your target customer?",
    "How do you currently acquire customers?",
    "What are your top 3 costs?",
    "What are your top 3 revenue sources?",
    "How much cash do you have on hand?",
    "What assets or equipment do you own?",
    "Who are your partners or suppliers?",
    "What's your monthly revenue (estimate is OK)?",
    "What's your biggest bottleneck?",
    "What sets you apart (if anything)?",
    "What frustrates your customers the most?",
    "What's something customers keep asking for?",
    "Who are your top competitors?",
    "What trends or changes are affecting your industry?",
    "What are your goals for the next 12 months?",
];

/// An ordered list of questions (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Questionnaire {
    questions: Vec<Question>,
}

impl Questionnaire {
    /// Build a questionnaire from custom question text.
    ///
    /// Blank entries are skipped; returns `None` when nothing usable remains.
    pub fn from_texts<I, S>(texts: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let questions: Vec<Question> = texts.into_iter().filter_map(Question::try_new).collect();
        if questions.is_empty() {
            None
        } else {
            Some(Self { questions })
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self {
            questions: DEFAULT_QUESTIONS.iter().map(|q| Question::new(*q)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_creation() {
        let q = Question::new("Who is your target customer?");
        assert_eq!(q.content(), "Who is your target customer?");
    }

    #[test]
    #[should_panic]
    fn test_empty_question_panics() {
        Question::new("");
    }

    #[test]
    fn test_try_new_empty() {
        assert!(Question::try_new("").is_none());
        assert!(Question::try_new("   ").is_none());
    }

    #[test]
    fn test_default_questionnaire() {
        let questionnaire = Questionnaire::default();
        assert_eq!(questionnaire.len(), 16);
        assert_eq!(
            questionnaire.questions()[0].content(),
            "What does your business sell?"
        );
    }

    #[test]
    fn test_from_texts_skips_blank() {
        let questionnaire = Questionnaire::from_texts(["What do you sell?", "  ", "Who buys?"]).unwrap();
        assert_eq!(questionnaire.len(), 2);
        assert!(Questionnaire::from_texts(Vec::<String>::new()).is_none());
    }
}
