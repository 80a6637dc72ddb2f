//! Questionnaire configuration from TOML (`[questionnaire]` section)

use canvas_domain::Questionnaire;
use serde::{Deserialize, Serialize};

/// Raw questionnaire configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQuestionnaireConfig {
    /// Replacement question list; the built-in questions are used when empty
    pub questions: Vec<String>,
}

impl FileQuestionnaireConfig {
    /// Build the questionnaire to ask.
    pub fn to_questionnaire(&self) -> Questionnaire {
        Questionnaire::from_texts(self.questions.iter().cloned()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_uses_builtin_questions() {
        let config = FileQuestionnaireConfig::default();
        assert_eq!(config.to_questionnaire(), Questionnaire::default());
    }

    #[test]
    fn test_custom_questions() {
        let config = FileQuestionnaireConfig {
            questions: vec!["What do you sell?".into(), "".into()],
        };
        let questionnaire = config.to_questionnaire();
        assert_eq!(questionnaire.len(), 1);
        assert_eq!(questionnaire.questions()[0].content(), "What do you sell?");
    }
}
