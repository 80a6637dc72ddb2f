//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod logging;
mod output;
mod provider;
mod questionnaire;

pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use provider::FileProviderConfig;
pub use questionnaire::FileQuestionnaireConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("provider.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("provider.model cannot be empty")]
    EmptyModelName,

    #[error("provider.temperature must be between 0.0 and 2.0, got {0}")]
    TemperatureOutOfRange(f32),

    #[error("output.file_name cannot be empty")]
    EmptyFileName,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model provider settings
    pub provider: FileProviderConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Questionnaire override
    pub questionnaire: FileQuestionnaireConfig,
    /// Structured log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.provider.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.provider.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(ConfigValidationError::TemperatureOutOfRange(
                self.provider.temperature,
            ));
        }
        if self.output.file_name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyFileName);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas_domain::OutputFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[provider]
base_url = "http://localhost:11434/v1"
model = "llama3.1"
temperature = 0.2
timeout_seconds = 30

[output]
directory = "out"
format = "tree"
color = false

[questionnaire]
questions = ["What do you sell?", "Who buys it?"]

[logging]
submission_log = "canvas.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.model, "llama3.1");
        assert_eq!(config.provider.timeout_seconds, 30);
        assert_eq!(config.provider.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.output.format, Some(OutputFormat::Tree));
        assert!(!config.output.color);
        assert_eq!(config.questionnaire.questions.len(), 2);
        assert!(config.logging.submission_log.is_some());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[provider]\nmodel = \"gpt-4\"\n").unwrap();
        assert_eq!(config.provider.model, "gpt-4");
        // Defaults should apply
        assert_eq!(config.provider.temperature, 0.7);
        assert!(config.output.color);
        assert!(config.questionnaire.questions.is_empty());
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = FileConfig::default();
        config.provider.timeout_seconds = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));

        let mut config = FileConfig::default();
        config.provider.model = "  ".into();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyModelName));

        let mut config = FileConfig::default();
        config.provider.temperature = 2.5;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::TemperatureOutOfRange(2.5))
        );

        let mut config = FileConfig::default();
        config.output.file_name = String::new();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyFileName));
    }
}
