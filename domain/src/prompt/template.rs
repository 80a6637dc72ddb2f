//! Prompt templates for canvas generation

use crate::questionnaire::Submission;

/// Templates for the single canvas-drafting request
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the drafting request
    pub fn canvas_system() -> &'static str {
        "You are a strategic business analyst."
    }

    /// Shape of the reply the model is asked to produce.
    pub fn response_shape() -> &'static str {
        r#"{
  "stocks": {"cash": "...", "assets": "...", "people": ["..."], "partnerships": ["..."]},
  "flows": {
    "revenue": "...",
    "costs": ["..."],
    "acquisition_channels": ["..."],
    "operations": {"bottleneck": "..."}
  },
  "loops": {"<pattern>": ["<effect>", "..."]},
  "context": {"trends": ["..."], "customer_needs": ["..."], "competition": ["..."]},
  "summary": {
    "insights": ["..."],
    "bottlenecks": ["..."],
    "opportunities": ["..."],
    "strategic_recommendation": "..."
  },
  "diagram": "<optional mermaid graph of the loops>"
}"#
    }

    /// User prompt carrying the answered questionnaire
    pub fn canvas_prompt(submission: &Submission) -> String {
        format!(
            r#"You are advising a small business using Blue Ocean Strategy, mental models and systems thinking.

From the questionnaire below:

1. Extract key insights and patterns from the answers.
2. Identify bottlenecks, opportunities and reinforcing loops.
3. Suggest a strategic recommendation to stand out in the market.

Reply with a single JSON object in exactly this format and nothing else:
{}

Here is the questionnaire:
{}"#,
            Self::response_shape(),
            submission.transcript()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::Questionnaire;

    #[test]
    fn test_canvas_prompt_contains_transcript() {
        let questionnaire = Questionnaire::from_texts(["What do you sell?", "Who buys?"]).unwrap();
        let submission =
            Submission::new(&questionnaire, vec!["Coffee".into(), "Commuters".into()]).unwrap();

        let prompt = PromptTemplate::canvas_prompt(&submission);
        assert!(prompt.contains("Q1: What do you sell?\nA1: Coffee"));
        assert!(prompt.contains("Q2: Who buys?\nA2: Commuters"));
        assert!(prompt.contains("\"strategic_recommendation\""));
    }

    #[test]
    fn test_response_shape_is_valid_json() {
        let shape: serde_json::Value =
            serde_json::from_str(PromptTemplate::response_shape()).unwrap();
        assert!(shape.get("summary").is_some());
    }
}
