//! Generate Canvas use case.
//!
//! Validates the answers, asks the model for a canvas and runs the reply
//! through [`ProcessReplyUseCase`].

use crate::config::GenerationParams;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::ProgressNotifier;
use crate::ports::submission_logger::{NoSubmissionLogger, SubmissionEvent, SubmissionLogger};
use crate::use_cases::process_reply::{PipelineError, PipelineOutput, ProcessReplyUseCase};
use canvas_domain::{PromptTemplate, Questionnaire, Stage, Submission, SubmissionError};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while generating a canvas.
#[derive(Error, Debug)]
pub enum GenerateCanvasError {
    #[error("Invalid answers: {0}")]
    Submission(#[from] SubmissionError),

    #[error("Model call failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Input for the [`GenerateCanvasUseCase`].
#[derive(Debug, Clone)]
pub struct GenerateCanvasInput {
    pub questionnaire: Questionnaire,
    /// One answer per question, in order.
    pub answers: Vec<String>,
    pub params: GenerationParams,
}

impl GenerateCanvasInput {
    pub fn new(questionnaire: Questionnaire, answers: Vec<String>) -> Self {
        Self {
            questionnaire,
            answers,
            params: GenerationParams::default(),
        }
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }
}

/// Use case for generating a strategy canvas from questionnaire answers.
///
/// 1. Validate the answers into a [`Submission`]
/// 2. Open a session with the canvas system prompt
/// 3. Send the questionnaire transcript and wait for the raw reply
/// 4. Extract, normalize and render the reply
pub struct GenerateCanvasUseCase {
    gateway: Arc<dyn LlmGateway>,
    pipeline: ProcessReplyUseCase,
    submission_logger: Arc<dyn SubmissionLogger>,
}

impl GenerateCanvasUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, pipeline: ProcessReplyUseCase) -> Self {
        Self {
            gateway,
            pipeline,
            submission_logger: Arc::new(NoSubmissionLogger),
        }
    }

    /// Create with a submission logger.
    pub fn with_submission_logger(mut self, logger: Arc<dyn SubmissionLogger>) -> Self {
        self.submission_logger = logger;
        self
    }

    pub async fn execute(
        &self,
        input: GenerateCanvasInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<PipelineOutput, GenerateCanvasError> {
        let submission = Submission::new(&input.questionnaire, input.answers)?;
        info!(
            "Generating canvas from {} answers with {}",
            submission.entries().len(),
            input.params.model
        );

        let prompt = PromptTemplate::canvas_prompt(&submission);
        self.submission_logger.log(SubmissionEvent::new(
            "prompt_sent",
            json!({
                "model": input.params.model.to_string(),
                "prompt_bytes": prompt.len(),
            }),
        ));

        progress.on_stage_start(Stage::ModelCall);
        let reply = match self.ask_model(&input.params, &prompt).await {
            Ok(reply) => {
                progress.on_stage_complete(Stage::ModelCall, true);
                reply
            }
            Err(e) => {
                progress.on_stage_complete(Stage::ModelCall, false);
                warn!("Model call failed: {}", e);
                self.submission_logger.log(SubmissionEvent::new(
                    "model_call_failed",
                    json!({ "error": e.to_string() }),
                ));
                return Err(e.into());
            }
        };
        debug!("Received {} byte reply", reply.len());
        self.submission_logger.log(SubmissionEvent::new(
            "reply_received",
            json!({ "reply": reply }),
        ));

        let result = self.pipeline.process_with_progress(&reply, progress);
        match &result {
            Ok(output) => self.submission_logger.log(SubmissionEvent::new(
                "canvas_rendered",
                json!({ "rendered_bytes": output.rendered.len() }),
            )),
            Err(PipelineError::Extraction(e)) => self.submission_logger.log(SubmissionEvent::new(
                "extraction_failed",
                json!({ "error": e.to_string(), "cleaned": e.cleaned_text() }),
            )),
        }
        result.map_err(GenerateCanvasError::from)
    }

    async fn ask_model(
        &self,
        params: &GenerationParams,
        prompt: &str,
    ) -> Result<String, GatewayError> {
        let call = async {
            let session = self
                .gateway
                .create_session_with_system_prompt(&params.model, PromptTemplate::canvas_system())
                .await?;
            session.send(prompt).await
        };
        match params.reply_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| GatewayError::Timeout)?,
            None => call.await,
        }
    }
}
