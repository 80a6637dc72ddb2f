//! Process Reply use case.
//!
//! Runs the three pure pipeline stages over one raw model reply:
//! extraction, normalization and rendering. Only extraction can fail.

use canvas_domain::util::preview;
use canvas_domain::{
    CanonicalDocument, ExtractionError, MarkdownRenderer, Stage, extract, normalize,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::ports::progress::{NoProgress, ProgressNotifier};

/// Errors from the reply pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

impl PipelineError {
    /// Stage at which the pipeline stopped.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Extraction(_) => Stage::Extraction,
        }
    }
}

/// Result of a successful pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Structured canvas, for JSON or tree display.
    pub document: CanonicalDocument,
    /// Markdown export.
    pub rendered: String,
}

/// Use case for turning a raw reply into a canvas.
///
/// Stateless apart from the renderer's generation date, so one instance can
/// serve any number of replies.
#[derive(Debug, Clone, Copy)]
pub struct ProcessReplyUseCase {
    renderer: MarkdownRenderer,
}

impl ProcessReplyUseCase {
    pub fn new(renderer: MarkdownRenderer) -> Self {
        Self { renderer }
    }

    /// Run the pipeline without progress reporting.
    pub fn process(&self, raw: &str) -> Result<PipelineOutput, PipelineError> {
        self.process_with_progress(raw, &NoProgress)
    }

    pub fn process_with_progress(
        &self,
        raw: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<PipelineOutput, PipelineError> {
        progress.on_stage_start(Stage::Extraction);
        let candidate = match extract(raw) {
            Ok(candidate) => {
                progress.on_stage_complete(Stage::Extraction, true);
                candidate
            }
            Err(e) => {
                progress.on_stage_complete(Stage::Extraction, false);
                debug!(cleaned = %preview(e.cleaned_text(), 500), "Extraction failed");
                return Err(e.into());
            }
        };
        info!("Extracted data literal from {} byte reply", raw.len());

        progress.on_stage_start(Stage::Normalization);
        let document = normalize(candidate);
        progress.on_stage_complete(Stage::Normalization, true);

        progress.on_stage_start(Stage::Rendering);
        let rendered = self.renderer.render(&document);
        progress.on_stage_complete(Stage::Rendering, true);
        info!("Rendered canvas ({} bytes)", rendered.len());

        Ok(PipelineOutput { document, rendered })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas_domain::{Field, UnsafeConstruct};
    use chrono::NaiveDate;
    use std::sync::Mutex;

    fn use_case() -> ProcessReplyUseCase {
        ProcessReplyUseCase::new(MarkdownRenderer::new(
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        ))
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<(Stage, Option<bool>)>>,
    }

    impl ProgressNotifier for RecordingProgress {
        fn on_stage_start(&self, stage: Stage) {
            self.events.lock().unwrap().push((stage, None));
        }
        fn on_stage_complete(&self, stage: Stage, success: bool) {
            self.events.lock().unwrap().push((stage, Some(success)));
        }
    }

    #[test]
    fn test_fenced_reply_with_prose() {
        let raw = "Sure! ```json\n{\"Stocks\": {\"cash\": \"1000\"}, \"Summary\": {\"Insights\": \"grow\"}}\n```";
        let output = use_case().process(raw).unwrap();

        assert_eq!(output.document.stocks().get("cash"), Some(&Field::from("1000")));
        assert_eq!(output.document.summary().insights, vec!["grow"]);
        assert!(output.document.flows().is_empty());
        assert!(output.rendered.contains("Generated on 2025-01-02"));
        assert!(output.rendered.contains("- cash: 1000"));
        assert!(output.rendered.contains("## Insights\n\n- grow\n"));
    }

    #[test]
    fn test_plain_prose_is_malformed() {
        let err = use_case()
            .process("I'm sorry, I can't help with that.")
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Extraction(ExtractionError::Malformed { .. })
        ));
        assert_eq!(err.stage(), Stage::Extraction);
    }

    #[test]
    fn test_executable_reply_is_rejected() {
        let err = use_case()
            .process("{\"cash\": __import__('os').system('x')}")
            .unwrap_err();
        match err {
            PipelineError::Extraction(ExtractionError::UnsafeContent { construct, .. }) => {
                assert_eq!(construct, UnsafeConstruct::DunderName("__import__".into()));
            }
            other => panic!("expected unsafe content, got {other:?}"),
        }
    }

    #[test]
    fn test_python_style_reply() {
        let raw = "{'Stocks': {'cash': '500', 'people': ('Ana', 'Bo',)}, 'Insights': None}";
        let output = use_case().process(raw).unwrap();
        assert_eq!(
            output.document.stocks().get("people"),
            Some(&Field::List(vec!["Ana".into(), "Bo".into()]))
        );
        assert!(output.document.summary().insights.is_empty());
    }

    #[test]
    fn test_progress_events() {
        let progress = RecordingProgress::default();
        use_case()
            .process_with_progress("{\"stocks\": {}}", &progress)
            .unwrap();
        let events = progress.events.into_inner().unwrap();
        assert_eq!(
            events,
            vec![
                (Stage::Extraction, None),
                (Stage::Extraction, Some(true)),
                (Stage::Normalization, None),
                (Stage::Normalization, Some(true)),
                (Stage::Rendering, None),
                (Stage::Rendering, Some(true)),
            ]
        );
    }

    #[test]
    fn test_failed_extraction_stops_progress() {
        let progress = RecordingProgress::default();
        let _ = use_case().process_with_progress("nothing here", &progress);
        let events = progress.events.into_inner().unwrap();
        assert_eq!(
            events,
            vec![(Stage::Extraction, None), (Stage::Extraction, Some(false))]
        );
    }
}
