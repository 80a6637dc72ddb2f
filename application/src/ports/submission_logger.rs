//! Port for structured submission logging.
//!
//! Defines the [`SubmissionLogger`] trait for recording what happened to a
//! submission (prompt sent, raw reply received, extraction outcome) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port keeps the raw model
//! replies in a machine-readable format (JSONL) so failed extractions can be
//! inspected and replayed with `--reply-file`.

use serde_json::Value;

/// A structured submission event for logging.
pub struct SubmissionEvent {
    /// Event type identifier (e.g., "prompt_sent", "reply_received").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl SubmissionEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging submission events to a structured log.
///
/// `log` is synchronous and non-fallible; implementations swallow write
/// failures so logging never aborts a generation.
pub trait SubmissionLogger: Send + Sync {
    /// Record a submission event.
    fn log(&self, event: SubmissionEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoSubmissionLogger;

impl SubmissionLogger for NoSubmissionLogger {
    fn log(&self, _event: SubmissionEvent) {}
}
