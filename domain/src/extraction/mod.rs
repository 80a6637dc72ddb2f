//! Response extraction: raw model reply to candidate data literal.
//!
//! The extractor is the only stage of the reply pipeline that can fail.
//! It never evaluates the reply; anything beyond literal syntax is
//! rejected as [`ExtractionError::UnsafeContent`].
//!
//! # Steps
//!
//! 1. Strip fenced-block delimiters anywhere in the text ([`cleanup::strip_fences`])
//! 2. Trim and locate bracketed literals, skipping prose and asides around them
//! 3. Decode strictly as JSON, then permissively ([`literal`])

pub mod cleanup;
pub mod error;
mod literal;

use cleanup::{find_literal_span, strip_fences};
use error::{ExtractionError, UnsafeConstruct};
use literal::{LiteralError, parse_permissive};
use serde_json::Value;
use tracing::debug;

/// An untyped nested structure decoded from a model reply.
///
/// Always a complete literal: extraction either produces one or fails.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateLiteral(Value);

impl CandidateLiteral {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for CandidateLiteral {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Extract a candidate literal from a raw model reply.
///
/// Every bracketed span is tried in order and the first one that decodes to
/// a mapping (or a list holding one) wins, so bracketed asides and footnotes
/// in leading prose do not hide the payload. When no span carries a mapping,
/// the first span that decoded at all is returned. Otherwise unsafe content
/// is reported ahead of malformed content.
pub fn extract(raw: &str) -> Result<CandidateLiteral, ExtractionError> {
    let stripped = strip_fences(raw);
    let cleaned = stripped.trim();

    if cleaned.is_empty() {
        return Err(ExtractionError::Malformed {
            reason: "reply is empty".to_string(),
            cleaned: String::new(),
        });
    }

    let mut fallback: Option<Value> = None;
    let mut first_unsafe: Option<(UnsafeConstruct, usize)> = None;
    let mut first_malformed: Option<String> = None;
    let mut search_from = 0;

    while let Some(span) = find_literal_span(cleaned, search_from) {
        let candidate = &cleaned[span.start..span.end];
        debug!(
            start = span.start,
            len = candidate.len(),
            "Decoding literal candidate"
        );

        match decode(candidate) {
            Ok(value) if carries_mapping(&value) => return Ok(CandidateLiteral::new(value)),
            Ok(value) => {
                debug!("Candidate holds no mapping, looking further");
                fallback.get_or_insert(value);
            }
            Err(LiteralError::Unsafe { construct, offset }) => {
                debug!("Candidate rejected: {} at offset {}", construct, span.start + offset);
                first_unsafe.get_or_insert((construct, span.start + offset));
            }
            Err(error) => {
                debug!("Candidate rejected: {}", error.describe());
                first_malformed.get_or_insert_with(|| error.describe());
            }
        }
        search_from = span.end;
    }

    if let Some(value) = fallback {
        return Ok(CandidateLiteral::new(value));
    }

    if let Some((construct, offset)) = first_unsafe {
        return Err(ExtractionError::UnsafeContent {
            construct,
            offset,
            cleaned: cleaned.to_string(),
        });
    }

    if let Some(reason) = first_malformed {
        return Err(ExtractionError::Malformed {
            reason,
            cleaned: cleaned.to_string(),
        });
    }

    // No bracketed literal at all: a bare JSON scalar is still a literal.
    if let Ok(value) = serde_json::from_str::<Value>(cleaned) {
        return Ok(CandidateLiteral::new(value));
    }

    // Prose rarely contains calls or dunder names; when it does, say so.
    if let Err(LiteralError::Unsafe { construct, offset }) = parse_permissive(cleaned)
        && construct.is_unambiguous()
    {
        return Err(ExtractionError::UnsafeContent {
            construct,
            offset,
            cleaned: cleaned.to_string(),
        });
    }

    Err(ExtractionError::Malformed {
        reason: "no object or array found".to_string(),
        cleaned: cleaned.to_string(),
    })
}

/// Whether a decoded span looks like a canvas rather than an aside.
fn carries_mapping(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Array(items) => items.iter().any(Value::is_object),
        _ => false,
    }
}

fn decode(candidate: &str) -> Result<Value, LiteralError> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => Ok(value),
        Err(strict) => {
            debug!("Strict decode failed ({}), trying permissive decode", strict);
            parse_permissive(candidate)
        }
    }
}
