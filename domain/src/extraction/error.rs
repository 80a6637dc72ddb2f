//! Extraction error types

use thiserror::Error;

/// Executable-looking syntax found where only a data literal may appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsafeConstruct {
    /// `name(...)` or `value(...)`
    Call(String),
    /// `value.attr`
    AttributeAccess(String),
    /// `name[...]`
    Subscript(String),
    /// `__name__`
    DunderName(String),
    /// `f'...'` and friends
    FormatString,
    /// `lambda`, `import`, `not`, ...
    Keyword(String),
    /// Arithmetic, comparison or bitwise operator
    Operator(char),
}

impl UnsafeConstruct {
    /// Calls and dunder names are unambiguous even in free prose; the other
    /// constructs also occur in ordinary sentences ("Sure.").
    pub fn is_unambiguous(&self) -> bool {
        matches!(
            self,
            UnsafeConstruct::Call(_) | UnsafeConstruct::DunderName(_) | UnsafeConstruct::FormatString
        )
    }
}

impl std::fmt::Display for UnsafeConstruct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnsafeConstruct::Call(name) => write!(f, "call to `{}`", name),
            UnsafeConstruct::AttributeAccess(name) => write!(f, "attribute access on `{}`", name),
            UnsafeConstruct::Subscript(name) => write!(f, "subscript on `{}`", name),
            UnsafeConstruct::DunderName(name) => write!(f, "dunder name `{}`", name),
            UnsafeConstruct::FormatString => write!(f, "format string"),
            UnsafeConstruct::Keyword(word) => write!(f, "keyword `{}`", word),
            UnsafeConstruct::Operator(op) => write!(f, "operator `{}`", op),
        }
    }
}

/// Why a raw model reply could not be turned into a candidate literal.
///
/// Both variants carry the cleaned reply text (fences removed, trimmed) so
/// callers can show or log what was actually decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("reply is not a well-formed data literal: {reason}")]
    Malformed { reason: String, cleaned: String },

    #[error("reply contains executable syntax ({construct}) at offset {offset}")]
    UnsafeContent {
        construct: UnsafeConstruct,
        offset: usize,
        cleaned: String,
    },
}

impl ExtractionError {
    /// The cleaned reply text the decoder saw.
    pub fn cleaned_text(&self) -> &str {
        match self {
            ExtractionError::Malformed { cleaned, .. }
            | ExtractionError::UnsafeContent { cleaned, .. } => cleaned,
        }
    }

    pub fn is_unsafe(&self) -> bool {
        matches!(self, ExtractionError::UnsafeContent { .. })
    }
}
