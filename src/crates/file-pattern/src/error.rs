use crate::span::Span;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PatternError>;

/// Failure to expand a single range expression such as `01-12:2`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("non-numeric step: {step:?}")]
    MalformedStep { step: String },

    #[error("step must be at least 1, got {step}")]
    NonPositiveStep { step: i64 },

    #[error("inverted range: {range}")]
    InvertedRange { range: String },

    #[error("mixed case range: {range}")]
    MixedCaseRange { range: String },

    #[error("non-literal range: {range}")]
    NonLiteralRange { range: String },
}

impl RangeError {
    pub fn malformed_step(step: impl Into<String>) -> Self {
        RangeError::MalformedStep { step: step.into() }
    }

    pub fn inverted(range: impl Into<String>) -> Self {
        RangeError::InvertedRange {
            range: range.into(),
        }
    }

    pub fn mixed_case(range: impl Into<String>) -> Self {
        RangeError::MixedCaseRange {
            range: range.into(),
        }
    }

    pub fn non_literal(range: impl Into<String>) -> Self {
        RangeError::NonLiteralRange {
            range: range.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatternError {
    #[error("{source} (block at {span})")]
    Range { source: RangeError, span: Span },

    #[error("value {value:?} contains reserved character {ch:?}")]
    ReservedCharacter { value: String, ch: char },

    #[error("cannot build matcher: {0}")]
    Matcher(#[from] regex::Error),

    #[error(
        "pattern {pattern:?} does not reproduce its input: {} missing, {} unexpected",
        .missing.len(),
        .unexpected.len()
    )]
    RoundTrip {
        pattern: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },
}

impl PatternError {
    pub fn in_block(source: RangeError, span: Span) -> Self {
        PatternError::Range { source, span }
    }

    /// Location of the offending block, when the error came from one
    pub fn span(&self) -> Option<Span> {
        match self {
            PatternError::Range { span, .. } => Some(*span),
            _ => None,
        }
    }
}
