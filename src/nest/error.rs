//! Error types for lexing, parsing and rendering nested-call strings
//!
//! Every failure is deterministic for a given input, so callers get the byte
//! offset of the offending token and nothing is retried.

use std::fmt;
use thiserror::Error;

/// Which side of a call pairing is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Imbalance {
    /// End of input reached with `count` calls still open.
    Unclosed { count: usize },
    /// A `)` appeared with no call open.
    UnmatchedClose,
}

impl fmt::Display for Imbalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Imbalance::Unclosed { count: 1 } => write!(f, "1 call left open"),
            Imbalance::Unclosed { count } => write!(f, "{} calls left open", count),
            Imbalance::UnmatchedClose => write!(f, "')' without a matching call"),
        }
    }
}

/// Errors produced while turning a flat nested-call string into output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unbalanced call nesting at offset {offset}: {imbalance}")]
    UnbalancedNesting { offset: usize, imbalance: Imbalance },

    #[error("malformed separator at offset {offset}: ',' must sit between two arguments of a call")]
    MalformedSeparator { offset: usize },

    #[error("unexpected {found} at offset {offset}, expected {expected}")]
    UnexpectedToken {
        offset: usize,
        found: String,
        expected: &'static str,
    },

    #[error("invalid character {found:?} at offset {offset}")]
    InvalidCharacter { offset: usize, found: String },

    #[error("nesting deeper than {limit} calls at offset {offset}")]
    NestingTooDeep { offset: usize, limit: usize },

    #[error("input contains no expression")]
    EmptyInput,

    #[error("invalid print options: {0}")]
    InvalidOption(String),

    #[error("format '{0}' not found")]
    FormatNotFound(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl FormatError {
    /// Byte offset into the source the error points at, when it has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            FormatError::UnbalancedNesting { offset, .. }
            | FormatError::MalformedSeparator { offset }
            | FormatError::UnexpectedToken { offset, .. }
            | FormatError::InvalidCharacter { offset, .. }
            | FormatError::NestingTooDeep { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}
