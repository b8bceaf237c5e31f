//! Domain validation errors

use std::fmt;

/// Errors raised when constructing domain values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A token points at a head outside the sentence
    InvalidHead {
        /// Index of the offending token
        token: usize,
        /// The out-of-range head index
        head: usize,
        /// Number of tokens in the sentence
        len: usize,
    },

    /// An entity span is empty or extends past the sentence
    InvalidSpan {
        /// Span start (token index)
        start: usize,
        /// Span end (exclusive token index)
        end: usize,
        /// Number of tokens in the sentence
        len: usize,
    },

    /// A label name outside the closed vocabulary
    UnknownLabel(String),

    /// A label that cannot appear in a classifier distribution
    NotAClass(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::InvalidHead { token, head, len } => write!(
                f,
                "token {} has head {} outside sentence of {} tokens",
                token, head, len
            ),
            DomainError::InvalidSpan { start, end, len } => write!(
                f,
                "entity span {}..{} invalid for sentence of {} tokens",
                start, end, len
            ),
            DomainError::UnknownLabel(name) => write!(f, "unknown label: {}", name),
            DomainError::NotAClass(name) => {
                write!(f, "label {} is not a classifier class", name)
            }
        }
    }
}

impl std::error::Error for DomainError {}
