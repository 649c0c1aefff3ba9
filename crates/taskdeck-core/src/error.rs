//! Error types for parsing user-facing tokens into domain values.

use thiserror::Error;

/// A token did not name any known value of the expected kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {token}")]
pub struct ParseError {
    /// What was being parsed (`priority`, `sort option`, ...).
    pub kind: &'static str,
    /// The rejected input.
    pub token: String,
}

impl ParseError {
    pub(crate) fn new(kind: &'static str, token: &str) -> Self {
        Self {
            kind,
            token: token.to_owned(),
        }
    }
}
