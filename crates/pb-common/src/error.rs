//! Compiler errors.

use thiserror::Error;

use crate::span::Location;

/// The one error type callers of `compile()` see. Syntax errors from the
/// parser are converted into it, and checking/emission stop at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{location}: {message}")]
pub struct CompilerError {
    pub message: String,
    pub location: Location,
}

impl CompilerError {
    pub fn new(message: impl Into<String>, location: Location) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }
}
