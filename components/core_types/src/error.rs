//! Error types for script processing.

use crate::SourcePosition;
use std::fmt;

/// The kind of error raised while processing a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Syntax error in the input JavaScript
    SyntaxError,
    /// Internal tool error
    InternalError,
}

/// An error with a message and an optional source position.
///
/// # Examples
///
/// ```
/// use core_types::{JsError, ErrorKind, SourcePosition};
///
/// let error = JsError {
///     kind: ErrorKind::SyntaxError,
///     message: "Unexpected token: ')'".to_string(),
///     source_position: Some(SourcePosition { line: 3, column: 14 }),
/// };
///
/// assert_eq!(error.to_string(), "SyntaxError at line 3, column 14: Unexpected token: ')'");
/// ```
#[derive(Debug, Clone)]
pub struct JsError {
    /// The type of error
    pub kind: ErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Source position where the error occurred
    pub source_position: Option<SourcePosition>,
}

impl fmt::Display for JsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::InternalError => "InternalError",
        };
        match self.source_position {
            Some(pos) => write!(
                f,
                "{} at line {}, column {}: {}",
                kind, pos.line, pos.column, self.message
            ),
            None => write!(f, "{}: {}", kind, self.message),
        }
    }
}

impl std::error::Error for JsError {}
