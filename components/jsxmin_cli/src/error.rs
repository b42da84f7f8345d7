//! Error types for the CLI

use core_types::JsError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// The input could not be parsed
    #[error("{0}")]
    Js(#[from] JsError),

    /// File I/O error
    #[error("could not read input: {0}")]
    Io(#[from] std::io::Error),

    /// A `--replace` pattern contained no expression
    #[error("no expression found in pattern '{0}'")]
    EmptyPattern(String),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::ErrorKind;

    #[test]
    fn test_js_error_conversion() {
        let err: CliError = JsError {
            kind: ErrorKind::SyntaxError,
            message: "bad".to_string(),
            source_position: None,
        }
        .into();
        assert!(matches!(err, CliError::Js(_)));
        assert_eq!(err.to_string(), "SyntaxError: bad");
    }

    #[test]
    fn test_empty_pattern_message() {
        let err = CliError::EmptyPattern(";".to_string());
        assert!(err.to_string().contains("no expression"));
    }
}
