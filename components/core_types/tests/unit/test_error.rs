//! Unit tests for JsError and ErrorKind

use core_types::{ErrorKind, JsError, SourcePosition};

#[cfg(test)]
mod error_kind_tests {
    use super::*;

    #[test]
    fn test_error_kind_syntax_error() {
        let kind = ErrorKind::SyntaxError;
        assert!(matches!(kind, ErrorKind::SyntaxError));
    }

    #[test]
    fn test_error_kind_internal_error() {
        let kind = ErrorKind::InternalError;
        assert!(matches!(kind, ErrorKind::InternalError));
    }

    #[test]
    fn test_error_kind_equality() {
        assert_eq!(ErrorKind::SyntaxError, ErrorKind::SyntaxError);
        assert_ne!(ErrorKind::SyntaxError, ErrorKind::InternalError);
    }
}

#[cfg(test)]
mod js_error_tests {
    use super::*;

    fn sample_error() -> JsError {
        JsError {
            kind: ErrorKind::SyntaxError,
            message: "Unexpected token: '}'".to_string(),
            source_position: Some(SourcePosition::new(4, 2)),
        }
    }

    #[test]
    fn test_error_fields() {
        let error = sample_error();
        assert_eq!(error.kind, ErrorKind::SyntaxError);
        assert_eq!(error.message, "Unexpected token: '}'");
        assert_eq!(error.source_position, Some(SourcePosition::new(4, 2)));
    }

    #[test]
    fn test_error_display_includes_position() {
        assert_eq!(
            sample_error().to_string(),
            "SyntaxError at line 4, column 2: Unexpected token: '}'"
        );
    }

    #[test]
    fn test_error_display_without_position() {
        let error = JsError {
            kind: ErrorKind::InternalError,
            message: "state mismatch".to_string(),
            source_position: None,
        };
        assert_eq!(error.to_string(), "InternalError: state mismatch");
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = sample_error();
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn test_error_is_cloneable() {
        let error = sample_error();
        let cloned = error.clone();
        assert_eq!(error.message, cloned.message);
    }
}
