//! Unit tests for SourcePosition

use core_types::SourcePosition;

#[cfg(test)]
mod source_position_tests {
    use super::*;

    #[test]
    fn test_position_fields() {
        let pos = SourcePosition { line: 12, column: 4 };
        assert_eq!(pos.line, 12);
        assert_eq!(pos.column, 4);
    }

    #[test]
    fn test_position_constructor() {
        let pos = SourcePosition::new(1, 1);
        assert_eq!(pos, SourcePosition { line: 1, column: 1 });
    }

    #[test]
    fn test_position_is_copy() {
        let pos = SourcePosition::new(3, 7);
        let copied = pos;
        assert_eq!(pos, copied);
    }

    #[test]
    fn test_position_equality() {
        assert_eq!(SourcePosition::new(2, 5), SourcePosition::new(2, 5));
        assert_ne!(SourcePosition::new(2, 5), SourcePosition::new(2, 6));
        assert_ne!(SourcePosition::new(2, 5), SourcePosition::new(3, 5));
    }

    #[test]
    fn test_position_debug_format() {
        let text = format!("{:?}", SourcePosition::new(8, 9));
        assert!(text.contains('8'));
        assert!(text.contains('9'));
    }
}
