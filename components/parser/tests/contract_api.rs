//! Contract tests for the parser API
//!
//! These tests verify the parser component implements its contract correctly.

use core_types::JsError;
use parser::{BindingCollector, Keyword, Lexer, Parser, Program, Token};

// =============================================================================
// Lexer Contract Tests
// =============================================================================

#[test]
fn test_lexer_new_creates_lexer() {
    let source = "var x = 42;";
    let _lexer = Lexer::new(source);
    // Should compile and create lexer
}

#[test]
fn test_lexer_next_token_returns_result() {
    let source = "var x = 42;";
    let mut lexer = Lexer::new(source);
    let result: Result<Token, JsError> = lexer.next_token();
    assert!(result.is_ok());
}

#[test]
fn test_lexer_peek_token_returns_ref() {
    let source = "var x = 42;";
    let mut lexer = Lexer::new(source);
    let result: Result<&Token, JsError> = lexer.peek_token();
    assert!(result.is_ok());
}

#[test]
fn test_token_identifier_variant() {
    let source = "myVar";
    let mut lexer = Lexer::new(source);
    let token = lexer.next_token().unwrap();
    assert!(matches!(token, Token::Identifier(_)));
    if let Token::Identifier(name) = token {
        assert_eq!(name, "myVar");
    }
}

#[test]
fn test_token_number_variant() {
    let source = "42.5";
    let mut lexer = Lexer::new(source);
    let token = lexer.next_token().unwrap();
    assert!(matches!(token, Token::Number(_)));
    if let Token::Number(n) = token {
        assert_eq!(n, 42.5);
    }
}

#[test]
fn test_token_string_variant() {
    let source = r#""hello""#;
    let mut lexer = Lexer::new(source);
    let token = lexer.next_token().unwrap();
    if let Token::String { value, raw } = token {
        assert_eq!(value, "hello");
        assert_eq!(raw, r#""hello""#);
    } else {
        panic!("expected string token");
    }
}

#[test]
fn test_token_keyword_variant() {
    let source = "var";
    let mut lexer = Lexer::new(source);
    let token = lexer.next_token().unwrap();
    assert_eq!(token, Token::Keyword(Keyword::Var));
}

#[test]
fn test_lexer_eof() {
    let mut lexer = Lexer::new("");
    assert_eq!(lexer.next_token().unwrap(), Token::EOF);
    // EOF repeats
    assert_eq!(lexer.next_token().unwrap(), Token::EOF);
}

// =============================================================================
// Parser Contract Tests
// =============================================================================

#[test]
fn test_parser_produces_program() {
    let mut parser = Parser::new("var x = 1;");
    let result: Result<Program, JsError> = parser.parse();
    let program = result.unwrap();
    assert_eq!(program.body.len(), 1);
}

#[test]
fn test_parser_empty_source() {
    let program = Parser::new("").parse().unwrap();
    assert!(program.body.is_empty());
}

#[test]
fn test_parser_reports_error_with_position() {
    let err = Parser::new("var 1 = x;").parse().unwrap_err();
    assert!(err.source_position.is_some());
    assert!(err.message.contains("identifier"));
}

#[test]
fn test_parser_accepts_fixture_shapes() {
    // Every property-key shape at once: dot writes, quoted subscripts,
    // numeric and reserved-word keys
    let source = r#"
function Foo() {
  this.a = 0;
  this._prop1 = 1;
  this["_prop2"] = 2;
  this["3"] = 3;
  this["_should not rename"] = 4;
}

var x = new Foo();
print(x.a);
print(x['_prop1']);

var y = {
 _field1 : 1,
 "_field2" : 2,
 "3" : 3,
 "_should not rename" : 4,
 "void" : 5
};
"#;
    let program = Parser::new(source).parse().unwrap();
    assert_eq!(program.body.len(), 5);
}

// =============================================================================
// Scope Contract Tests
// =============================================================================

#[test]
fn test_binding_collector_program() {
    let program = Parser::new("var a; function b() {}").parse().unwrap();
    let bindings = BindingCollector::program_bindings(&program);
    assert_eq!(bindings, vec!["a".to_string(), "b".to_string()]);
}
