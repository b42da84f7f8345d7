//! Full Pipeline Integration Tests
//!
//! Tests the complete flow: Source -> Parser -> AST -> Passes -> Emitter.

use jsxmin_cli::Runtime;

/// Helper: run the whole pipeline with the given switches
fn minify(source: &str, rename_globals: bool, rename_properties: bool) -> String {
    Runtime::new(rename_globals, rename_properties)
        .minify_source(source)
        .unwrap()
}

#[test]
fn test_default_pipeline_only_crushes_and_renames_locals() {
    assert_eq!(
        minify("function area(w, h) { return w * h; }", false, false),
        "function area(_L0,_L1){return _L0*_L1;}"
    );
}

#[test]
fn test_rename_globals_needs_the_marker() {
    let source = "var _hidden = 1; var visible = 2; use(_hidden, visible, __internal);";
    assert_eq!(
        minify(source, true, false),
        "var _0=1;var visible=2;use(_0,visible,__internal);"
    );
}

#[test]
fn test_rename_properties_spares_variables() {
    assert_eq!(
        minify("obj._key = obj._key + 1;", false, true),
        "obj._0=obj._0+1;"
    );
}

#[test]
fn test_whole_program_shapes_survive() {
    let source = r#"
var registry = {};

function register(name, handler) {
  if (!name) {
    throw "name required";
  }
  registry[name] = handler;
}

function dispatch(name) {
  for (var key in registry) {
    if (key === name) {
      return registry[key]();
    }
  }
  return null;
}
"#;
    assert_eq!(
        minify(source, false, false),
        concat!(
            "var registry={};",
            "function register(_L0,_L1){",
            "if(!_L0)throw \"name required\";",
            "registry[_L0]=_L1;",
            "}",
            "function dispatch(_L0){",
            "for(var _L1 in registry)if(_L1===_L0)return registry[_L1]();",
            "return null;",
            "}"
        )
    );
}

#[test]
fn test_pretty_pipeline() {
    let output = Runtime::new(false, false)
        .with_pretty(true)
        .minify_source("function f() { return 1; }")
        .unwrap();
    assert_eq!(output, "\nfunction f() {\n  return 1;\n}");
}

#[test]
fn test_preserve_lines_keeps_statement_lines() {
    let output = Runtime::new(false, false)
        .with_preserve_lines(true)
        .minify_source("first();\n\nsecond();\nthird();")
        .unwrap();
    assert_eq!(output, "first();\n\nsecond();\nthird();");
}

#[test]
fn test_parse_error_reports_position() {
    let error = Runtime::new(false, false)
        .minify_source("var x = ;\n")
        .unwrap_err();
    let message = error.to_string();
    assert!(message.contains("SyntaxError"), "got: {}", message);
    assert!(message.contains("line 1"), "got: {}", message);
}

#[test]
fn test_exports_pipeline() {
    let program = parser::Parser::new("var b = 1; function a() { var inner; } var c;")
        .parse()
        .unwrap();
    assert_eq!(minifier::collect_exports(&program), vec!["a", "b", "c"]);
}
