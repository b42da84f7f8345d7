//! End-to-end tests for the CLI pipeline Runtime

use jsxmin_cli::Runtime;
use std::io::Write;

#[test]
fn test_minify_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "function add(first, second) {{ return first + second; }}").unwrap();

    let runtime = Runtime::new(false, false);
    let output = runtime
        .minify_file(file.path().to_str().unwrap())
        .unwrap();
    assert_eq!(output, "function add(_L0,_L1){return _L0+_L1;}");
}

#[test]
fn test_missing_file_is_an_io_error() {
    let runtime = Runtime::new(false, false);
    let result = runtime.minify_file("/nonexistent/input.js");
    assert!(matches!(result, Err(jsxmin_cli::CliError::Io(_))));
}

#[test]
fn test_full_pipeline_with_all_renames() {
    let source = "var _count = 0;\nfunction bump(by) { _count = _count + by; this._total = _count; }\n";
    let runtime = Runtime::new(true, true);
    let output = runtime.minify_source(source).unwrap();
    // `_count` and `_total` rename independently: variables and properties
    // live in different namespaces.
    assert_eq!(
        output,
        "var _0=0;function bump(_L0){_0=_0+_L0;this._0=_0;}"
    );
}
