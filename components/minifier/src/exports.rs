//! Collection of a script's file-scope names
//!
//! Everything a script binds at file scope leaks into the shared global
//! namespace, so the set doubles as the script's export list.

use parser::{BindingCollector, Program};
use std::collections::BTreeSet;

/// The sorted set of names the program defines at file scope: `var` names
/// and function-declaration names. Function bodies are not entered; their
/// bindings are local.
pub fn collect_exports(program: &Program) -> Vec<String> {
    let names: BTreeSet<String> = BindingCollector::program_bindings(program)
        .into_iter()
        .collect();
    names.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use parser::Parser;

    fn exports(source: &str) -> Vec<String> {
        let program = Parser::new(source).parse().unwrap();
        collect_exports(&program)
    }

    #[test]
    fn test_sorted_unique_names() {
        assert_eq!(
            exports("var b; var a = 1; function c() { var hidden; } var a;"),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn test_hoisted_vars_count() {
        assert_eq!(exports("if (x) { var y = 1; }"), vec!["y"]);
    }

    #[test]
    fn test_function_expressions_do_not_export() {
        assert_eq!(exports("var f = function named() {};"), vec!["f"]);
    }
}
