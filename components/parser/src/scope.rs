//! Scope analysis for JavaScript AST
//!
//! JavaScript hoists `var` and function declarations to the enclosing
//! function scope. The renaming passes need the full binding list of a scope
//! before they touch any identifier in it, so this walker collects bindings
//! up front, stopping at nested function boundaries.

use crate::ast::*;

/// Collects the bindings introduced by a function body or a whole program.
pub struct BindingCollector {
    names: Vec<String>,
}

impl BindingCollector {
    /// Bindings of a function scope: parameters first, then hoisted `var`
    /// and function declarations in source order. Duplicates are dropped.
    pub fn function_bindings(params: &[String], body: &[Statement]) -> Vec<String> {
        let mut collector = BindingCollector { names: Vec::new() };
        for param in params {
            collector.add(param);
        }
        collector.visit_statements(body);
        collector.names
    }

    /// Bindings declared at the top level of a program.
    pub fn program_bindings(program: &Program) -> Vec<String> {
        let mut collector = BindingCollector { names: Vec::new() };
        collector.visit_statements(&program.body);
        collector.names
    }

    fn add(&mut self, name: &str) {
        if !self.names.iter().any(|n| n == name) {
            self.names.push(name.to_string());
        }
    }

    fn visit_statements(&mut self, statements: &[Statement]) {
        for statement in statements {
            self.visit_statement(statement);
        }
    }

    fn visit_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::VariableDeclaration { declarations, .. } => {
                for declarator in declarations {
                    self.add(&declarator.name);
                }
            }
            // The name is a binding here, but the nested scope is not ours
            Statement::FunctionDeclaration { name, .. } => {
                self.add(name);
            }
            Statement::BlockStatement { body, .. } => self.visit_statements(body),
            Statement::IfStatement {
                consequent,
                alternate,
                ..
            } => {
                self.visit_statement(consequent);
                if let Some(alternate) = alternate {
                    self.visit_statement(alternate);
                }
            }
            Statement::WhileStatement { body, .. }
            | Statement::DoWhileStatement { body, .. }
            | Statement::WithStatement { body, .. }
            | Statement::LabeledStatement { body, .. } => self.visit_statement(body),
            Statement::ForStatement { init, body, .. } => {
                if let Some(ForInit::VariableDeclaration(declarations)) = init {
                    for declarator in declarations {
                        self.add(&declarator.name);
                    }
                }
                self.visit_statement(body);
            }
            Statement::ForInStatement { left, body, .. } => {
                if let ForInLeft::VariableDeclaration(declarator) = left {
                    self.add(&declarator.name);
                }
                self.visit_statement(body);
            }
            Statement::TryStatement {
                block,
                handler,
                finalizer,
                ..
            } => {
                self.visit_statements(block);
                if let Some(handler) = handler {
                    self.visit_statements(&handler.body);
                }
                if let Some(finalizer) = finalizer {
                    self.visit_statements(finalizer);
                }
            }
            Statement::SwitchStatement { cases, .. } => {
                for case in cases {
                    self.visit_statements(&case.consequent);
                }
            }
            Statement::ExpressionStatement { .. }
            | Statement::EmptyStatement { .. }
            | Statement::ReturnStatement { .. }
            | Statement::BreakStatement { .. }
            | Statement::ContinueStatement { .. }
            | Statement::ThrowStatement { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Parser;

    fn program(source: &str) -> Program {
        Parser::new(source).parse().unwrap()
    }

    #[test]
    fn test_program_bindings() {
        let program = program("var a = 1; function f() { var inner; } var b;");
        assert_eq!(
            BindingCollector::program_bindings(&program),
            vec!["a", "f", "b"]
        );
    }

    #[test]
    fn test_vars_hoist_out_of_blocks() {
        let program = program("if (x) { var y; } for (var i = 0; ; ) { var j; }");
        assert_eq!(
            BindingCollector::program_bindings(&program),
            vec!["y", "i", "j"]
        );
    }

    #[test]
    fn test_function_bindings_include_params() {
        let program = program("function f(a, b) { var c; function g() { var hidden; } }");
        let Statement::FunctionDeclaration { params, body, .. } = &program.body[0] else {
            panic!("expected function");
        };
        assert_eq!(
            BindingCollector::function_bindings(params, body),
            vec!["a", "b", "c", "g"]
        );
    }

    #[test]
    fn test_function_expressions_are_opaque() {
        let program = program("var f = function named() { var inner; };");
        assert_eq!(BindingCollector::program_bindings(&program), vec!["f"]);
    }

    #[test]
    fn test_for_in_var_binding() {
        let program = program("for (var key in obj) {}");
        assert_eq!(BindingCollector::program_bindings(&program), vec!["key"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let program = program("var a; var a; function a() {}");
        assert_eq!(BindingCollector::program_bindings(&program), vec!["a"]);
    }
}
