//! Variable renaming pass
//!
//! Function-local bindings (parameters, `var`s, nested function names) are
//! renamed to `_L<hex>` names. Each function scope starts from a copy of its
//! parent's mapping, so inner references resolve through the innermost
//! binding. With `rename_globals` enabled, file-scope identifiers whose name
//! starts with exactly one underscore are renamed file-wide as well; the
//! single underscore is the opt-in marker that a name is private to the
//! deliverable and safe to shorten.
//!
//! Member-property positions and object-literal keys are never touched here;
//! those belong to the property renaming pass.

use crate::name_gen::MinifiedNameGenerator;
use parser::ast::*;
use parser::BindingCollector;
use std::collections::{HashMap, HashSet};

/// Whether a name is opted in to file-scope renaming: `_x...` but not `__x...`
pub(crate) fn has_single_underscore_prefix(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() > 1 && bytes[0] == b'_' && bytes[1] != b'_'
}

type Scope = HashMap<String, String>;

/// The variable renaming pass.
pub struct VariableRenaming {
    rename_globals: bool,
    file_scope: HashMap<String, String>,
    file_gen: MinifiedNameGenerator,
}

impl VariableRenaming {
    /// Create the pass. `rename_globals` opts underscore-prefixed file-scope
    /// names into renaming.
    pub fn new(rename_globals: bool) -> Self {
        Self {
            rename_globals,
            file_scope: HashMap::new(),
            file_gen: MinifiedNameGenerator::new("_", HashSet::new()),
        }
    }

    /// Rename bindings throughout the program.
    pub fn process(&mut self, program: &mut Program) {
        let scope = Scope::new();
        for statement in &mut program.body {
            self.visit_statement(statement, &scope);
        }
    }

    /// The file-scope renames performed so far (for logging and tests).
    pub fn file_renames(&self) -> &HashMap<String, String> {
        &self.file_scope
    }

    /// Build the scope of a function: a copy of the enclosing scope plus a
    /// fresh name for every binding not already mapped. Bindings that shadow
    /// an outer binding keep the outer replacement, which is safe because
    /// both names collapse to the same target.
    fn enter_function(&mut self, outer: &Scope, params: &[String], body: &[Statement]) -> Scope {
        let mut scope = outer.clone();
        for name in BindingCollector::function_bindings(params, body) {
            if !scope.contains_key(&name) {
                let target = format!("_L{:x}", scope.len());
                scope.insert(name, target);
            }
        }
        scope
    }

    fn rename_identifier(&mut self, name: &mut String, scope: &Scope) {
        if let Some(target) = scope.get(name) {
            *name = target.clone();
            return;
        }
        if self.rename_globals && has_single_underscore_prefix(name) {
            if !self.file_scope.contains_key(name) {
                let target = self.file_gen.generate_next_name();
                log::debug!("renaming global {} -> {}", name, target);
                self.file_scope.insert(name.clone(), target);
            }
            *name = self.file_scope[name.as_str()].clone();
        }
    }

    fn visit_function(
        &mut self,
        name: Option<&mut String>,
        params: &mut [String],
        body: &mut [Statement],
        outer: &Scope,
    ) {
        let mut scope = self.enter_function(outer, params, body);
        // A function expression's name binds inside its own scope
        if let Some(name) = name {
            if !scope.contains_key(name.as_str()) {
                let target = format!("_L{:x}", scope.len());
                scope.insert(name.clone(), target);
            }
            self.rename_identifier(name, &scope);
        }
        for param in params.iter_mut() {
            self.rename_identifier(param, &scope);
        }
        for statement in body {
            self.visit_statement(statement, &scope);
        }
    }

    fn visit_statement(&mut self, statement: &mut Statement, scope: &Scope) {
        match statement {
            Statement::VariableDeclaration { declarations, .. } => {
                self.visit_declarators(declarations, scope);
            }

            Statement::FunctionDeclaration {
                name, params, body, ..
            } => {
                // The name itself is a binding of the enclosing scope
                self.rename_identifier(name, scope);
                self.visit_function(None, params, body, scope);
            }

            Statement::ExpressionStatement { expression, .. } => {
                self.visit_expression(expression, scope)
            }

            Statement::BlockStatement { body, .. } => {
                for statement in body {
                    self.visit_statement(statement, scope);
                }
            }

            Statement::IfStatement {
                test,
                consequent,
                alternate,
                ..
            } => {
                self.visit_expression(test, scope);
                self.visit_statement(consequent, scope);
                if let Some(alternate) = alternate {
                    self.visit_statement(alternate, scope);
                }
            }

            Statement::WhileStatement { test, body, .. } => {
                self.visit_expression(test, scope);
                self.visit_statement(body, scope);
            }

            Statement::DoWhileStatement { body, test, .. } => {
                self.visit_statement(body, scope);
                self.visit_expression(test, scope);
            }

            Statement::ForStatement {
                init,
                test,
                update,
                body,
                ..
            } => {
                match init {
                    Some(ForInit::VariableDeclaration(declarations)) => {
                        self.visit_declarators(declarations, scope)
                    }
                    Some(ForInit::Expression(expression)) => {
                        self.visit_expression(expression, scope)
                    }
                    None => {}
                }
                if let Some(test) = test {
                    self.visit_expression(test, scope);
                }
                if let Some(update) = update {
                    self.visit_expression(update, scope);
                }
                self.visit_statement(body, scope);
            }

            Statement::ForInStatement {
                left, right, body, ..
            } => {
                match left {
                    ForInLeft::VariableDeclaration(declarator) => {
                        self.rename_identifier(&mut declarator.name, scope);
                        if let Some(init) = &mut declarator.init {
                            self.visit_expression(init, scope);
                        }
                    }
                    ForInLeft::Expression(expression) => self.visit_expression(expression, scope),
                }
                self.visit_expression(right, scope);
                self.visit_statement(body, scope);
            }

            Statement::ReturnStatement { argument, .. } => {
                if let Some(argument) = argument {
                    self.visit_expression(argument, scope);
                }
            }

            Statement::ThrowStatement { argument, .. } => {
                self.visit_expression(argument, scope)
            }

            Statement::TryStatement {
                block,
                handler,
                finalizer,
                ..
            } => {
                for statement in block {
                    self.visit_statement(statement, scope);
                }
                if let Some(handler) = handler {
                    self.rename_identifier(&mut handler.param, scope);
                    for statement in &mut handler.body {
                        self.visit_statement(statement, scope);
                    }
                }
                if let Some(finalizer) = finalizer {
                    for statement in finalizer {
                        self.visit_statement(statement, scope);
                    }
                }
            }

            Statement::SwitchStatement {
                discriminant,
                cases,
                ..
            } => {
                self.visit_expression(discriminant, scope);
                for case in cases {
                    if let Some(test) = &mut case.test {
                        self.visit_expression(test, scope);
                    }
                    for statement in &mut case.consequent {
                        self.visit_statement(statement, scope);
                    }
                }
            }

            Statement::WithStatement { object, body, .. } => {
                self.visit_expression(object, scope);
                self.visit_statement(body, scope);
            }

            Statement::LabeledStatement { body, .. } => self.visit_statement(body, scope),

            Statement::EmptyStatement { .. }
            | Statement::BreakStatement { .. }
            | Statement::ContinueStatement { .. } => {}
        }
    }

    fn visit_declarators(&mut self, declarations: &mut [VariableDeclarator], scope: &Scope) {
        for declarator in declarations {
            self.rename_identifier(&mut declarator.name, scope);
            if let Some(init) = &mut declarator.init {
                self.visit_expression(init, scope);
            }
        }
    }

    fn visit_expression(&mut self, expression: &mut Expression, scope: &Scope) {
        match expression {
            Expression::Identifier { name, .. } => self.rename_identifier(name, scope),

            Expression::MemberExpression {
                object,
                property,
                computed,
                ..
            } => {
                self.visit_expression(object, scope);
                // `x.prop` names a property, not a variable
                if *computed {
                    self.visit_expression(property, scope);
                }
            }

            Expression::ObjectExpression { properties, .. } => {
                for property in properties {
                    self.visit_expression(&mut property.value, scope);
                }
            }

            Expression::ArrayExpression { elements, .. } => {
                for element in elements.iter_mut().flatten() {
                    self.visit_expression(element, scope);
                }
            }

            Expression::FunctionExpression {
                name, params, body, ..
            } => {
                self.visit_function(name.as_mut(), params, body, scope);
            }

            Expression::ParenthesizedExpression { expression, .. }
            | Expression::UnaryExpression {
                argument: expression,
                ..
            }
            | Expression::UpdateExpression {
                argument: expression,
                ..
            } => self.visit_expression(expression, scope),

            Expression::BinaryExpression { left, right, .. }
            | Expression::LogicalExpression { left, right, .. }
            | Expression::AssignmentExpression { left, right, .. } => {
                self.visit_expression(left, scope);
                self.visit_expression(right, scope);
            }

            Expression::ConditionalExpression {
                test,
                consequent,
                alternate,
                ..
            } => {
                self.visit_expression(test, scope);
                self.visit_expression(consequent, scope);
                self.visit_expression(alternate, scope);
            }

            Expression::CallExpression {
                callee, arguments, ..
            }
            | Expression::NewExpression {
                callee, arguments, ..
            } => {
                self.visit_expression(callee, scope);
                for argument in arguments {
                    self.visit_expression(argument, scope);
                }
            }

            Expression::SequenceExpression { expressions, .. } => {
                for expression in expressions {
                    self.visit_expression(expression, scope);
                }
            }

            Expression::NumericLiteral { .. }
            | Expression::StringLiteral { .. }
            | Expression::RegExpLiteral { .. }
            | Expression::BooleanLiteral { .. }
            | Expression::NullLiteral { .. }
            | Expression::ThisExpression { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emitter::{emit, EmitOptions};
    use parser::Parser;

    fn rename(source: &str, rename_globals: bool) -> String {
        let mut program = Parser::new(source).parse().unwrap();
        VariableRenaming::new(rename_globals).process(&mut program);
        emit(&program, EmitOptions::default())
    }

    #[test]
    fn test_params_and_locals_are_renamed() {
        assert_eq!(
            rename("function f(a, b) { var c = a; return c + b; }", false),
            "function f(_L0,_L1){var _L2=_L0;return _L2+_L1;}"
        );
    }

    #[test]
    fn test_nested_scopes_inherit_renames() {
        assert_eq!(
            rename(
                "function f(x) { function g(y) { return x + y; } return g; }",
                false
            ),
            "function f(_L0){function _L1(_L2){return _L0+_L2;}return _L1;}"
        );
    }

    #[test]
    fn test_globals_untouched_without_flag() {
        assert_eq!(rename("var _private = 1; use(_private);", false), "var _private=1;use(_private);");
    }

    #[test]
    fn test_globals_renamed_with_flag() {
        assert_eq!(
            rename("var _private = 1; use(_private);", true),
            "var _0=1;use(_0);"
        );
    }

    #[test]
    fn test_double_underscore_is_not_a_candidate() {
        assert_eq!(rename("var __keep = 1;", true), "var __keep=1;");
    }

    #[test]
    fn test_property_positions_are_left_alone() {
        assert_eq!(
            rename("function f(o) { return o._secret; }", true),
            "function f(_L0){return _L0._secret;}"
        );
        assert_eq!(
            rename("var _o = { _key: 1 };", true),
            "var _0={_key:1};"
        );
    }

    #[test]
    fn test_catch_param_renames_consistently() {
        assert_eq!(
            rename("try { f(); } catch (_e) { log(_e); }", true),
            "try{f();}catch(_0){log(_0);}"
        );
    }

    #[test]
    fn test_named_function_expression() {
        assert_eq!(
            rename("var f = function again(n) { return n && again(n - 1); };", false),
            "var f=function _L1(_L0){return _L0&&_L1(_L0-1);};"
        );
    }

    #[test]
    fn test_for_in_binding() {
        assert_eq!(
            rename("function f(o) { for (var k in o) use(k); }", false),
            "function f(_L0){for(var _L1 in _L0)use(_L1);}"
        );
    }
}
