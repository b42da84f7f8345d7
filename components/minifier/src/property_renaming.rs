//! Property renaming pass
//!
//! Shortens property names that follow the single-underscore convention. A
//! property may be renamed only when its name could be written as a plain
//! identifier, so every access is guaranteed to reach it through a literal
//! key: dot access, a string-literal subscript, or an object-literal key.
//! Everything else keeps its name: names that are not valid identifiers
//! (`"_should not rename"`, `"3"`), reserved words (`"void"`), names without
//! the underscore marker, and properties reached through computed keys.
//!
//! Replacement names are drawn from a generator that skips every property
//! name observed anywhere in the program, so a rename can never collide with
//! an existing property.

use crate::name_gen::MinifiedNameGenerator;
use crate::variable_renaming::has_single_underscore_prefix;
use parser::ast::*;
use parser::{is_identifier_name, is_reserved_word};
use std::collections::{HashMap, HashSet};

/// The property renaming pass.
pub struct PropertyRenaming {
    renames: HashMap<String, String>,
    generator: MinifiedNameGenerator,
}

impl PropertyRenaming {
    /// Create the pass.
    pub fn new() -> Self {
        Self {
            renames: HashMap::new(),
            generator: MinifiedNameGenerator::new("_", HashSet::new()),
        }
    }

    /// Rename candidate properties throughout the program.
    pub fn process(&mut self, program: &mut Program) {
        let mut observed = HashSet::new();
        for statement in &program.body {
            collect_statement(statement, &mut observed);
        }
        self.generator = MinifiedNameGenerator::new("_", observed);

        for statement in &mut program.body {
            self.visit_statement(statement);
        }
    }

    /// The renames performed so far (for logging and tests).
    pub fn renames(&self) -> &HashMap<String, String> {
        &self.renames
    }

    /// Whether a property with this name may be renamed.
    fn is_candidate(name: &str) -> bool {
        has_single_underscore_prefix(name)
            && is_identifier_name(name)
            && !is_reserved_word(name)
    }

    fn target_for(&mut self, name: &str) -> String {
        if !self.renames.contains_key(name) {
            let target = self.generator.generate_next_name();
            log::debug!("renaming property {} -> {}", name, target);
            self.renames.insert(name.to_string(), target);
        }
        self.renames[name].clone()
    }

    fn rename_identifier_key(&mut self, name: &mut String) {
        if Self::is_candidate(name) {
            *name = self.target_for(name);
        }
    }

    /// Rewrite a string literal used as a property key, preserving the
    /// author's quote character.
    fn rename_string_key(&mut self, value: &mut String, raw: &mut String) {
        if !Self::is_candidate(value) {
            return;
        }
        let target = self.target_for(value);
        let quote = raw.chars().next().unwrap_or('"');
        *raw = format!("{}{}{}", quote, target, quote);
        *value = target;
    }

    fn visit_statement(&mut self, statement: &mut Statement) {
        match statement {
            Statement::VariableDeclaration { declarations, .. } => {
                for declarator in declarations {
                    if let Some(init) = &mut declarator.init {
                        self.visit_expression(init);
                    }
                }
            }

            Statement::FunctionDeclaration { body, .. } => {
                for statement in body {
                    self.visit_statement(statement);
                }
            }

            Statement::ExpressionStatement { expression, .. } => self.visit_expression(expression),

            Statement::BlockStatement { body, .. } => {
                for statement in body {
                    self.visit_statement(statement);
                }
            }

            Statement::IfStatement {
                test,
                consequent,
                alternate,
                ..
            } => {
                self.visit_expression(test);
                self.visit_statement(consequent);
                if let Some(alternate) = alternate {
                    self.visit_statement(alternate);
                }
            }

            Statement::WhileStatement { test, body, .. } => {
                self.visit_expression(test);
                self.visit_statement(body);
            }

            Statement::DoWhileStatement { body, test, .. } => {
                self.visit_statement(body);
                self.visit_expression(test);
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
                        for declarator in declarations {
                            if let Some(init) = &mut declarator.init {
                                self.visit_expression(init);
                            }
                        }
                    }
                    Some(ForInit::Expression(expression)) => self.visit_expression(expression),
                    None => {}
                }
                if let Some(test) = test {
                    self.visit_expression(test);
                }
                if let Some(update) = update {
                    self.visit_expression(update);
                }
                self.visit_statement(body);
            }

            Statement::ForInStatement {
                left, right, body, ..
            } => {
                match left {
                    ForInLeft::VariableDeclaration(declarator) => {
                        if let Some(init) = &mut declarator.init {
                            self.visit_expression(init);
                        }
                    }
                    ForInLeft::Expression(expression) => self.visit_expression(expression),
                }
                self.visit_expression(right);
                self.visit_statement(body);
            }

            Statement::ReturnStatement { argument, .. } => {
                if let Some(argument) = argument {
                    self.visit_expression(argument);
                }
            }

            Statement::ThrowStatement { argument, .. } => self.visit_expression(argument),

            Statement::TryStatement {
                block,
                handler,
                finalizer,
                ..
            } => {
                for statement in block {
                    self.visit_statement(statement);
                }
                if let Some(handler) = handler {
                    for statement in &mut handler.body {
                        self.visit_statement(statement);
                    }
                }
                if let Some(finalizer) = finalizer {
                    for statement in finalizer {
                        self.visit_statement(statement);
                    }
                }
            }

            Statement::SwitchStatement {
                discriminant,
                cases,
                ..
            } => {
                self.visit_expression(discriminant);
                for case in cases {
                    if let Some(test) = &mut case.test {
                        self.visit_expression(test);
                    }
                    for statement in &mut case.consequent {
                        self.visit_statement(statement);
                    }
                }
            }

            Statement::WithStatement { object, body, .. } => {
                self.visit_expression(object);
                self.visit_statement(body);
            }

            Statement::LabeledStatement { body, .. } => self.visit_statement(body),

            Statement::EmptyStatement { .. }
            | Statement::BreakStatement { .. }
            | Statement::ContinueStatement { .. } => {}
        }
    }

    fn visit_expression(&mut self, expression: &mut Expression) {
        match expression {
            Expression::MemberExpression {
                object,
                property,
                computed,
                ..
            } => {
                self.visit_expression(object);
                if *computed {
                    // A string-literal subscript is a stable key; rewrite it
                    // in place. Any other computed key is opaque.
                    if let Expression::StringLiteral { value, raw, .. } = property.as_mut() {
                        self.rename_string_key(value, raw);
                    } else {
                        self.visit_expression(property);
                    }
                } else if let Expression::Identifier { name, .. } = property.as_mut() {
                    self.rename_identifier_key(name);
                }
            }

            Expression::ObjectExpression { properties, .. } => {
                for property in properties {
                    match &mut property.key {
                        PropertyKey::Identifier(name) => self.rename_identifier_key(name),
                        PropertyKey::String { value, raw } => self.rename_string_key(value, raw),
                        PropertyKey::Number(_) => {}
                    }
                    self.visit_expression(&mut property.value);
                }
            }

            Expression::FunctionExpression { body, .. } => {
                for statement in body {
                    self.visit_statement(statement);
                }
            }

            Expression::ArrayExpression { elements, .. } => {
                for element in elements.iter_mut().flatten() {
                    self.visit_expression(element);
                }
            }

            Expression::ParenthesizedExpression { expression, .. }
            | Expression::UnaryExpression {
                argument: expression,
                ..
            }
            | Expression::UpdateExpression {
                argument: expression,
                ..
            } => self.visit_expression(expression),

            Expression::BinaryExpression { left, right, .. }
            | Expression::LogicalExpression { left, right, .. }
            | Expression::AssignmentExpression { left, right, .. } => {
                self.visit_expression(left);
                self.visit_expression(right);
            }

            Expression::ConditionalExpression {
                test,
                consequent,
                alternate,
                ..
            } => {
                self.visit_expression(test);
                self.visit_expression(consequent);
                self.visit_expression(alternate);
            }

            Expression::CallExpression {
                callee, arguments, ..
            }
            | Expression::NewExpression {
                callee, arguments, ..
            } => {
                self.visit_expression(callee);
                for argument in arguments {
                    self.visit_expression(argument);
                }
            }

            Expression::SequenceExpression { expressions, .. } => {
                for expression in expressions {
                    self.visit_expression(expression);
                }
            }

            Expression::Identifier { .. }
            | Expression::NumericLiteral { .. }
            | Expression::StringLiteral { .. }
            | Expression::RegExpLiteral { .. }
            | Expression::BooleanLiteral { .. }
            | Expression::NullLiteral { .. }
            | Expression::ThisExpression { .. } => {}
        }
    }
}

impl Default for PropertyRenaming {
    fn default() -> Self {
        Self::new()
    }
}

/// Record every property name the program mentions, candidate or not. The
/// generator skips all of them, so renamed properties cannot collide with
/// names that stay.
fn collect_statement(statement: &Statement, observed: &mut HashSet<String>) {
    match statement {
        Statement::VariableDeclaration { declarations, .. } => {
            for declarator in declarations {
                if let Some(init) = &declarator.init {
                    collect_expression(init, observed);
                }
            }
        }
        Statement::FunctionDeclaration { body, .. } => {
            for statement in body {
                collect_statement(statement, observed);
            }
        }
        Statement::ExpressionStatement { expression, .. } => {
            collect_expression(expression, observed)
        }
        Statement::BlockStatement { body, .. } => {
            for statement in body {
                collect_statement(statement, observed);
            }
        }
        Statement::IfStatement {
            test,
            consequent,
            alternate,
            ..
        } => {
            collect_expression(test, observed);
            collect_statement(consequent, observed);
            if let Some(alternate) = alternate {
                collect_statement(alternate, observed);
            }
        }
        Statement::WhileStatement { test, body, .. } => {
            collect_expression(test, observed);
            collect_statement(body, observed);
        }
        Statement::DoWhileStatement { body, test, .. } => {
            collect_statement(body, observed);
            collect_expression(test, observed);
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
                    for declarator in declarations {
                        if let Some(init) = &declarator.init {
                            collect_expression(init, observed);
                        }
                    }
                }
                Some(ForInit::Expression(expression)) => collect_expression(expression, observed),
                None => {}
            }
            if let Some(test) = test {
                collect_expression(test, observed);
            }
            if let Some(update) = update {
                collect_expression(update, observed);
            }
            collect_statement(body, observed);
        }
        Statement::ForInStatement {
            left, right, body, ..
        } => {
            match left {
                ForInLeft::VariableDeclaration(declarator) => {
                    if let Some(init) = &declarator.init {
                        collect_expression(init, observed);
                    }
                }
                ForInLeft::Expression(expression) => collect_expression(expression, observed),
            }
            collect_expression(right, observed);
            collect_statement(body, observed);
        }
        Statement::ReturnStatement { argument, .. } => {
            if let Some(argument) = argument {
                collect_expression(argument, observed);
            }
        }
        Statement::ThrowStatement { argument, .. } => collect_expression(argument, observed),
        Statement::TryStatement {
            block,
            handler,
            finalizer,
            ..
        } => {
            for statement in block {
                collect_statement(statement, observed);
            }
            if let Some(handler) = handler {
                for statement in &handler.body {
                    collect_statement(statement, observed);
                }
            }
            if let Some(finalizer) = finalizer {
                for statement in finalizer {
                    collect_statement(statement, observed);
                }
            }
        }
        Statement::SwitchStatement {
            discriminant,
            cases,
            ..
        } => {
            collect_expression(discriminant, observed);
            for case in cases {
                if let Some(test) = &case.test {
                    collect_expression(test, observed);
                }
                for statement in &case.consequent {
                    collect_statement(statement, observed);
                }
            }
        }
        Statement::WithStatement { object, body, .. } => {
            collect_expression(object, observed);
            collect_statement(body, observed);
        }
        Statement::LabeledStatement { body, .. } => collect_statement(body, observed),
        Statement::EmptyStatement { .. }
        | Statement::BreakStatement { .. }
        | Statement::ContinueStatement { .. } => {}
    }
}

fn collect_expression(expression: &Expression, observed: &mut HashSet<String>) {
    match expression {
        Expression::MemberExpression {
            object,
            property,
            computed,
            ..
        } => {
            collect_expression(object, observed);
            if *computed {
                if let Expression::StringLiteral { value, .. } = property.as_ref() {
                    observed.insert(value.clone());
                } else {
                    collect_expression(property, observed);
                }
            } else if let Expression::Identifier { name, .. } = property.as_ref() {
                observed.insert(name.clone());
            }
        }
        Expression::ObjectExpression { properties, .. } => {
            for property in properties {
                match &property.key {
                    PropertyKey::Identifier(name) => {
                        observed.insert(name.clone());
                    }
                    PropertyKey::String { value, .. } => {
                        observed.insert(value.clone());
                    }
                    PropertyKey::Number(_) => {}
                }
                collect_expression(&property.value, observed);
            }
        }
        Expression::FunctionExpression { body, .. } => {
            for statement in body {
                collect_statement(statement, observed);
            }
        }
        Expression::ArrayExpression { elements, .. } => {
            for element in elements.iter().flatten() {
                collect_expression(element, observed);
            }
        }
        Expression::ParenthesizedExpression { expression, .. }
        | Expression::UnaryExpression {
            argument: expression,
            ..
        }
        | Expression::UpdateExpression {
            argument: expression,
            ..
        } => collect_expression(expression, observed),
        Expression::BinaryExpression { left, right, .. }
        | Expression::LogicalExpression { left, right, .. }
        | Expression::AssignmentExpression { left, right, .. } => {
            collect_expression(left, observed);
            collect_expression(right, observed);
        }
        Expression::ConditionalExpression {
            test,
            consequent,
            alternate,
            ..
        } => {
            collect_expression(test, observed);
            collect_expression(consequent, observed);
            collect_expression(alternate, observed);
        }
        Expression::CallExpression {
            callee, arguments, ..
        }
        | Expression::NewExpression {
            callee, arguments, ..
        } => {
            collect_expression(callee, observed);
            for argument in arguments {
                collect_expression(argument, observed);
            }
        }
        Expression::SequenceExpression { expressions, .. } => {
            for expression in expressions {
                collect_expression(expression, observed);
            }
        }
        Expression::Identifier { .. }
        | Expression::NumericLiteral { .. }
        | Expression::StringLiteral { .. }
        | Expression::RegExpLiteral { .. }
        | Expression::BooleanLiteral { .. }
        | Expression::NullLiteral { .. }
        | Expression::ThisExpression { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emitter::{emit, EmitOptions};
    use parser::Parser;

    fn rename(source: &str) -> String {
        let mut program = Parser::new(source).parse().unwrap();
        PropertyRenaming::new().process(&mut program);
        emit(&program, EmitOptions::default())
    }

    #[test]
    fn test_dot_and_bracket_access_rename_consistently() {
        assert_eq!(
            rename("this._prop1 = 1; print(x._prop1); print(x['_prop1']);"),
            "this._0=1;print(x._0);print(x['_0']);"
        );
    }

    #[test]
    fn test_quote_style_is_preserved() {
        assert_eq!(
            rename("x[\"_prop2\"] = 2; y['_prop2'] = 3;"),
            "x[\"_0\"]=2;y['_0']=3;"
        );
    }

    #[test]
    fn test_object_literal_keys() {
        assert_eq!(
            rename("var y = { _field1: 1, \"_field2\": 2 }; print(y._field1, y['_field2']);"),
            "var y={_0:1,\"_1\":2};print(y._0,y['_1']);"
        );
    }

    #[test]
    fn test_non_identifier_names_are_untouched() {
        assert_eq!(
            rename("x['3'] = 3; x['_should not rename'] = 4;"),
            "x['3']=3;x['_should not rename']=4;"
        );
    }

    #[test]
    fn test_reserved_words_are_untouched() {
        assert_eq!(rename("print(y['void']);"), "print(y['void']);");
    }

    #[test]
    fn test_unmarked_names_are_untouched() {
        assert_eq!(rename("this.a = 0; print(x.a);"), "this.a=0;print(x.a);");
        assert_eq!(rename("x.__double = 1;"), "x.__double=1;");
    }

    #[test]
    fn test_computed_keys_are_opaque() {
        assert_eq!(rename("print(x[key]); x._name = 1;"), "print(x[key]);x._0=1;");
    }

    #[test]
    fn test_generated_names_avoid_observed_properties() {
        // `_0` exists in the source, so the generator must not hand it out
        // to another property; `_0` itself is a candidate and moves on.
        assert_eq!(rename("x['_0'] = 1; x._mine = 2;"), "x['_1']=1;x._2=2;");
    }

    #[test]
    fn test_renames_reach_function_bodies() {
        assert_eq!(
            rename("function f() { this._inner = 1; } f()._inner;"),
            "function f(){this._0=1;}f()._0;"
        );
    }
}
