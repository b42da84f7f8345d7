//! Structural expression substitution
//!
//! Replaces every subtree equal to a needle expression with a replacement.
//! Equality is derived structurally over the AST, which includes source
//! positions; strip positions from all three trees first so that equal
//! source text compares equal regardless of where it was written.

use parser::ast::*;

/// Replace every occurrence of `needle` in the program with a clone of
/// `replacement`. Returns the number of replacements made. Replaced
/// subtrees are not re-entered.
pub fn replace(program: &mut Program, needle: &Expression, replacement: &Expression) -> usize {
    let mut count = 0;
    for statement in &mut program.body {
        replace_in_statement(statement, needle, replacement, &mut count);
    }
    count
}

/// The first expression of the program, in statement order. This is how a
/// parsed snippet like `foo.bar` hands over the expression it denotes.
pub fn find_expression(program: &Program) -> Option<&Expression> {
    program.body.iter().find_map(first_in_statement)
}

/// Clear every source position in the program.
pub fn strip_positions(program: &mut Program) {
    for statement in &mut program.body {
        strip_statement(statement);
    }
}

/// Clear every source position in an expression tree.
pub fn strip_expression_positions(expression: &mut Expression) {
    strip_expression(expression);
}

fn first_in_statement(statement: &Statement) -> Option<&Expression> {
    match statement {
        Statement::ExpressionStatement { expression, .. } => Some(expression),
        Statement::VariableDeclaration { declarations, .. } => {
            declarations.iter().find_map(|d| d.init.as_ref())
        }
        Statement::ReturnStatement { argument, .. } => argument.as_ref(),
        Statement::ThrowStatement { argument, .. } => Some(argument),
        Statement::IfStatement { test, .. } => Some(test),
        Statement::WhileStatement { test, .. } => Some(test),
        Statement::DoWhileStatement { test, .. } => Some(test),
        Statement::SwitchStatement { discriminant, .. } => Some(discriminant),
        Statement::WithStatement { object, .. } => Some(object),
        Statement::BlockStatement { body, .. }
        | Statement::FunctionDeclaration { body, .. } => body.iter().find_map(first_in_statement),
        Statement::LabeledStatement { body, .. } => first_in_statement(body),
        Statement::ForStatement { init, test, .. } => match init {
            Some(ForInit::Expression(expression)) => Some(expression),
            Some(ForInit::VariableDeclaration(declarations)) => declarations
                .iter()
                .find_map(|d| d.init.as_ref())
                .or(test.as_ref()),
            None => test.as_ref(),
        },
        Statement::ForInStatement { right, .. } => Some(right),
        Statement::TryStatement { block, .. } => block.iter().find_map(first_in_statement),
        Statement::EmptyStatement { .. }
        | Statement::BreakStatement { .. }
        | Statement::ContinueStatement { .. } => None,
    }
}

fn replace_in_statement(
    statement: &mut Statement,
    needle: &Expression,
    replacement: &Expression,
    count: &mut usize,
) {
    match statement {
        Statement::VariableDeclaration { declarations, .. } => {
            for declarator in declarations {
                if let Some(init) = &mut declarator.init {
                    replace_in_expression(init, needle, replacement, count);
                }
            }
        }
        Statement::FunctionDeclaration { body, .. } | Statement::BlockStatement { body, .. } => {
            for statement in body {
                replace_in_statement(statement, needle, replacement, count);
            }
        }
        Statement::ExpressionStatement { expression, .. } => {
            replace_in_expression(expression, needle, replacement, count)
        }
        Statement::IfStatement {
            test,
            consequent,
            alternate,
            ..
        } => {
            replace_in_expression(test, needle, replacement, count);
            replace_in_statement(consequent, needle, replacement, count);
            if let Some(alternate) = alternate {
                replace_in_statement(alternate, needle, replacement, count);
            }
        }
        Statement::WhileStatement { test, body, .. } => {
            replace_in_expression(test, needle, replacement, count);
            replace_in_statement(body, needle, replacement, count);
        }
        Statement::DoWhileStatement { body, test, .. } => {
            replace_in_statement(body, needle, replacement, count);
            replace_in_expression(test, needle, replacement, count);
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
                            replace_in_expression(init, needle, replacement, count);
                        }
                    }
                }
                Some(ForInit::Expression(expression)) => {
                    replace_in_expression(expression, needle, replacement, count)
                }
                None => {}
            }
            if let Some(test) = test {
                replace_in_expression(test, needle, replacement, count);
            }
            if let Some(update) = update {
                replace_in_expression(update, needle, replacement, count);
            }
            replace_in_statement(body, needle, replacement, count);
        }
        Statement::ForInStatement {
            left, right, body, ..
        } => {
            match left {
                ForInLeft::VariableDeclaration(declarator) => {
                    if let Some(init) = &mut declarator.init {
                        replace_in_expression(init, needle, replacement, count);
                    }
                }
                ForInLeft::Expression(expression) => {
                    replace_in_expression(expression, needle, replacement, count)
                }
            }
            replace_in_expression(right, needle, replacement, count);
            replace_in_statement(body, needle, replacement, count);
        }
        Statement::ReturnStatement { argument, .. } => {
            if let Some(argument) = argument {
                replace_in_expression(argument, needle, replacement, count);
            }
        }
        Statement::ThrowStatement { argument, .. } => {
            replace_in_expression(argument, needle, replacement, count)
        }
        Statement::TryStatement {
            block,
            handler,
            finalizer,
            ..
        } => {
            for statement in block {
                replace_in_statement(statement, needle, replacement, count);
            }
            if let Some(handler) = handler {
                for statement in &mut handler.body {
                    replace_in_statement(statement, needle, replacement, count);
                }
            }
            if let Some(finalizer) = finalizer {
                for statement in finalizer {
                    replace_in_statement(statement, needle, replacement, count);
                }
            }
        }
        Statement::SwitchStatement {
            discriminant,
            cases,
            ..
        } => {
            replace_in_expression(discriminant, needle, replacement, count);
            for case in cases {
                if let Some(test) = &mut case.test {
                    replace_in_expression(test, needle, replacement, count);
                }
                for statement in &mut case.consequent {
                    replace_in_statement(statement, needle, replacement, count);
                }
            }
        }
        Statement::WithStatement { object, body, .. } => {
            replace_in_expression(object, needle, replacement, count);
            replace_in_statement(body, needle, replacement, count);
        }
        Statement::LabeledStatement { body, .. } => {
            replace_in_statement(body, needle, replacement, count)
        }
        Statement::EmptyStatement { .. }
        | Statement::BreakStatement { .. }
        | Statement::ContinueStatement { .. } => {}
    }
}

fn replace_in_expression(
    expression: &mut Expression,
    needle: &Expression,
    replacement: &Expression,
    count: &mut usize,
) {
    if expression == needle {
        *expression = replacement.clone();
        *count += 1;
        return;
    }
    match expression {
        Expression::ArrayExpression { elements, .. } => {
            for element in elements.iter_mut().flatten() {
                replace_in_expression(element, needle, replacement, count);
            }
        }
        Expression::ObjectExpression { properties, .. } => {
            for property in properties {
                replace_in_expression(&mut property.value, needle, replacement, count);
            }
        }
        Expression::FunctionExpression { body, .. } => {
            for statement in body {
                replace_in_statement(statement, needle, replacement, count);
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
        } => replace_in_expression(expression, needle, replacement, count),
        Expression::BinaryExpression { left, right, .. }
        | Expression::LogicalExpression { left, right, .. }
        | Expression::AssignmentExpression { left, right, .. } => {
            replace_in_expression(left, needle, replacement, count);
            replace_in_expression(right, needle, replacement, count);
        }
        Expression::ConditionalExpression {
            test,
            consequent,
            alternate,
            ..
        } => {
            replace_in_expression(test, needle, replacement, count);
            replace_in_expression(consequent, needle, replacement, count);
            replace_in_expression(alternate, needle, replacement, count);
        }
        Expression::CallExpression {
            callee, arguments, ..
        }
        | Expression::NewExpression {
            callee, arguments, ..
        } => {
            replace_in_expression(callee, needle, replacement, count);
            for argument in arguments {
                replace_in_expression(argument, needle, replacement, count);
            }
        }
        Expression::MemberExpression {
            object, property, ..
        } => {
            replace_in_expression(object, needle, replacement, count);
            replace_in_expression(property, needle, replacement, count);
        }
        Expression::SequenceExpression { expressions, .. } => {
            for expression in expressions {
                replace_in_expression(expression, needle, replacement, count);
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

fn strip_statement(statement: &mut Statement) {
    match statement {
        Statement::VariableDeclaration {
            declarations,
            position,
        } => {
            *position = None;
            for declarator in declarations {
                if let Some(init) = &mut declarator.init {
                    strip_expression(init);
                }
            }
        }
        Statement::FunctionDeclaration { body, position, .. } => {
            *position = None;
            for statement in body {
                strip_statement(statement);
            }
        }
        Statement::ExpressionStatement {
            expression,
            position,
        } => {
            *position = None;
            strip_expression(expression);
        }
        Statement::BlockStatement { body, position } => {
            *position = None;
            for statement in body {
                strip_statement(statement);
            }
        }
        Statement::EmptyStatement { position } => *position = None,
        Statement::IfStatement {
            test,
            consequent,
            alternate,
            position,
        } => {
            *position = None;
            strip_expression(test);
            strip_statement(consequent);
            if let Some(alternate) = alternate {
                strip_statement(alternate);
            }
        }
        Statement::WhileStatement {
            test,
            body,
            position,
        } => {
            *position = None;
            strip_expression(test);
            strip_statement(body);
        }
        Statement::DoWhileStatement {
            body,
            test,
            position,
        } => {
            *position = None;
            strip_statement(body);
            strip_expression(test);
        }
        Statement::ForStatement {
            init,
            test,
            update,
            body,
            position,
        } => {
            *position = None;
            match init {
                Some(ForInit::VariableDeclaration(declarations)) => {
                    for declarator in declarations {
                        if let Some(init) = &mut declarator.init {
                            strip_expression(init);
                        }
                    }
                }
                Some(ForInit::Expression(expression)) => strip_expression(expression),
                None => {}
            }
            if let Some(test) = test {
                strip_expression(test);
            }
            if let Some(update) = update {
                strip_expression(update);
            }
            strip_statement(body);
        }
        Statement::ForInStatement {
            left,
            right,
            body,
            position,
        } => {
            *position = None;
            match left {
                ForInLeft::VariableDeclaration(declarator) => {
                    if let Some(init) = &mut declarator.init {
                        strip_expression(init);
                    }
                }
                ForInLeft::Expression(expression) => strip_expression(expression),
            }
            strip_expression(right);
            strip_statement(body);
        }
        Statement::ReturnStatement { argument, position } => {
            *position = None;
            if let Some(argument) = argument {
                strip_expression(argument);
            }
        }
        Statement::BreakStatement { position, .. }
        | Statement::ContinueStatement { position, .. } => *position = None,
        Statement::ThrowStatement { argument, position } => {
            *position = None;
            strip_expression(argument);
        }
        Statement::TryStatement {
            block,
            handler,
            finalizer,
            position,
        } => {
            *position = None;
            for statement in block {
                strip_statement(statement);
            }
            if let Some(handler) = handler {
                for statement in &mut handler.body {
                    strip_statement(statement);
                }
            }
            if let Some(finalizer) = finalizer {
                for statement in finalizer {
                    strip_statement(statement);
                }
            }
        }
        Statement::SwitchStatement {
            discriminant,
            cases,
            position,
        } => {
            *position = None;
            strip_expression(discriminant);
            for case in cases {
                if let Some(test) = &mut case.test {
                    strip_expression(test);
                }
                for statement in &mut case.consequent {
                    strip_statement(statement);
                }
            }
        }
        Statement::WithStatement {
            object,
            body,
            position,
        } => {
            *position = None;
            strip_expression(object);
            strip_statement(body);
        }
        Statement::LabeledStatement { body, position, .. } => {
            *position = None;
            strip_statement(body);
        }
    }
}

fn strip_expression(expression: &mut Expression) {
    match expression {
        Expression::Identifier { position, .. }
        | Expression::NumericLiteral { position, .. }
        | Expression::StringLiteral { position, .. }
        | Expression::RegExpLiteral { position, .. }
        | Expression::BooleanLiteral { position, .. }
        | Expression::NullLiteral { position }
        | Expression::ThisExpression { position } => *position = None,
        Expression::ArrayExpression { elements, position } => {
            *position = None;
            for element in elements.iter_mut().flatten() {
                strip_expression(element);
            }
        }
        Expression::ObjectExpression {
            properties,
            position,
        } => {
            *position = None;
            for property in properties {
                strip_expression(&mut property.value);
            }
        }
        Expression::ParenthesizedExpression {
            expression: inner,
            position,
        } => {
            *position = None;
            strip_expression(inner);
        }
        Expression::FunctionExpression { body, position, .. } => {
            *position = None;
            for statement in body {
                strip_statement(statement);
            }
        }
        Expression::UnaryExpression {
            argument, position, ..
        }
        | Expression::UpdateExpression {
            argument, position, ..
        } => {
            *position = None;
            strip_expression(argument);
        }
        Expression::BinaryExpression {
            left,
            right,
            position,
            ..
        }
        | Expression::LogicalExpression {
            left,
            right,
            position,
            ..
        }
        | Expression::AssignmentExpression {
            left,
            right,
            position,
            ..
        } => {
            *position = None;
            strip_expression(left);
            strip_expression(right);
        }
        Expression::ConditionalExpression {
            test,
            consequent,
            alternate,
            position,
        } => {
            *position = None;
            strip_expression(test);
            strip_expression(consequent);
            strip_expression(alternate);
        }
        Expression::CallExpression {
            callee,
            arguments,
            position,
        }
        | Expression::NewExpression {
            callee,
            arguments,
            position,
        } => {
            *position = None;
            strip_expression(callee);
            for argument in arguments {
                strip_expression(argument);
            }
        }
        Expression::MemberExpression {
            object,
            property,
            position,
            ..
        } => {
            *position = None;
            strip_expression(object);
            strip_expression(property);
        }
        Expression::SequenceExpression {
            expressions,
            position,
        } => {
            *position = None;
            for expression in expressions {
                strip_expression(expression);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emitter::{emit, EmitOptions};
    use parser::Parser;

    fn parse_stripped(source: &str) -> Program {
        let mut program = Parser::new(source).parse().unwrap();
        strip_positions(&mut program);
        program
    }

    fn parse_needle(source: &str) -> Expression {
        let program = parse_stripped(source);
        find_expression(&program).unwrap().clone()
    }

    #[test]
    fn test_find_expression() {
        let program = parse_stripped("var x = a + 1;");
        assert!(matches!(
            find_expression(&program),
            Some(Expression::BinaryExpression { .. })
        ));
    }

    #[test]
    fn test_replace_identifier() {
        let mut program = parse_stripped("f(a + 1); g(a + 1); h(b);");
        let needle = parse_needle("a + 1");
        let replacement = parse_needle("z");
        let count = replace(&mut program, &needle, &replacement);
        assert_eq!(count, 2);
        assert_eq!(emit(&program, EmitOptions::default()), "f(z);g(z);h(b);");
    }

    #[test]
    fn test_positions_do_not_block_matches() {
        // The needle is written on a different line than the occurrence
        let mut program = parse_stripped("x;\n\n\nfoo.bar();");
        let needle = parse_needle("foo.bar");
        let replacement = parse_needle("quux");
        assert_eq!(replace(&mut program, &needle, &replacement), 1);
        assert_eq!(emit(&program, EmitOptions::default()), "x;quux();");
    }

    #[test]
    fn test_replacement_is_not_reentered() {
        let mut program = parse_stripped("f(a);");
        let needle = parse_needle("a");
        let replacement = parse_needle("wrap(a)");
        assert_eq!(replace(&mut program, &needle, &replacement), 1);
        assert_eq!(emit(&program, EmitOptions::default()), "f(wrap(a));");
    }

    #[test]
    fn test_strip_makes_reparsed_trees_equal() {
        let first = parse_stripped("a +  b;");
        let second = parse_stripped("a\n+\nb;");
        assert_eq!(first, second);
    }
}
