//! Constant folding and dead-branch pruning
//!
//! Only folds where the JavaScript result is statically certain: literal
//! operands, finite numeric results, and tests whose truthiness is known at
//! parse time. Division that produces a non-finite value is left in the
//! source, since `Infinity` and `NaN` are plain (shadowable) globals.

use core_types::SourcePosition;
use parser::ast::*;

/// The reduction pass.
pub struct CodeReduction;

impl CodeReduction {
    /// Create the pass.
    pub fn new() -> Self {
        Self
    }

    /// Simplify the program in place.
    pub fn process(&mut self, program: &mut Program) {
        reduce_statements(&mut program.body);
    }
}

impl Default for CodeReduction {
    fn default() -> Self {
        Self::new()
    }
}

fn reduce_statements(statements: &mut Vec<Statement>) {
    for statement in statements.iter_mut() {
        reduce_statement(statement);
    }
    statements.retain(|statement| !matches!(statement, Statement::EmptyStatement { .. }));
}

fn reduce_statement(statement: &mut Statement) {
    match statement {
        Statement::VariableDeclaration { declarations, .. } => {
            for declarator in declarations {
                if let Some(init) = &mut declarator.init {
                    reduce_expression(init);
                }
            }
        }
        Statement::FunctionDeclaration { body, .. } => reduce_statements(body),
        Statement::ExpressionStatement { expression, .. } => reduce_expression(expression),
        Statement::BlockStatement { body, .. } => reduce_statements(body),
        Statement::IfStatement {
            test,
            consequent,
            alternate,
            ..
        } => {
            reduce_expression(test);
            reduce_statement(consequent);
            if let Some(alternate) = alternate {
                reduce_statement(alternate);
            }
        }
        Statement::WhileStatement { test, body, .. } => {
            reduce_expression(test);
            reduce_statement(body);
        }
        Statement::DoWhileStatement { body, test, .. } => {
            reduce_statement(body);
            reduce_expression(test);
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
                            reduce_expression(init);
                        }
                    }
                }
                Some(ForInit::Expression(expression)) => reduce_expression(expression),
                None => {}
            }
            if let Some(test) = test {
                reduce_expression(test);
            }
            if let Some(update) = update {
                reduce_expression(update);
            }
            reduce_statement(body);
        }
        Statement::ForInStatement {
            left, right, body, ..
        } => {
            if let ForInLeft::VariableDeclaration(declarator) = left {
                if let Some(init) = &mut declarator.init {
                    reduce_expression(init);
                }
            }
            reduce_expression(right);
            reduce_statement(body);
        }
        Statement::ReturnStatement { argument, .. } => {
            if let Some(argument) = argument {
                reduce_expression(argument);
            }
        }
        Statement::ThrowStatement { argument, .. } => reduce_expression(argument),
        Statement::TryStatement {
            block,
            handler,
            finalizer,
            ..
        } => {
            reduce_statements(block);
            if let Some(handler) = handler {
                reduce_statements(&mut handler.body);
            }
            if let Some(finalizer) = finalizer {
                reduce_statements(finalizer);
            }
        }
        Statement::SwitchStatement {
            discriminant,
            cases,
            ..
        } => {
            reduce_expression(discriminant);
            for case in cases {
                if let Some(test) = &mut case.test {
                    reduce_expression(test);
                }
                reduce_statements(&mut case.consequent);
            }
        }
        Statement::WithStatement { object, body, .. } => {
            reduce_expression(object);
            reduce_statement(body);
        }
        Statement::LabeledStatement { body, .. } => reduce_statement(body),
        Statement::EmptyStatement { .. }
        | Statement::BreakStatement { .. }
        | Statement::ContinueStatement { .. } => {}
    }

    // Prune branches whose test is a known constant
    if let Statement::IfStatement {
        test,
        consequent,
        alternate,
        ..
    } = statement
    {
        match test.known_truthiness() {
            Some(true) => {
                let taken = std::mem::replace(
                    consequent.as_mut(),
                    Statement::EmptyStatement { position: None },
                );
                *statement = taken;
            }
            Some(false) => {
                *statement = match alternate.take() {
                    Some(branch) => *branch,
                    None => Statement::EmptyStatement { position: None },
                };
            }
            None => {}
        }
    }
}

fn reduce_expression(expression: &mut Expression) {
    // Children first, so folds can cascade upward
    match expression {
        Expression::ArrayExpression { elements, .. } => {
            for element in elements.iter_mut().flatten() {
                reduce_expression(element);
            }
        }
        Expression::ObjectExpression { properties, .. } => {
            for property in properties {
                reduce_expression(&mut property.value);
            }
        }
        Expression::FunctionExpression { body, .. } => reduce_statements(body),
        Expression::ParenthesizedExpression { expression, .. }
        | Expression::UnaryExpression {
            argument: expression,
            ..
        }
        | Expression::UpdateExpression {
            argument: expression,
            ..
        } => reduce_expression(expression),
        Expression::BinaryExpression { left, right, .. }
        | Expression::LogicalExpression { left, right, .. }
        | Expression::AssignmentExpression { left, right, .. } => {
            reduce_expression(left);
            reduce_expression(right);
        }
        Expression::ConditionalExpression {
            test,
            consequent,
            alternate,
            ..
        } => {
            reduce_expression(test);
            reduce_expression(consequent);
            reduce_expression(alternate);
        }
        Expression::CallExpression {
            callee, arguments, ..
        }
        | Expression::NewExpression {
            callee, arguments, ..
        } => {
            reduce_expression(callee);
            for argument in arguments {
                reduce_expression(argument);
            }
        }
        Expression::SequenceExpression { expressions, .. } => {
            for expression in expressions {
                reduce_expression(expression);
            }
        }
        Expression::Identifier { .. }
        | Expression::NumericLiteral { .. }
        | Expression::StringLiteral { .. }
        | Expression::RegExpLiteral { .. }
        | Expression::BooleanLiteral { .. }
        | Expression::NullLiteral { .. }
        | Expression::ThisExpression { .. }
        | Expression::MemberExpression { .. } => {}
    }

    if let Some(folded) = try_fold(expression) {
        *expression = folded;
    }
}

fn try_fold(expression: &mut Expression) -> Option<Expression> {
    match expression {
        // Parentheses around a literal carry nothing
        Expression::ParenthesizedExpression {
            expression: inner, ..
        } if is_literal(inner) => Some(take(inner)),

        Expression::UnaryExpression {
            operator: UnaryOperator::Not,
            argument,
            position,
        } => argument.known_truthiness().map(|value| Expression::BooleanLiteral {
            value: !value,
            position: *position,
        }),

        Expression::UnaryExpression {
            operator: UnaryOperator::Minus,
            argument,
            position,
        } => match argument.as_ref() {
            Expression::NumericLiteral { value, .. } => Some(Expression::NumericLiteral {
                value: -*value,
                position: *position,
            }),
            _ => None,
        },

        Expression::BinaryExpression {
            left,
            operator,
            right,
            position,
        } => fold_binary(left, *operator, right, *position),

        Expression::LogicalExpression {
            left,
            operator,
            right,
            ..
        } => {
            let truthy = left.known_truthiness()?;
            let keep_right = match operator {
                LogicalOperator::And => truthy,
                LogicalOperator::Or => !truthy,
            };
            Some(if keep_right { take(right) } else { take(left) })
        }

        Expression::ConditionalExpression {
            test,
            consequent,
            alternate,
            ..
        } => {
            let truthy = test.known_truthiness()?;
            Some(if truthy { take(consequent) } else { take(alternate) })
        }

        _ => None,
    }
}

fn fold_binary(
    left: &Expression,
    operator: BinaryOperator,
    right: &Expression,
    position: Option<SourcePosition>,
) -> Option<Expression> {
    match (left, right) {
        (
            Expression::NumericLiteral { value: l, .. },
            Expression::NumericLiteral { value: r, .. },
        ) => {
            let (l, r) = (*l, *r);
            let numeric = |value: f64| {
                value
                    .is_finite()
                    .then_some(Expression::NumericLiteral { value, position })
            };
            let boolean = |value: bool| Some(Expression::BooleanLiteral { value, position });
            match operator {
                BinaryOperator::Add => numeric(l + r),
                BinaryOperator::Sub => numeric(l - r),
                BinaryOperator::Mul => numeric(l * r),
                BinaryOperator::Div => numeric(l / r),
                BinaryOperator::Mod => numeric(l % r),
                BinaryOperator::Lt => boolean(l < r),
                BinaryOperator::LtEq => boolean(l <= r),
                BinaryOperator::Gt => boolean(l > r),
                BinaryOperator::GtEq => boolean(l >= r),
                BinaryOperator::Eq | BinaryOperator::StrictEq => boolean(l == r),
                BinaryOperator::NotEq | BinaryOperator::StrictNotEq => boolean(l != r),
                _ => None,
            }
        }
        (
            Expression::StringLiteral { value: l, .. },
            Expression::StringLiteral { value: r, .. },
        ) if operator == BinaryOperator::Add => {
            let combined = format!("{}{}", l, r);
            Some(Expression::StringLiteral {
                raw: quote_string(&combined),
                value: combined,
                position,
            })
        }
        _ => None,
    }
}

fn is_literal(expression: &Expression) -> bool {
    matches!(
        expression,
        Expression::NumericLiteral { .. }
            | Expression::StringLiteral { .. }
            | Expression::BooleanLiteral { .. }
            | Expression::NullLiteral { .. }
    )
}

fn take(slot: &mut Box<Expression>) -> Expression {
    std::mem::replace(slot.as_mut(), Expression::NullLiteral { position: None })
}

fn quote_string(value: &str) -> String {
    let mut raw = String::with_capacity(value.len() + 2);
    raw.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => raw.push_str("\\\\"),
            '"' => raw.push_str("\\\""),
            '\n' => raw.push_str("\\n"),
            '\r' => raw.push_str("\\r"),
            '\t' => raw.push_str("\\t"),
            _ => raw.push(ch),
        }
    }
    raw.push('"');
    raw
}

#[cfg(test)]
mod tests {
    use super::*;
    use emitter::{emit, EmitOptions};
    use parser::Parser;

    fn reduce(source: &str) -> String {
        let mut program = Parser::new(source).parse().unwrap();
        CodeReduction::new().process(&mut program);
        emit(&program, EmitOptions::default())
    }

    #[test]
    fn test_arithmetic_folds() {
        assert_eq!(reduce("var x = 1 + 2 * 3;"), "var x=7;");
        assert_eq!(reduce("var x = (1 + 2) * 3;"), "var x=9;");
        assert_eq!(reduce("var x = 10 % 4;"), "var x=2;");
    }

    #[test]
    fn test_division_by_zero_is_left_alone() {
        assert_eq!(reduce("var x = 1 / 0;"), "var x=1/0;");
        assert_eq!(reduce("var x = 0 / 0;"), "var x=0/0;");
    }

    #[test]
    fn test_comparisons_fold_to_booleans() {
        assert_eq!(reduce("var x = 1 < 2;"), "var x=true;");
        assert_eq!(reduce("var x = 1 === 2;"), "var x=false;");
    }

    #[test]
    fn test_string_concatenation() {
        assert_eq!(reduce("var s = 'a' + 'b';"), "var s=\"ab\";");
    }

    #[test]
    fn test_known_if_branches_are_pruned() {
        assert_eq!(reduce("if (true) { a(); } else { b(); }"), "{a();}");
        assert_eq!(reduce("if (false) { a(); } else { b(); }"), "{b();}");
        assert_eq!(reduce("if (false) a();"), "");
        assert_eq!(reduce("if (x) a();"), "if(x)a();");
    }

    #[test]
    fn test_logical_short_circuit() {
        assert_eq!(reduce("false && f();"), "false;");
        assert_eq!(reduce("0 || g();"), "g();");
        assert_eq!(reduce("1 || g();"), "1;");
    }

    #[test]
    fn test_conditional_with_known_test() {
        assert_eq!(reduce("var x = 1 ? a : b;"), "var x=a;");
        assert_eq!(reduce("var x = 0 ? a : b;"), "var x=b;");
        assert_eq!(reduce("var x = c ? a : b;"), "var x=c?a:b;");
    }

    #[test]
    fn test_not_of_literal() {
        assert_eq!(reduce("var x = !0;"), "var x=true;");
        assert_eq!(reduce("var x = !'s';"), "var x=false;");
    }

    #[test]
    fn test_empty_statements_are_dropped() {
        assert_eq!(reduce(";;var x;;"), "var x;");
        assert_eq!(reduce("function f() { ; return 1 + 1; }"), "function f(){return 2;}");
    }

    #[test]
    fn test_folds_cascade_through_branches() {
        assert_eq!(reduce("if (1 < 2) a();"), "a();");
    }
}
