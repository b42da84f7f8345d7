//! AST-to-source printer
//!
//! The parser keeps explicit parenthesized-expression nodes, so the printer
//! never has to reconstruct operator precedence; it reproduces the tree
//! shape it is handed.

use crate::number::format_number;
use parser::ast::*;

/// Output shape options
#[derive(Debug, Clone, Copy, Default)]
pub struct EmitOptions {
    /// Indented output with spaces around operators
    pub pretty: bool,
    /// Pad with newlines so statements keep their original source lines
    pub preserve_lines: bool,
}

/// Print `program` with the given options.
pub fn emit(program: &Program, options: EmitOptions) -> String {
    Emitter::new(options).emit_program(program)
}

/// AST printer. One emitter prints one program.
pub struct Emitter {
    options: EmitOptions,
    out: String,
    line: u32,
}

impl Emitter {
    /// Create an emitter with the given options
    pub fn new(options: EmitOptions) -> Self {
        Self {
            options,
            out: String::new(),
            line: 1,
        }
    }

    /// Print the program and return the output text
    pub fn emit_program(mut self, program: &Program) -> String {
        self.emit_statement_list(&program.body, 0);
        self.out
    }

    fn write(&mut self, text: &str) {
        self.line += text.bytes().filter(|b| *b == b'\n').count() as u32;
        self.out.push_str(text);
    }

    fn indent(&mut self, indent: usize) {
        for _ in 0..indent {
            self.write("  ");
        }
    }

    /// Render a fragment through a sub-emitter, e.g. to inspect its first
    /// character before committing it to the output.
    fn render_to_string<F: FnOnce(&mut Emitter)>(&self, f: F) -> String {
        let mut sub = Emitter {
            options: self.options,
            out: String::new(),
            line: self.line,
        };
        f(&mut sub);
        sub.out
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn emit_statement_list(&mut self, statements: &[Statement], indent: usize) {
        for statement in statements {
            self.emit_indented_statement(statement, indent);
        }
    }

    fn emit_indented_statement(&mut self, statement: &Statement, indent: usize) {
        if self.options.pretty {
            self.write("\n");
            self.indent(indent);
        }
        if self.options.preserve_lines {
            if let Some(position) = statement.position() {
                while self.line < position.line {
                    self.write("\n");
                }
            }
        }
        self.emit_statement(statement, indent);
    }

    fn emit_statement(&mut self, statement: &Statement, indent: usize) {
        match statement {
            Statement::VariableDeclaration { declarations, .. } => {
                self.write("var ");
                self.emit_declarators(declarations, indent);
                self.write(";");
            }

            Statement::FunctionDeclaration {
                name, params, body, ..
            } => {
                self.write("function ");
                self.write(name);
                self.emit_params(params);
                self.emit_block(body, indent, true);
            }

            Statement::ExpressionStatement { expression, .. } => {
                self.emit_expression(expression, indent);
                self.write(";");
            }

            Statement::BlockStatement { body, .. } => {
                self.emit_block(body, indent, false);
            }

            Statement::EmptyStatement { .. } => self.write(";"),

            Statement::IfStatement {
                test,
                consequent,
                alternate,
                ..
            } => {
                self.write(if self.options.pretty { "if (" } else { "if(" });
                self.emit_expression(test, indent);
                self.write(")");
                self.emit_body(consequent, indent);
                if let Some(alternate) = alternate {
                    if self.options.pretty {
                        self.write(" else");
                        if matches!(alternate.as_ref(), Statement::IfStatement { .. }) {
                            self.write(" ");
                            self.emit_statement(alternate, indent);
                        } else {
                            self.emit_body(alternate, indent);
                        }
                    } else {
                        self.write("else");
                        let text =
                            self.render_to_string(|sub| sub.emit_body(alternate, indent));
                        if !text.starts_with('{') && !text.starts_with(';') {
                            self.write(" ");
                        }
                        self.write(&text);
                    }
                }
            }

            Statement::WhileStatement { test, body, .. } => {
                self.write(if self.options.pretty {
                    "while ("
                } else {
                    "while("
                });
                self.emit_expression(test, indent);
                self.write(")");
                self.emit_body(body, indent);
            }

            Statement::DoWhileStatement { body, test, .. } => {
                self.write("do");
                self.emit_braced(body, indent);
                self.write(if self.options.pretty {
                    " while ("
                } else {
                    "while("
                });
                self.emit_expression(test, indent);
                self.write(");");
            }

            Statement::ForStatement {
                init,
                test,
                update,
                body,
                ..
            } => {
                self.write(if self.options.pretty { "for (" } else { "for(" });
                match init {
                    Some(ForInit::VariableDeclaration(declarations)) => {
                        self.write("var ");
                        self.emit_declarators(declarations, indent);
                    }
                    Some(ForInit::Expression(expression)) => {
                        self.emit_expression(expression, indent)
                    }
                    None => {}
                }
                self.write(if self.options.pretty { "; " } else { ";" });
                if let Some(test) = test {
                    self.emit_expression(test, indent);
                }
                self.write(if self.options.pretty { "; " } else { ";" });
                if let Some(update) = update {
                    self.emit_expression(update, indent);
                }
                self.write(")");
                self.emit_body(body, indent);
            }

            Statement::ForInStatement {
                left, right, body, ..
            } => {
                self.write(if self.options.pretty { "for (" } else { "for(" });
                match left {
                    ForInLeft::VariableDeclaration(declarator) => {
                        self.write("var ");
                        self.emit_declarator(declarator, indent);
                    }
                    ForInLeft::Expression(expression) => {
                        self.emit_expression(expression, indent)
                    }
                }
                self.write(" in ");
                self.emit_expression(right, indent);
                self.write(")");
                self.emit_body(body, indent);
            }

            Statement::ReturnStatement { argument, .. } => {
                self.write("return");
                if let Some(argument) = argument {
                    self.write(" ");
                    self.emit_expression(argument, indent);
                }
                self.write(";");
            }

            Statement::BreakStatement { label, .. } => {
                self.write("break");
                if let Some(label) = label {
                    self.write(" ");
                    self.write(label);
                }
                self.write(";");
            }

            Statement::ContinueStatement { label, .. } => {
                self.write("continue");
                if let Some(label) = label {
                    self.write(" ");
                    self.write(label);
                }
                self.write(";");
            }

            Statement::ThrowStatement { argument, .. } => {
                self.write("throw ");
                self.emit_expression(argument, indent);
                self.write(";");
            }

            Statement::TryStatement {
                block,
                handler,
                finalizer,
                ..
            } => {
                self.write("try");
                self.emit_block(block, indent, true);
                if let Some(handler) = handler {
                    self.write(if self.options.pretty {
                        " catch ("
                    } else {
                        "catch("
                    });
                    self.write(&handler.param);
                    self.write(")");
                    self.emit_block(&handler.body, indent, true);
                }
                if let Some(finalizer) = finalizer {
                    self.write(if self.options.pretty {
                        " finally"
                    } else {
                        "finally"
                    });
                    self.emit_block(finalizer, indent, true);
                }
            }

            Statement::SwitchStatement {
                discriminant,
                cases,
                ..
            } => {
                self.write(if self.options.pretty {
                    "switch ("
                } else {
                    "switch("
                });
                self.emit_expression(discriminant, indent);
                self.write(")");
                if self.options.pretty {
                    self.write(" {");
                    for case in cases {
                        self.write("\n");
                        self.indent(indent + 1);
                        self.emit_case_label(case, indent);
                        self.emit_statement_list(&case.consequent, indent + 2);
                    }
                    self.write("\n");
                    self.indent(indent);
                    self.write("}");
                } else {
                    self.write("{");
                    for case in cases {
                        self.emit_case_label(case, indent);
                        self.emit_statement_list(&case.consequent, indent);
                    }
                    self.write("}");
                }
            }

            Statement::WithStatement { object, body, .. } => {
                self.write(if self.options.pretty { "with (" } else { "with(" });
                self.emit_expression(object, indent);
                self.write(")");
                self.emit_body(body, indent);
            }

            Statement::LabeledStatement { label, body, .. } => {
                self.write(label);
                self.write(if self.options.pretty { ": " } else { ":" });
                self.emit_statement(body, indent);
            }
        }
    }

    fn emit_case_label(&mut self, case: &SwitchCase, indent: usize) {
        match &case.test {
            Some(test) => {
                self.write("case ");
                self.emit_expression(test, indent);
                self.write(":");
            }
            None => self.write("default:"),
        }
    }

    fn emit_declarators(&mut self, declarations: &[VariableDeclarator], indent: usize) {
        for (i, declarator) in declarations.iter().enumerate() {
            if i > 0 {
                self.write(if self.options.pretty { ", " } else { "," });
            }
            self.emit_declarator(declarator, indent);
        }
    }

    fn emit_declarator(&mut self, declarator: &VariableDeclarator, indent: usize) {
        self.write(&declarator.name);
        if let Some(init) = &declarator.init {
            self.write(if self.options.pretty { " = " } else { "=" });
            self.emit_expression(init, indent);
        }
    }

    fn emit_params(&mut self, params: &[String]) {
        self.write("(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.write(if self.options.pretty { ", " } else { "," });
            }
            self.write(param);
        }
        self.write(")");
    }

    /// A braces-required body (function, try, do-while). In pretty mode the
    /// opening brace is preceded by a space when attached to a header.
    fn emit_block(&mut self, body: &[Statement], indent: usize, attached: bool) {
        if self.options.pretty {
            if attached {
                self.write(" ");
            }
            if body.is_empty() {
                self.write("{}");
                return;
            }
            self.write("{");
            self.emit_statement_list(body, indent + 1);
            self.write("\n");
            self.indent(indent);
            self.write("}");
        } else {
            self.write("{");
            self.emit_statement_list(body, indent);
            self.write("}");
        }
    }

    fn emit_braced(&mut self, statement: &Statement, indent: usize) {
        match statement {
            Statement::BlockStatement { body, .. } => self.emit_block(body, indent, true),
            other => self.emit_block(std::slice::from_ref(other), indent, true),
        }
    }

    /// A body where braces are optional (if, while, for). Crushed output
    /// drops braces around zero- and one-statement blocks.
    fn emit_body(&mut self, statement: &Statement, indent: usize) {
        if self.options.pretty {
            match statement {
                Statement::EmptyStatement { .. } => self.write(";"),
                Statement::BlockStatement { body, .. } => self.emit_block(body, indent, true),
                other => self.emit_block(std::slice::from_ref(other), indent, true),
            }
            return;
        }
        match statement {
            Statement::EmptyStatement { .. } => self.write(";"),
            Statement::BlockStatement { body, .. } => match body.len() {
                0 => self.write(";"),
                1 => self.emit_statement(&body[0], indent),
                _ => self.emit_block(body, indent, false),
            },
            other => self.emit_statement(other, indent),
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn emit_expression(&mut self, expression: &Expression, indent: usize) {
        match expression {
            Expression::Identifier { name, .. } => self.write(name),

            Expression::NumericLiteral { value, .. } => {
                let text = format_number(*value);
                self.write(&text);
            }

            Expression::StringLiteral { raw, .. } => self.write(raw),

            Expression::RegExpLiteral { pattern, flags, .. } => {
                self.write("/");
                self.write(pattern);
                self.write("/");
                self.write(flags);
            }

            Expression::BooleanLiteral { value, .. } => {
                self.write(if *value { "true" } else { "false" })
            }

            Expression::NullLiteral { .. } => self.write("null"),

            Expression::ThisExpression { .. } => self.write("this"),

            Expression::ArrayExpression { elements, .. } => {
                self.write("[");
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.write(if self.options.pretty { ", " } else { "," });
                    }
                    if let Some(element) = element {
                        self.emit_expression(element, indent);
                    }
                }
                self.write("]");
            }

            Expression::ObjectExpression { properties, .. } => {
                self.write("{");
                for (i, property) in properties.iter().enumerate() {
                    if i > 0 {
                        self.write(if self.options.pretty { ", " } else { "," });
                    }
                    self.emit_property_key(&property.key);
                    self.write(":");
                    self.emit_expression(&property.value, indent);
                }
                self.write("}");
            }

            Expression::ParenthesizedExpression { expression, .. } => {
                self.write("(");
                self.emit_expression(expression, indent);
                self.write(")");
            }

            Expression::FunctionExpression {
                name, params, body, ..
            } => {
                self.write("function");
                if let Some(name) = name {
                    self.write(" ");
                    self.write(name);
                }
                self.emit_params(params);
                self.emit_block(body, indent, true);
            }

            Expression::UnaryExpression {
                operator, argument, ..
            } => {
                self.write(unary_operator_text(*operator));
                if self.unary_needs_space(*operator, argument) {
                    self.write(" ");
                }
                self.emit_expression(argument, indent);
            }

            Expression::UpdateExpression {
                operator,
                argument,
                prefix,
                ..
            } => {
                let text = match operator {
                    UpdateOperator::Increment => "++",
                    UpdateOperator::Decrement => "--",
                };
                if *prefix {
                    self.write(text);
                    self.emit_expression(argument, indent);
                } else {
                    self.emit_expression(argument, indent);
                    self.write(text);
                }
            }

            Expression::BinaryExpression {
                left,
                operator,
                right,
                ..
            } => {
                self.emit_expression(left, indent);
                self.emit_binary_operator(*operator);
                self.emit_expression(right, indent);
            }

            Expression::LogicalExpression {
                left,
                operator,
                right,
                ..
            } => {
                self.emit_expression(left, indent);
                let text = match operator {
                    LogicalOperator::And => "&&",
                    LogicalOperator::Or => "||",
                };
                self.emit_operator(text);
                self.emit_expression(right, indent);
            }

            Expression::AssignmentExpression {
                left,
                operator,
                right,
                ..
            } => {
                self.emit_expression(left, indent);
                self.emit_operator(assignment_operator_text(*operator));
                self.emit_expression(right, indent);
            }

            Expression::ConditionalExpression {
                test,
                consequent,
                alternate,
                ..
            } => {
                self.emit_expression(test, indent);
                self.write(if self.options.pretty { " ? " } else { "?" });
                self.emit_expression(consequent, indent);
                self.write(if self.options.pretty { " : " } else { ":" });
                self.emit_expression(alternate, indent);
            }

            Expression::CallExpression {
                callee, arguments, ..
            } => {
                self.emit_expression(callee, indent);
                self.emit_arguments(arguments, indent);
            }

            Expression::NewExpression {
                callee, arguments, ..
            } => {
                self.write("new ");
                self.emit_expression(callee, indent);
                self.emit_arguments(arguments, indent);
            }

            Expression::MemberExpression {
                object,
                property,
                computed,
                ..
            } => {
                self.emit_expression(object, indent);
                if *computed {
                    self.write("[");
                    self.emit_expression(property, indent);
                    self.write("]");
                } else {
                    self.write(".");
                    self.emit_expression(property, indent);
                }
            }

            Expression::SequenceExpression { expressions, .. } => {
                for (i, expression) in expressions.iter().enumerate() {
                    if i > 0 {
                        self.write(if self.options.pretty { ", " } else { "," });
                    }
                    self.emit_expression(expression, indent);
                }
            }
        }
    }

    fn emit_arguments(&mut self, arguments: &[Expression], indent: usize) {
        self.write("(");
        for (i, argument) in arguments.iter().enumerate() {
            if i > 0 {
                self.write(if self.options.pretty { ", " } else { "," });
            }
            self.emit_expression(argument, indent);
        }
        self.write(")");
    }

    fn emit_property_key(&mut self, key: &PropertyKey) {
        match key {
            PropertyKey::Identifier(name) => self.write(name),
            PropertyKey::String { raw, .. } => self.write(raw),
            PropertyKey::Number(value) => {
                let text = format_number(*value);
                self.write(&text);
            }
        }
    }

    fn emit_operator(&mut self, text: &str) {
        if self.options.pretty {
            self.write(" ");
            self.write(text);
            self.write(" ");
        } else {
            self.write(text);
        }
    }

    fn emit_binary_operator(&mut self, operator: BinaryOperator) {
        // `in` and `instanceof` need the spaces even in crushed output
        match operator {
            BinaryOperator::In => self.write(" in "),
            BinaryOperator::Instanceof => self.write(" instanceof "),
            other => self.emit_operator(binary_operator_text(other)),
        }
    }

    fn unary_needs_space(&self, operator: UnaryOperator, argument: &Expression) -> bool {
        match operator {
            UnaryOperator::Delete | UnaryOperator::Void | UnaryOperator::Typeof => {
                !matches!(argument, Expression::ParenthesizedExpression { .. })
            }
            // Avoid gluing `- -x` into `--x`
            UnaryOperator::Minus => matches!(
                argument,
                Expression::UnaryExpression {
                    operator: UnaryOperator::Minus,
                    ..
                } | Expression::UpdateExpression {
                    operator: UpdateOperator::Decrement,
                    prefix: true,
                    ..
                }
            ),
            UnaryOperator::Plus => matches!(
                argument,
                Expression::UnaryExpression {
                    operator: UnaryOperator::Plus,
                    ..
                } | Expression::UpdateExpression {
                    operator: UpdateOperator::Increment,
                    prefix: true,
                    ..
                }
            ),
            _ => false,
        }
    }
}

fn unary_operator_text(operator: UnaryOperator) -> &'static str {
    match operator {
        UnaryOperator::Minus => "-",
        UnaryOperator::Plus => "+",
        UnaryOperator::Not => "!",
        UnaryOperator::BitwiseNot => "~",
        UnaryOperator::Typeof => "typeof",
        UnaryOperator::Void => "void",
        UnaryOperator::Delete => "delete",
    }
}

fn binary_operator_text(operator: BinaryOperator) -> &'static str {
    match operator {
        BinaryOperator::Add => "+",
        BinaryOperator::Sub => "-",
        BinaryOperator::Mul => "*",
        BinaryOperator::Div => "/",
        BinaryOperator::Mod => "%",
        BinaryOperator::Eq => "==",
        BinaryOperator::NotEq => "!=",
        BinaryOperator::StrictEq => "===",
        BinaryOperator::StrictNotEq => "!==",
        BinaryOperator::Lt => "<",
        BinaryOperator::LtEq => "<=",
        BinaryOperator::Gt => ">",
        BinaryOperator::GtEq => ">=",
        BinaryOperator::BitwiseAnd => "&",
        BinaryOperator::BitwiseOr => "|",
        BinaryOperator::BitwiseXor => "^",
        BinaryOperator::LeftShift => "<<",
        BinaryOperator::RightShift => ">>",
        BinaryOperator::UnsignedRightShift => ">>>",
        BinaryOperator::In => "in",
        BinaryOperator::Instanceof => "instanceof",
    }
}

fn assignment_operator_text(operator: AssignmentOperator) -> &'static str {
    match operator {
        AssignmentOperator::Assign => "=",
        AssignmentOperator::AddAssign => "+=",
        AssignmentOperator::SubAssign => "-=",
        AssignmentOperator::MulAssign => "*=",
        AssignmentOperator::DivAssign => "/=",
        AssignmentOperator::ModAssign => "%=",
        AssignmentOperator::BitAndAssign => "&=",
        AssignmentOperator::BitOrAssign => "|=",
        AssignmentOperator::BitXorAssign => "^=",
        AssignmentOperator::LeftShiftAssign => "<<=",
        AssignmentOperator::RightShiftAssign => ">>=",
        AssignmentOperator::UnsignedRightShiftAssign => ">>>=",
    }
}
