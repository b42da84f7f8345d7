//! Recursive descent parser for JavaScript

use crate::ast::*;
use crate::error::*;
use crate::lexer::{Keyword, Lexer, Punctuator, Token};
use core_types::{JsError, SourcePosition};

/// JavaScript parser
pub struct Parser {
    lexer: Lexer,
    /// Track if we're in a for loop init (disallows 'in' as relational operator)
    in_for_init: bool,
}

impl Parser {
    /// Create a new parser for the given source code
    pub fn new(source: &str) -> Self {
        Self {
            lexer: Lexer::new(source),
            in_for_init: false,
        }
    }

    /// Parse the source into an AST
    pub fn parse(&mut self) -> Result<Program, JsError> {
        let mut body = Vec::new();
        while !self.is_at_end()? {
            body.push(self.parse_statement()?);
        }
        Ok(Program { body })
    }

    fn is_at_end(&mut self) -> Result<bool, JsError> {
        Ok(matches!(self.lexer.peek_token()?, Token::EOF))
    }

    /// Peek the next token and report its position
    fn position(&mut self) -> Result<Option<SourcePosition>, JsError> {
        self.lexer.peek_token()?;
        Ok(Some(self.lexer.token_position))
    }

    fn check_punctuator(&mut self, punctuator: Punctuator) -> Result<bool, JsError> {
        Ok(matches!(
            self.lexer.peek_token()?,
            Token::Punctuator(p) if *p == punctuator
        ))
    }

    fn eat_punctuator(&mut self, punctuator: Punctuator) -> Result<bool, JsError> {
        if self.check_punctuator(punctuator)? {
            self.lexer.next_token()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn expect_punctuator(&mut self, punctuator: Punctuator) -> Result<(), JsError> {
        if self.eat_punctuator(punctuator)? {
            return Ok(());
        }
        let got = describe(self.lexer.peek_token()?);
        Err(unexpected_token(
            &format!("'{}'", punctuator_text(punctuator)),
            &got,
            Some(self.lexer.token_position),
        ))
    }

    fn check_keyword(&mut self, keyword: Keyword) -> Result<bool, JsError> {
        Ok(matches!(
            self.lexer.peek_token()?,
            Token::Keyword(k) if *k == keyword
        ))
    }

    fn eat_keyword(&mut self, keyword: Keyword) -> Result<bool, JsError> {
        if self.check_keyword(keyword)? {
            self.lexer.next_token()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), JsError> {
        if self.eat_keyword(keyword)? {
            return Ok(());
        }
        let got = describe(self.lexer.peek_token()?);
        Err(unexpected_token(
            &format!("'{}'", keyword_text(keyword)),
            &got,
            Some(self.lexer.token_position),
        ))
    }

    fn expect_identifier(&mut self) -> Result<String, JsError> {
        self.lexer.peek_token()?;
        let position = self.lexer.token_position;
        match self.lexer.next_token()? {
            Token::Identifier(name) => Ok(name),
            token => Err(unexpected_token(
                "identifier",
                &describe(&token),
                Some(position),
            )),
        }
    }

    fn consume_semicolon(&mut self) -> Result<(), JsError> {
        // If there's an explicit semicolon, consume it
        if self.eat_punctuator(Punctuator::Semicolon)? {
            return Ok(());
        }

        // ASI Rule 1: a line terminator before the offending token
        if self.lexer.line_terminator_before_token {
            return Ok(());
        }

        // ASI Rule 2: end of file
        if self.is_at_end()? {
            return Ok(());
        }

        // ASI Rule 3: closing brace
        if self.check_punctuator(Punctuator::RBrace)? {
            return Ok(());
        }

        Err(syntax_error(
            "Expected semicolon",
            Some(self.lexer.token_position),
        ))
    }

    /// ASI after `)` always applies to do-while, even without a line
    /// terminator.
    fn consume_semicolon_do_while(&mut self) -> Result<(), JsError> {
        if self.check_punctuator(Punctuator::Semicolon)? {
            self.lexer.next_token()?;
        }
        Ok(())
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_statement(&mut self) -> Result<Statement, JsError> {
        let token = self.lexer.peek_token()?.clone();

        match token {
            Token::Keyword(Keyword::Var) => self.parse_variable_declaration(),
            Token::Keyword(Keyword::Function) => self.parse_function_declaration(),
            Token::Keyword(Keyword::Return) => self.parse_return_statement(),
            Token::Keyword(Keyword::If) => self.parse_if_statement(),
            Token::Keyword(Keyword::While) => self.parse_while_statement(),
            Token::Keyword(Keyword::Do) => self.parse_do_while_statement(),
            Token::Keyword(Keyword::For) => self.parse_for_statement(),
            Token::Keyword(Keyword::Switch) => self.parse_switch_statement(),
            Token::Keyword(Keyword::Break) => self.parse_break_statement(),
            Token::Keyword(Keyword::Continue) => self.parse_continue_statement(),
            Token::Keyword(Keyword::Throw) => self.parse_throw_statement(),
            Token::Keyword(Keyword::Try) => self.parse_try_statement(),
            Token::Keyword(Keyword::With) => self.parse_with_statement(),
            Token::Punctuator(Punctuator::LBrace) => self.parse_block_statement(),
            Token::Punctuator(Punctuator::Semicolon) => {
                let position = self.position()?;
                self.lexer.next_token()?;
                Ok(Statement::EmptyStatement { position })
            }
            Token::Identifier(_) => {
                if self.lexer.colon_follows()? {
                    self.parse_labeled_statement()
                } else {
                    self.parse_expression_statement()
                }
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_variable_declaration(&mut self) -> Result<Statement, JsError> {
        let position = self.position()?;
        self.expect_keyword(Keyword::Var)?;
        let declarations = self.parse_declarator_list()?;
        self.consume_semicolon()?;
        Ok(Statement::VariableDeclaration {
            declarations,
            position,
        })
    }

    fn parse_declarator_list(&mut self) -> Result<Vec<VariableDeclarator>, JsError> {
        let mut declarations = Vec::new();
        loop {
            let name = self.expect_identifier()?;
            let init = if self.eat_punctuator(Punctuator::Assign)? {
                Some(self.parse_assignment_expression()?)
            } else {
                None
            };
            declarations.push(VariableDeclarator { name, init });

            if !self.eat_punctuator(Punctuator::Comma)? {
                break;
            }
        }
        Ok(declarations)
    }

    fn parse_function_declaration(&mut self) -> Result<Statement, JsError> {
        let position = self.position()?;
        self.expect_keyword(Keyword::Function)?;
        let name = self.expect_identifier()?;
        let params = self.parse_function_params()?;
        let body = self.parse_brace_block()?;
        Ok(Statement::FunctionDeclaration {
            name,
            params,
            body,
            position,
        })
    }

    fn parse_function_params(&mut self) -> Result<Vec<String>, JsError> {
        self.expect_punctuator(Punctuator::LParen)?;
        let mut params = Vec::new();
        if !self.check_punctuator(Punctuator::RParen)? {
            loop {
                params.push(self.expect_identifier()?);
                if !self.eat_punctuator(Punctuator::Comma)? {
                    break;
                }
            }
        }
        self.expect_punctuator(Punctuator::RParen)?;
        Ok(params)
    }

    fn parse_brace_block(&mut self) -> Result<Vec<Statement>, JsError> {
        self.expect_punctuator(Punctuator::LBrace)?;
        let mut body = Vec::new();
        while !self.check_punctuator(Punctuator::RBrace)? {
            if self.is_at_end()? {
                return Err(unexpected_eof(Some(self.lexer.token_position)));
            }
            body.push(self.parse_statement()?);
        }
        self.expect_punctuator(Punctuator::RBrace)?;
        Ok(body)
    }

    fn parse_block_statement(&mut self) -> Result<Statement, JsError> {
        let position = self.position()?;
        let body = self.parse_brace_block()?;
        Ok(Statement::BlockStatement { body, position })
    }

    fn parse_expression_statement(&mut self) -> Result<Statement, JsError> {
        let position = self.position()?;
        let expression = self.parse_expression()?;
        self.consume_semicolon()?;
        Ok(Statement::ExpressionStatement {
            expression,
            position,
        })
    }

    fn parse_labeled_statement(&mut self) -> Result<Statement, JsError> {
        let position = self.position()?;
        let label = self.expect_identifier()?;
        self.expect_punctuator(Punctuator::Colon)?;
        let body = Box::new(self.parse_statement()?);
        Ok(Statement::LabeledStatement {
            label,
            body,
            position,
        })
    }

    fn parse_if_statement(&mut self) -> Result<Statement, JsError> {
        let position = self.position()?;
        self.expect_keyword(Keyword::If)?;
        self.expect_punctuator(Punctuator::LParen)?;
        let test = self.parse_expression()?;
        self.expect_punctuator(Punctuator::RParen)?;
        let consequent = Box::new(self.parse_statement()?);
        let alternate = if self.eat_keyword(Keyword::Else)? {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(Statement::IfStatement {
            test,
            consequent,
            alternate,
            position,
        })
    }

    fn parse_while_statement(&mut self) -> Result<Statement, JsError> {
        let position = self.position()?;
        self.expect_keyword(Keyword::While)?;
        self.expect_punctuator(Punctuator::LParen)?;
        let test = self.parse_expression()?;
        self.expect_punctuator(Punctuator::RParen)?;
        let body = Box::new(self.parse_statement()?);
        Ok(Statement::WhileStatement {
            test,
            body,
            position,
        })
    }

    fn parse_do_while_statement(&mut self) -> Result<Statement, JsError> {
        let position = self.position()?;
        self.expect_keyword(Keyword::Do)?;
        let body = Box::new(self.parse_statement()?);
        self.expect_keyword(Keyword::While)?;
        self.expect_punctuator(Punctuator::LParen)?;
        let test = self.parse_expression()?;
        self.expect_punctuator(Punctuator::RParen)?;
        self.consume_semicolon_do_while()?;
        Ok(Statement::DoWhileStatement {
            body,
            test,
            position,
        })
    }

    fn parse_for_statement(&mut self) -> Result<Statement, JsError> {
        let position = self.position()?;
        self.expect_keyword(Keyword::For)?;
        self.expect_punctuator(Punctuator::LParen)?;

        let init = if self.eat_punctuator(Punctuator::Semicolon)? {
            None
        } else if self.eat_keyword(Keyword::Var)? {
            self.in_for_init = true;
            let declarations = self.parse_declarator_list();
            self.in_for_init = false;
            let declarations = declarations?;

            if self.eat_keyword(Keyword::In)? {
                if declarations.len() != 1 {
                    return Err(syntax_error(
                        "Invalid left-hand side in for-in loop",
                        position,
                    ));
                }
                let left =
                    ForInLeft::VariableDeclaration(declarations.into_iter().next().unwrap());
                return self.parse_for_in_rest(left, position);
            }
            self.expect_punctuator(Punctuator::Semicolon)?;
            Some(ForInit::VariableDeclaration(declarations))
        } else {
            self.in_for_init = true;
            let expr = self.parse_expression();
            self.in_for_init = false;
            let expr = expr?;

            if self.eat_keyword(Keyword::In)? {
                if !expr.is_valid_assignment_target() {
                    return Err(syntax_error(
                        "Invalid left-hand side in for-in loop",
                        expr.position(),
                    ));
                }
                return self.parse_for_in_rest(ForInLeft::Expression(expr), position);
            }
            self.expect_punctuator(Punctuator::Semicolon)?;
            Some(ForInit::Expression(expr))
        };

        let test = if self.check_punctuator(Punctuator::Semicolon)? {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_punctuator(Punctuator::Semicolon)?;

        let update = if self.check_punctuator(Punctuator::RParen)? {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_punctuator(Punctuator::RParen)?;

        let body = Box::new(self.parse_statement()?);
        Ok(Statement::ForStatement {
            init,
            test,
            update,
            body,
            position,
        })
    }

    fn parse_for_in_rest(
        &mut self,
        left: ForInLeft,
        position: Option<SourcePosition>,
    ) -> Result<Statement, JsError> {
        let right = self.parse_expression()?;
        self.expect_punctuator(Punctuator::RParen)?;
        let body = Box::new(self.parse_statement()?);
        Ok(Statement::ForInStatement {
            left,
            right,
            body,
            position,
        })
    }

    fn parse_switch_statement(&mut self) -> Result<Statement, JsError> {
        let position = self.position()?;
        self.expect_keyword(Keyword::Switch)?;
        self.expect_punctuator(Punctuator::LParen)?;
        let discriminant = self.parse_expression()?;
        self.expect_punctuator(Punctuator::RParen)?;
        self.expect_punctuator(Punctuator::LBrace)?;

        let mut cases = Vec::new();
        while !self.check_punctuator(Punctuator::RBrace)? {
            let test = if self.eat_keyword(Keyword::Case)? {
                let test = self.parse_expression()?;
                self.expect_punctuator(Punctuator::Colon)?;
                Some(test)
            } else {
                self.expect_keyword(Keyword::Default)?;
                self.expect_punctuator(Punctuator::Colon)?;
                None
            };

            let mut consequent = Vec::new();
            while !self.check_punctuator(Punctuator::RBrace)?
                && !self.check_keyword(Keyword::Case)?
                && !self.check_keyword(Keyword::Default)?
            {
                consequent.push(self.parse_statement()?);
            }
            cases.push(SwitchCase { test, consequent });
        }
        self.expect_punctuator(Punctuator::RBrace)?;
        Ok(Statement::SwitchStatement {
            discriminant,
            cases,
            position,
        })
    }

    fn parse_return_statement(&mut self) -> Result<Statement, JsError> {
        let position = self.position()?;
        self.expect_keyword(Keyword::Return)?;

        // Restricted production: no line terminator between `return` and its
        // argument
        self.lexer.peek_token()?;
        let argument = if self.lexer.line_terminator_before_token
            || self.check_punctuator(Punctuator::Semicolon)?
            || self.check_punctuator(Punctuator::RBrace)?
            || self.is_at_end()?
        {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.consume_semicolon()?;
        Ok(Statement::ReturnStatement { argument, position })
    }

    fn parse_break_statement(&mut self) -> Result<Statement, JsError> {
        let position = self.position()?;
        self.expect_keyword(Keyword::Break)?;
        let label = self.parse_optional_label()?;
        self.consume_semicolon()?;
        Ok(Statement::BreakStatement { label, position })
    }

    fn parse_continue_statement(&mut self) -> Result<Statement, JsError> {
        let position = self.position()?;
        self.expect_keyword(Keyword::Continue)?;
        let label = self.parse_optional_label()?;
        self.consume_semicolon()?;
        Ok(Statement::ContinueStatement { label, position })
    }

    /// Restricted production: a break/continue label must be on the same line
    fn parse_optional_label(&mut self) -> Result<Option<String>, JsError> {
        self.lexer.peek_token()?;
        let line_terminator_before_token = self.lexer.line_terminator_before_token;
        let label = match self.lexer.peek_token()? {
            Token::Identifier(name) if !line_terminator_before_token => {
                Some(name.clone())
            }
            _ => None,
        };
        if label.is_some() {
            self.lexer.next_token()?;
        }
        Ok(label)
    }

    fn parse_throw_statement(&mut self) -> Result<Statement, JsError> {
        let position = self.position()?;
        self.expect_keyword(Keyword::Throw)?;
        self.lexer.peek_token()?;
        if self.lexer.line_terminator_before_token {
            return Err(syntax_error("Illegal newline after throw", position));
        }
        let argument = self.parse_expression()?;
        self.consume_semicolon()?;
        Ok(Statement::ThrowStatement { argument, position })
    }

    fn parse_try_statement(&mut self) -> Result<Statement, JsError> {
        let position = self.position()?;
        self.expect_keyword(Keyword::Try)?;
        let block = self.parse_brace_block()?;

        let handler = if self.eat_keyword(Keyword::Catch)? {
            self.expect_punctuator(Punctuator::LParen)?;
            let param = self.expect_identifier()?;
            self.expect_punctuator(Punctuator::RParen)?;
            let body = self.parse_brace_block()?;
            Some(CatchClause { param, body })
        } else {
            None
        };

        let finalizer = if self.eat_keyword(Keyword::Finally)? {
            Some(self.parse_brace_block()?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(syntax_error("Missing catch or finally after try", position));
        }

        Ok(Statement::TryStatement {
            block,
            handler,
            finalizer,
            position,
        })
    }

    fn parse_with_statement(&mut self) -> Result<Statement, JsError> {
        let position = self.position()?;
        self.expect_keyword(Keyword::With)?;
        self.expect_punctuator(Punctuator::LParen)?;
        let object = self.parse_expression()?;
        self.expect_punctuator(Punctuator::RParen)?;
        let body = Box::new(self.parse_statement()?);
        Ok(Statement::WithStatement {
            object,
            body,
            position,
        })
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Parse a full expression, including the comma operator
    pub fn parse_expression(&mut self) -> Result<Expression, JsError> {
        let first = self.parse_assignment_expression()?;
        if !self.check_punctuator(Punctuator::Comma)? {
            return Ok(first);
        }

        let position = first.position();
        let mut expressions = vec![first];
        while self.eat_punctuator(Punctuator::Comma)? {
            expressions.push(self.parse_assignment_expression()?);
        }
        Ok(Expression::SequenceExpression {
            expressions,
            position,
        })
    }

    fn parse_assignment_expression(&mut self) -> Result<Expression, JsError> {
        let expr = self.parse_conditional_expression()?;

        let operator = match self.lexer.peek_token()? {
            Token::Punctuator(Punctuator::Assign) => Some(AssignmentOperator::Assign),
            Token::Punctuator(Punctuator::PlusEq) => Some(AssignmentOperator::AddAssign),
            Token::Punctuator(Punctuator::MinusEq) => Some(AssignmentOperator::SubAssign),
            Token::Punctuator(Punctuator::StarEq) => Some(AssignmentOperator::MulAssign),
            Token::Punctuator(Punctuator::SlashEq) => Some(AssignmentOperator::DivAssign),
            Token::Punctuator(Punctuator::PercentEq) => Some(AssignmentOperator::ModAssign),
            Token::Punctuator(Punctuator::AndEq) => Some(AssignmentOperator::BitAndAssign),
            Token::Punctuator(Punctuator::OrEq) => Some(AssignmentOperator::BitOrAssign),
            Token::Punctuator(Punctuator::XorEq) => Some(AssignmentOperator::BitXorAssign),
            Token::Punctuator(Punctuator::LtLtEq) => Some(AssignmentOperator::LeftShiftAssign),
            Token::Punctuator(Punctuator::GtGtEq) => Some(AssignmentOperator::RightShiftAssign),
            Token::Punctuator(Punctuator::GtGtGtEq) => {
                Some(AssignmentOperator::UnsignedRightShiftAssign)
            }
            _ => None,
        };

        let Some(operator) = operator else {
            return Ok(expr);
        };

        if !expr.is_valid_assignment_target() {
            return Err(syntax_error(
                "Invalid assignment target",
                expr.position(),
            ));
        }

        let position = expr.position();
        self.lexer.next_token()?;
        let right = self.parse_assignment_expression()?;
        Ok(Expression::AssignmentExpression {
            left: Box::new(expr),
            operator,
            right: Box::new(right),
            position,
        })
    }

    fn parse_conditional_expression(&mut self) -> Result<Expression, JsError> {
        let test = self.parse_logical_or_expression()?;
        if !self.eat_punctuator(Punctuator::Question)? {
            return Ok(test);
        }

        let consequent = self.parse_assignment_expression()?;
        self.expect_punctuator(Punctuator::Colon)?;
        let alternate = self.parse_assignment_expression()?;
        let position = test.position();
        Ok(Expression::ConditionalExpression {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
            position,
        })
    }

    fn parse_logical_or_expression(&mut self) -> Result<Expression, JsError> {
        let mut left = self.parse_logical_and_expression()?;
        while self.eat_punctuator(Punctuator::OrOr)? {
            let right = self.parse_logical_and_expression()?;
            let position = left.position();
            left = Expression::LogicalExpression {
                left: Box::new(left),
                operator: LogicalOperator::Or,
                right: Box::new(right),
                position,
            };
        }
        Ok(left)
    }

    fn parse_logical_and_expression(&mut self) -> Result<Expression, JsError> {
        let mut left = self.parse_bitwise_or_expression()?;
        while self.eat_punctuator(Punctuator::AndAnd)? {
            let right = self.parse_bitwise_or_expression()?;
            let position = left.position();
            left = Expression::LogicalExpression {
                left: Box::new(left),
                operator: LogicalOperator::And,
                right: Box::new(right),
                position,
            };
        }
        Ok(left)
    }

    fn parse_bitwise_or_expression(&mut self) -> Result<Expression, JsError> {
        let mut left = self.parse_bitwise_xor_expression()?;
        while self.eat_punctuator(Punctuator::Or)? {
            let right = self.parse_bitwise_xor_expression()?;
            left = binary(left, BinaryOperator::BitwiseOr, right);
        }
        Ok(left)
    }

    fn parse_bitwise_xor_expression(&mut self) -> Result<Expression, JsError> {
        let mut left = self.parse_bitwise_and_expression()?;
        while self.eat_punctuator(Punctuator::Xor)? {
            let right = self.parse_bitwise_and_expression()?;
            left = binary(left, BinaryOperator::BitwiseXor, right);
        }
        Ok(left)
    }

    fn parse_bitwise_and_expression(&mut self) -> Result<Expression, JsError> {
        let mut left = self.parse_equality_expression()?;
        while self.eat_punctuator(Punctuator::And)? {
            let right = self.parse_equality_expression()?;
            left = binary(left, BinaryOperator::BitwiseAnd, right);
        }
        Ok(left)
    }

    fn parse_equality_expression(&mut self) -> Result<Expression, JsError> {
        let mut left = self.parse_relational_expression()?;
        loop {
            let operator = match self.lexer.peek_token()? {
                Token::Punctuator(Punctuator::EqEq) => BinaryOperator::Eq,
                Token::Punctuator(Punctuator::NotEq) => BinaryOperator::NotEq,
                Token::Punctuator(Punctuator::EqEqEq) => BinaryOperator::StrictEq,
                Token::Punctuator(Punctuator::NotEqEq) => BinaryOperator::StrictNotEq,
                _ => break,
            };
            self.lexer.next_token()?;
            let right = self.parse_relational_expression()?;
            left = binary(left, operator, right);
        }
        Ok(left)
    }

    fn parse_relational_expression(&mut self) -> Result<Expression, JsError> {
        let mut left = self.parse_shift_expression()?;
        loop {
            let operator = match self.lexer.peek_token()? {
                Token::Punctuator(Punctuator::Lt) => BinaryOperator::Lt,
                Token::Punctuator(Punctuator::LtEq) => BinaryOperator::LtEq,
                Token::Punctuator(Punctuator::Gt) => BinaryOperator::Gt,
                Token::Punctuator(Punctuator::GtEq) => BinaryOperator::GtEq,
                Token::Keyword(Keyword::Instanceof) => BinaryOperator::Instanceof,
                Token::Keyword(Keyword::In) if !self.in_for_init => BinaryOperator::In,
                _ => break,
            };
            self.lexer.next_token()?;
            let right = self.parse_shift_expression()?;
            left = binary(left, operator, right);
        }
        Ok(left)
    }

    fn parse_shift_expression(&mut self) -> Result<Expression, JsError> {
        let mut left = self.parse_additive_expression()?;
        loop {
            let operator = match self.lexer.peek_token()? {
                Token::Punctuator(Punctuator::LtLt) => BinaryOperator::LeftShift,
                Token::Punctuator(Punctuator::GtGt) => BinaryOperator::RightShift,
                Token::Punctuator(Punctuator::GtGtGt) => BinaryOperator::UnsignedRightShift,
                _ => break,
            };
            self.lexer.next_token()?;
            let right = self.parse_additive_expression()?;
            left = binary(left, operator, right);
        }
        Ok(left)
    }

    fn parse_additive_expression(&mut self) -> Result<Expression, JsError> {
        let mut left = self.parse_multiplicative_expression()?;
        loop {
            let operator = match self.lexer.peek_token()? {
                Token::Punctuator(Punctuator::Plus) => BinaryOperator::Add,
                Token::Punctuator(Punctuator::Minus) => BinaryOperator::Sub,
                _ => break,
            };
            self.lexer.next_token()?;
            let right = self.parse_multiplicative_expression()?;
            left = binary(left, operator, right);
        }
        Ok(left)
    }

    fn parse_multiplicative_expression(&mut self) -> Result<Expression, JsError> {
        let mut left = self.parse_unary_expression()?;
        loop {
            let operator = match self.lexer.peek_token()? {
                Token::Punctuator(Punctuator::Star) => BinaryOperator::Mul,
                Token::Punctuator(Punctuator::Slash) => BinaryOperator::Div,
                Token::Punctuator(Punctuator::Percent) => BinaryOperator::Mod,
                _ => break,
            };
            self.lexer.next_token()?;
            let right = self.parse_unary_expression()?;
            left = binary(left, operator, right);
        }
        Ok(left)
    }

    fn parse_unary_expression(&mut self) -> Result<Expression, JsError> {
        let operator = match self.lexer.peek_token()? {
            Token::Keyword(Keyword::Delete) => Some(UnaryOperator::Delete),
            Token::Keyword(Keyword::Void) => Some(UnaryOperator::Void),
            Token::Keyword(Keyword::Typeof) => Some(UnaryOperator::Typeof),
            Token::Punctuator(Punctuator::Plus) => Some(UnaryOperator::Plus),
            Token::Punctuator(Punctuator::Minus) => Some(UnaryOperator::Minus),
            Token::Punctuator(Punctuator::Not) => Some(UnaryOperator::Not),
            Token::Punctuator(Punctuator::Tilde) => Some(UnaryOperator::BitwiseNot),
            _ => None,
        };

        if let Some(operator) = operator {
            let position = Some(self.lexer.token_position);
            self.lexer.next_token()?;
            let argument = self.parse_unary_expression()?;
            return Ok(Expression::UnaryExpression {
                operator,
                argument: Box::new(argument),
                position,
            });
        }

        let update = match self.lexer.peek_token()? {
            Token::Punctuator(Punctuator::PlusPlus) => Some(UpdateOperator::Increment),
            Token::Punctuator(Punctuator::MinusMinus) => Some(UpdateOperator::Decrement),
            _ => None,
        };

        if let Some(operator) = update {
            let position = Some(self.lexer.token_position);
            self.lexer.next_token()?;
            let argument = self.parse_unary_expression()?;
            if !argument.is_valid_assignment_target() {
                return Err(syntax_error(
                    "Invalid operand in prefix operation",
                    argument.position(),
                ));
            }
            return Ok(Expression::UpdateExpression {
                operator,
                argument: Box::new(argument),
                prefix: true,
                position,
            });
        }

        self.parse_postfix_expression()
    }

    fn parse_postfix_expression(&mut self) -> Result<Expression, JsError> {
        let expr = self.parse_left_hand_side_expression()?;

        // Restricted production: postfix operators must be on the same line
        self.lexer.peek_token()?;
        if self.lexer.line_terminator_before_token {
            return Ok(expr);
        }

        let operator = match self.lexer.peek_token()? {
            Token::Punctuator(Punctuator::PlusPlus) => Some(UpdateOperator::Increment),
            Token::Punctuator(Punctuator::MinusMinus) => Some(UpdateOperator::Decrement),
            _ => None,
        };

        let Some(operator) = operator else {
            return Ok(expr);
        };

        if !expr.is_valid_assignment_target() {
            return Err(syntax_error(
                "Invalid operand in postfix operation",
                expr.position(),
            ));
        }

        self.lexer.next_token()?;
        let position = expr.position();
        Ok(Expression::UpdateExpression {
            operator,
            argument: Box::new(expr),
            prefix: false,
            position,
        })
    }

    fn parse_left_hand_side_expression(&mut self) -> Result<Expression, JsError> {
        let mut expr = if self.check_keyword(Keyword::New)? {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };

        loop {
            if self.eat_punctuator(Punctuator::Dot)? {
                expr = self.parse_static_member(expr)?;
            } else if self.eat_punctuator(Punctuator::LBracket)? {
                expr = self.parse_dynamic_member(expr)?;
            } else if self.check_punctuator(Punctuator::LParen)? {
                let position = expr.position();
                let arguments = self.parse_arguments()?;
                expr = Expression::CallExpression {
                    callee: Box::new(expr),
                    arguments,
                    position,
                };
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn parse_static_member(&mut self, object: Expression) -> Result<Expression, JsError> {
        let position = object.position();
        let property_position = self.position()?;
        let name = self.expect_identifier()?;
        Ok(Expression::MemberExpression {
            object: Box::new(object),
            property: Box::new(Expression::Identifier {
                name,
                position: property_position,
            }),
            computed: false,
            position,
        })
    }

    fn parse_dynamic_member(&mut self, object: Expression) -> Result<Expression, JsError> {
        let position = object.position();
        let property = self.parse_expression()?;
        self.expect_punctuator(Punctuator::RBracket)?;
        Ok(Expression::MemberExpression {
            object: Box::new(object),
            property: Box::new(property),
            computed: true,
            position,
        })
    }

    fn parse_new_expression(&mut self) -> Result<Expression, JsError> {
        let position = self.position()?;
        self.expect_keyword(Keyword::New)?;

        let mut callee = if self.check_keyword(Keyword::New)? {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };

        // Member accesses bind tighter than the argument list of `new`
        loop {
            if self.eat_punctuator(Punctuator::Dot)? {
                callee = self.parse_static_member(callee)?;
            } else if self.eat_punctuator(Punctuator::LBracket)? {
                callee = self.parse_dynamic_member(callee)?;
            } else {
                break;
            }
        }

        let arguments = if self.check_punctuator(Punctuator::LParen)? {
            self.parse_arguments()?
        } else {
            Vec::new()
        };

        Ok(Expression::NewExpression {
            callee: Box::new(callee),
            arguments,
            position,
        })
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expression>, JsError> {
        self.expect_punctuator(Punctuator::LParen)?;
        let mut arguments = Vec::new();
        if !self.check_punctuator(Punctuator::RParen)? {
            loop {
                arguments.push(self.parse_assignment_expression()?);
                if !self.eat_punctuator(Punctuator::Comma)? {
                    break;
                }
            }
        }
        self.expect_punctuator(Punctuator::RParen)?;
        Ok(arguments)
    }

    fn parse_primary_expression(&mut self) -> Result<Expression, JsError> {
        let token = self.lexer.peek_token()?.clone();
        let position = Some(self.lexer.token_position);

        match token {
            Token::Identifier(name) => {
                self.lexer.next_token()?;
                Ok(Expression::Identifier { name, position })
            }
            Token::Number(value) => {
                self.lexer.next_token()?;
                Ok(Expression::NumericLiteral { value, position })
            }
            Token::String { value, raw } => {
                self.lexer.next_token()?;
                Ok(Expression::StringLiteral {
                    value,
                    raw,
                    position,
                })
            }
            // A slash in expression position starts a regex literal, not
            // division
            Token::Punctuator(Punctuator::Slash) | Token::Punctuator(Punctuator::SlashEq) => {
                match self.lexer.rescan_regexp()? {
                    Token::RegExp(pattern, flags) => Ok(Expression::RegExpLiteral {
                        pattern,
                        flags,
                        position,
                    }),
                    token => Err(unexpected_token(
                        "regular expression",
                        &describe(&token),
                        position,
                    )),
                }
            }
            Token::Keyword(Keyword::This) => {
                self.lexer.next_token()?;
                Ok(Expression::ThisExpression { position })
            }
            Token::Keyword(Keyword::True) => {
                self.lexer.next_token()?;
                Ok(Expression::BooleanLiteral {
                    value: true,
                    position,
                })
            }
            Token::Keyword(Keyword::False) => {
                self.lexer.next_token()?;
                Ok(Expression::BooleanLiteral {
                    value: false,
                    position,
                })
            }
            Token::Keyword(Keyword::Null) => {
                self.lexer.next_token()?;
                Ok(Expression::NullLiteral { position })
            }
            Token::Keyword(Keyword::Function) => self.parse_function_expression(),
            Token::Punctuator(Punctuator::LParen) => {
                self.lexer.next_token()?;
                let expression = self.parse_expression()?;
                self.expect_punctuator(Punctuator::RParen)?;
                Ok(Expression::ParenthesizedExpression {
                    expression: Box::new(expression),
                    position,
                })
            }
            Token::Punctuator(Punctuator::LBracket) => self.parse_array_literal(),
            Token::Punctuator(Punctuator::LBrace) => self.parse_object_literal(),
            token => Err(unexpected_token("expression", &describe(&token), position)),
        }
    }

    fn parse_function_expression(&mut self) -> Result<Expression, JsError> {
        let position = self.position()?;
        self.expect_keyword(Keyword::Function)?;
        let name = match self.lexer.peek_token()? {
            Token::Identifier(name) => {
                let name = name.clone();
                self.lexer.next_token()?;
                Some(name)
            }
            _ => None,
        };
        let params = self.parse_function_params()?;
        let body = self.parse_brace_block()?;
        Ok(Expression::FunctionExpression {
            name,
            params,
            body,
            position,
        })
    }

    fn parse_array_literal(&mut self) -> Result<Expression, JsError> {
        let position = self.position()?;
        self.expect_punctuator(Punctuator::LBracket)?;
        let mut elements = Vec::new();
        loop {
            if self.check_punctuator(Punctuator::RBracket)? {
                break;
            }
            // A bare comma is an elision
            if self.eat_punctuator(Punctuator::Comma)? {
                elements.push(None);
                continue;
            }
            elements.push(Some(self.parse_assignment_expression()?));
            if !self.eat_punctuator(Punctuator::Comma)? {
                break;
            }
        }
        self.expect_punctuator(Punctuator::RBracket)?;
        Ok(Expression::ArrayExpression { elements, position })
    }

    fn parse_object_literal(&mut self) -> Result<Expression, JsError> {
        let position = self.position()?;
        self.expect_punctuator(Punctuator::LBrace)?;
        let mut properties = Vec::new();
        if !self.check_punctuator(Punctuator::RBrace)? {
            loop {
                let key = self.parse_property_key()?;
                self.expect_punctuator(Punctuator::Colon)?;
                let value = self.parse_assignment_expression()?;
                properties.push(ObjectProperty { key, value });

                if !self.eat_punctuator(Punctuator::Comma)? {
                    break;
                }
                if self.check_punctuator(Punctuator::RBrace)? {
                    break;
                }
            }
        }
        self.expect_punctuator(Punctuator::RBrace)?;
        Ok(Expression::ObjectExpression {
            properties,
            position,
        })
    }

    fn parse_property_key(&mut self) -> Result<PropertyKey, JsError> {
        self.lexer.peek_token()?;
        let position = self.lexer.token_position;
        match self.lexer.next_token()? {
            Token::Identifier(name) => Ok(PropertyKey::Identifier(name)),
            Token::String { value, raw } => Ok(PropertyKey::String { value, raw }),
            Token::Number(value) => Ok(PropertyKey::Number(value)),
            token => Err(unexpected_token(
                "property name",
                &describe(&token),
                Some(position),
            )),
        }
    }
}

fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Expression {
    let position = left.position();
    Expression::BinaryExpression {
        left: Box::new(left),
        operator,
        right: Box::new(right),
        position,
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Identifier(name) => format!("identifier '{}'", name),
        Token::Number(value) => format!("number {}", value),
        Token::String { raw, .. } => format!("string {}", raw),
        Token::RegExp(pattern, flags) => format!("regex /{}/{}", pattern, flags),
        Token::Keyword(keyword) => format!("'{}'", keyword_text(*keyword)),
        Token::Punctuator(punctuator) => format!("'{}'", punctuator_text(*punctuator)),
        Token::EOF => "end of input".to_string(),
    }
}

fn keyword_text(keyword: Keyword) -> &'static str {
    match keyword {
        Keyword::Var => "var",
        Keyword::Function => "function",
        Keyword::Return => "return",
        Keyword::If => "if",
        Keyword::Else => "else",
        Keyword::While => "while",
        Keyword::Do => "do",
        Keyword::For => "for",
        Keyword::Break => "break",
        Keyword::Continue => "continue",
        Keyword::New => "new",
        Keyword::This => "this",
        Keyword::Typeof => "typeof",
        Keyword::Void => "void",
        Keyword::Delete => "delete",
        Keyword::Instanceof => "instanceof",
        Keyword::In => "in",
        Keyword::Try => "try",
        Keyword::Catch => "catch",
        Keyword::Finally => "finally",
        Keyword::Throw => "throw",
        Keyword::With => "with",
        Keyword::Switch => "switch",
        Keyword::Case => "case",
        Keyword::Default => "default",
        Keyword::True => "true",
        Keyword::False => "false",
        Keyword::Null => "null",
    }
}

fn punctuator_text(punctuator: Punctuator) -> &'static str {
    match punctuator {
        Punctuator::LParen => "(",
        Punctuator::RParen => ")",
        Punctuator::LBrace => "{",
        Punctuator::RBrace => "}",
        Punctuator::LBracket => "[",
        Punctuator::RBracket => "]",
        Punctuator::Semicolon => ";",
        Punctuator::Comma => ",",
        Punctuator::Dot => ".",
        Punctuator::Colon => ":",
        Punctuator::Question => "?",
        Punctuator::Assign => "=",
        Punctuator::Plus => "+",
        Punctuator::Minus => "-",
        Punctuator::Star => "*",
        Punctuator::Slash => "/",
        Punctuator::Percent => "%",
        Punctuator::EqEq => "==",
        Punctuator::EqEqEq => "===",
        Punctuator::NotEq => "!=",
        Punctuator::NotEqEq => "!==",
        Punctuator::Lt => "<",
        Punctuator::LtEq => "<=",
        Punctuator::Gt => ">",
        Punctuator::GtEq => ">=",
        Punctuator::AndAnd => "&&",
        Punctuator::OrOr => "||",
        Punctuator::Not => "!",
        Punctuator::And => "&",
        Punctuator::Or => "|",
        Punctuator::Xor => "^",
        Punctuator::Tilde => "~",
        Punctuator::LtLt => "<<",
        Punctuator::GtGt => ">>",
        Punctuator::GtGtGt => ">>>",
        Punctuator::PlusEq => "+=",
        Punctuator::MinusEq => "-=",
        Punctuator::StarEq => "*=",
        Punctuator::SlashEq => "/=",
        Punctuator::PercentEq => "%=",
        Punctuator::AndEq => "&=",
        Punctuator::OrEq => "|=",
        Punctuator::XorEq => "^=",
        Punctuator::LtLtEq => "<<=",
        Punctuator::GtGtEq => ">>=",
        Punctuator::GtGtGtEq => ">>>=",
        Punctuator::PlusPlus => "++",
        Punctuator::MinusMinus => "--",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Program {
        Parser::new(source).parse().unwrap()
    }

    #[test]
    fn test_parse_variable_declaration() {
        let program = parse("var x = 1, y;");
        assert_eq!(program.body.len(), 1);
        match &program.body[0] {
            Statement::VariableDeclaration { declarations, .. } => {
                assert_eq!(declarations.len(), 2);
                assert_eq!(declarations[0].name, "x");
                assert!(declarations[0].init.is_some());
                assert_eq!(declarations[1].name, "y");
                assert!(declarations[1].init.is_none());
            }
            other => panic!("expected var declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_member_chain() {
        let program = parse("a.b['c'](1)");
        let Statement::ExpressionStatement { expression, .. } = &program.body[0] else {
            panic!("expected expression statement");
        };
        let Expression::CallExpression { callee, arguments, .. } = expression else {
            panic!("expected call, got {:?}", expression);
        };
        assert_eq!(arguments.len(), 1);
        let Expression::MemberExpression { computed, .. } = callee.as_ref() else {
            panic!("expected member expression");
        };
        assert!(*computed);
    }

    #[test]
    fn test_asi_after_return() {
        let program = parse("function f() { return\n1; }");
        let Statement::FunctionDeclaration { body, .. } = &program.body[0] else {
            panic!("expected function");
        };
        assert!(matches!(
            body[0],
            Statement::ReturnStatement { argument: None, .. }
        ));
        assert!(matches!(body[1], Statement::ExpressionStatement { .. }));
    }

    #[test]
    fn test_postfix_does_not_cross_newline() {
        let program = parse("a\n++b");
        assert_eq!(program.body.len(), 2);
        assert!(matches!(
            &program.body[1],
            Statement::ExpressionStatement {
                expression: Expression::UpdateExpression { prefix: true, .. },
                ..
            }
        ));
    }

    #[test]
    fn test_for_in_with_var() {
        let program = parse("for (var k in obj) f(k);");
        assert!(matches!(
            &program.body[0],
            Statement::ForInStatement {
                left: ForInLeft::VariableDeclaration(_),
                ..
            }
        ));
    }

    #[test]
    fn test_for_classic() {
        let program = parse("for (var i = 0; i < 10; i++) ;");
        let Statement::ForStatement { init, test, update, .. } = &program.body[0] else {
            panic!("expected for");
        };
        assert!(matches!(init, Some(ForInit::VariableDeclaration(_))));
        assert!(test.is_some());
        assert!(update.is_some());
    }

    #[test]
    fn test_object_literal_keys() {
        let program = parse("var y = { _field1: 1, \"_field2\": 2, \"3\": 3, 4: 5 };");
        let Statement::VariableDeclaration { declarations, .. } = &program.body[0] else {
            panic!("expected var");
        };
        let Some(Expression::ObjectExpression { properties, .. }) = &declarations[0].init else {
            panic!("expected object literal");
        };
        assert_eq!(properties.len(), 4);
        assert!(matches!(&properties[0].key, PropertyKey::Identifier(n) if n == "_field1"));
        assert!(
            matches!(&properties[1].key, PropertyKey::String { value, .. } if value == "_field2")
        );
        assert!(matches!(&properties[2].key, PropertyKey::String { value, .. } if value == "3"));
        assert!(matches!(&properties[3].key, PropertyKey::Number(n) if *n == 4.0));
    }

    #[test]
    fn test_regex_vs_division() {
        let program = parse("var re = /ab+c/g; var q = a / b;");
        let Statement::VariableDeclaration { declarations, .. } = &program.body[0] else {
            panic!("expected var");
        };
        assert!(matches!(
            &declarations[0].init,
            Some(Expression::RegExpLiteral { pattern, flags, .. })
                if pattern == "ab+c" && flags == "g"
        ));
        let Statement::VariableDeclaration { declarations, .. } = &program.body[1] else {
            panic!("expected var");
        };
        assert!(matches!(
            &declarations[0].init,
            Some(Expression::BinaryExpression {
                operator: BinaryOperator::Div,
                ..
            })
        ));
    }

    #[test]
    fn test_new_expression_forms() {
        let program = parse("var a = new Foo(); var b = new Foo; var c = new a.b.C(1);");
        for statement in &program.body {
            let Statement::VariableDeclaration { declarations, .. } = statement else {
                panic!("expected var");
            };
            assert!(matches!(
                declarations[0].init,
                Some(Expression::NewExpression { .. })
            ));
        }
    }

    #[test]
    fn test_labeled_statement() {
        let program = parse("outer: while (x) { break outer; }");
        assert!(matches!(
            &program.body[0],
            Statement::LabeledStatement { label, .. } if label == "outer"
        ));
    }

    #[test]
    fn test_switch_cases() {
        let program = parse("switch (x) { case 1: f(); break; default: g(); }");
        let Statement::SwitchStatement { cases, .. } = &program.body[0] else {
            panic!("expected switch");
        };
        assert_eq!(cases.len(), 2);
        assert!(cases[0].test.is_some());
        assert!(cases[1].test.is_none());
    }

    #[test]
    fn test_try_catch_finally() {
        let program = parse("try { f(); } catch (e) { g(e); } finally { h(); }");
        let Statement::TryStatement { handler, finalizer, .. } = &program.body[0] else {
            panic!("expected try");
        };
        assert_eq!(handler.as_ref().unwrap().param, "e");
        assert!(finalizer.is_some());
    }

    #[test]
    fn test_conditional_and_sequence() {
        let program = parse("a ? b : c, d");
        let Statement::ExpressionStatement { expression, .. } = &program.body[0] else {
            panic!("expected expression statement");
        };
        let Expression::SequenceExpression { expressions, .. } = expression else {
            panic!("expected sequence, got {:?}", expression);
        };
        assert_eq!(expressions.len(), 2);
        assert!(matches!(
            expressions[0],
            Expression::ConditionalExpression { .. }
        ));
    }

    #[test]
    fn test_in_operator_excluded_from_for_init() {
        // `in` binds normally outside for-init
        let program = parse("var a = k in obj;");
        let Statement::VariableDeclaration { declarations, .. } = &program.body[0] else {
            panic!("expected var");
        };
        assert!(matches!(
            &declarations[0].init,
            Some(Expression::BinaryExpression {
                operator: BinaryOperator::In,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_catch_and_finally_is_error() {
        assert!(Parser::new("try { f(); }").parse().is_err());
    }

    #[test]
    fn test_invalid_assignment_target() {
        assert!(Parser::new("1 = x;").parse().is_err());
    }

    #[test]
    fn test_throw_requires_same_line_argument() {
        assert!(Parser::new("throw\nx;").parse().is_err());
    }

    #[test]
    fn test_array_elisions() {
        let program = parse("var a = [1, , 2, ];");
        let Statement::VariableDeclaration { declarations, .. } = &program.body[0] else {
            panic!("expected var");
        };
        let Some(Expression::ArrayExpression { elements, .. }) = &declarations[0].init else {
            panic!("expected array literal");
        };
        assert_eq!(elements.len(), 3);
        assert!(elements[0].is_some());
        assert!(elements[1].is_none());
        assert!(elements[2].is_some());
    }
}
