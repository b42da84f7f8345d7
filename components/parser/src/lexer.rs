//! JavaScript Lexer - tokenizes source code into tokens

use crate::error::syntax_error;
use core_types::{JsError, SourcePosition};

/// JavaScript keyword types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// var keyword
    Var,
    /// function keyword
    Function,
    /// return keyword
    Return,
    /// if keyword
    If,
    /// else keyword
    Else,
    /// while keyword
    While,
    /// do keyword
    Do,
    /// for keyword
    For,
    /// break keyword
    Break,
    /// continue keyword
    Continue,
    /// new keyword
    New,
    /// this keyword
    This,
    /// typeof keyword
    Typeof,
    /// void keyword
    Void,
    /// delete keyword
    Delete,
    /// instanceof keyword
    Instanceof,
    /// in keyword
    In,
    /// try keyword
    Try,
    /// catch keyword
    Catch,
    /// finally keyword
    Finally,
    /// throw keyword
    Throw,
    /// with keyword
    With,
    /// switch keyword
    Switch,
    /// case keyword
    Case,
    /// default keyword
    Default,
    /// true keyword
    True,
    /// false keyword
    False,
    /// null keyword
    Null,
}

/// JavaScript punctuators (operators and delimiters)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punctuator {
    /// Opening parenthesis
    LParen,
    /// Closing parenthesis
    RParen,
    /// Opening brace
    LBrace,
    /// Closing brace
    RBrace,
    /// Opening bracket
    LBracket,
    /// Closing bracket
    RBracket,
    /// Semicolon
    Semicolon,
    /// Comma
    Comma,
    /// Dot
    Dot,
    /// Colon
    Colon,
    /// Question mark
    Question,
    /// Assignment
    Assign,
    /// Plus
    Plus,
    /// Minus
    Minus,
    /// Multiply
    Star,
    /// Divide
    Slash,
    /// Modulo
    Percent,
    /// Equality
    EqEq,
    /// Strict equality
    EqEqEq,
    /// Inequality
    NotEq,
    /// Strict inequality
    NotEqEq,
    /// Less than
    Lt,
    /// Less than or equal
    LtEq,
    /// Greater than
    Gt,
    /// Greater than or equal
    GtEq,
    /// Logical AND
    AndAnd,
    /// Logical OR
    OrOr,
    /// Logical NOT
    Not,
    /// Bitwise AND
    And,
    /// Bitwise OR
    Or,
    /// Bitwise XOR
    Xor,
    /// Bitwise NOT
    Tilde,
    /// Left shift
    LtLt,
    /// Right shift
    GtGt,
    /// Unsigned right shift
    GtGtGt,
    /// Plus equals
    PlusEq,
    /// Minus equals
    MinusEq,
    /// Multiply equals
    StarEq,
    /// Divide equals
    SlashEq,
    /// Modulo equals
    PercentEq,
    /// Bitwise AND equals
    AndEq,
    /// Bitwise OR equals
    OrEq,
    /// Bitwise XOR equals
    XorEq,
    /// Left shift equals
    LtLtEq,
    /// Right shift equals
    GtGtEq,
    /// Unsigned right shift equals
    GtGtGtEq,
    /// Increment
    PlusPlus,
    /// Decrement
    MinusMinus,
}

/// Token produced by the lexer
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Identifier (variable name, property name, label)
    Identifier(String),
    /// Number literal
    Number(f64),
    /// String literal, cooked value plus the raw source slice with quotes
    String {
        /// Value with escape sequences resolved
        value: String,
        /// Raw text as written, including quotes
        raw: String,
    },
    /// Regular expression literal (pattern, flags)
    RegExp(String, String),
    /// Keyword
    Keyword(Keyword),
    /// Punctuator/operator
    Punctuator(Punctuator),
    /// End of file
    EOF,
}

/// Whether `ch` can start an identifier
pub fn is_id_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

/// Whether `ch` can continue an identifier
pub fn is_id_continue(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// Whether `name` is lexically a valid identifier (reserved words included)
pub fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_id_start(first) => chars.all(is_id_continue),
        _ => false,
    }
}

/// Reserved words, including the future reserved words of the era
static RESERVED_WORDS: &[&str] = &[
    "abstract", "boolean", "break", "byte", "case", "catch", "char", "class", "const", "continue",
    "debugger", "default", "delete", "do", "double", "else", "enum", "export", "extends", "false",
    "final", "finally", "float", "for", "function", "goto", "if", "implements", "import", "in",
    "instanceof", "int", "interface", "long", "native", "new", "null", "package", "private",
    "protected", "public", "return", "short", "static", "super", "switch", "synchronized", "this",
    "throw", "throws", "transient", "true", "try", "typeof", "var", "void", "volatile", "while",
    "with",
];

/// Whether `name` is a reserved word and therefore unusable as an identifier
pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.binary_search(&name).is_ok()
}

fn keyword_from_str(name: &str) -> Option<Keyword> {
    let kw = match name {
        "var" => Keyword::Var,
        "function" => Keyword::Function,
        "return" => Keyword::Return,
        "if" => Keyword::If,
        "else" => Keyword::Else,
        "while" => Keyword::While,
        "do" => Keyword::Do,
        "for" => Keyword::For,
        "break" => Keyword::Break,
        "continue" => Keyword::Continue,
        "new" => Keyword::New,
        "this" => Keyword::This,
        "typeof" => Keyword::Typeof,
        "void" => Keyword::Void,
        "delete" => Keyword::Delete,
        "instanceof" => Keyword::Instanceof,
        "in" => Keyword::In,
        "try" => Keyword::Try,
        "catch" => Keyword::Catch,
        "finally" => Keyword::Finally,
        "throw" => Keyword::Throw,
        "with" => Keyword::With,
        "switch" => Keyword::Switch,
        "case" => Keyword::Case,
        "default" => Keyword::Default,
        "true" => Keyword::True,
        "false" => Keyword::False,
        "null" => Keyword::Null,
        _ => return None,
    };
    Some(kw)
}

/// Lexer for JavaScript source code
pub struct Lexer {
    chars: Vec<char>,
    position: usize,
    line: u32,
    column: u32,
    current_token: Option<Token>,
    /// Start of the current token: char index, line, column. Used to rewind
    /// when the parser asks for a `/` to be rescanned as a regex literal.
    token_start: (usize, u32, u32),
    /// Position of the current (peeked or last returned) token
    pub token_position: SourcePosition,
    /// Tracks if a line terminator was encountered before the current token.
    /// Used for Automatic Semicolon Insertion (ASI).
    pub line_terminator_before_token: bool,
}

impl Lexer {
    /// Create a new lexer for the given source code
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            current_token: None,
            token_start: (0, 1, 1),
            token_position: SourcePosition::new(1, 1),
            line_terminator_before_token: false,
        }
    }

    /// Get the next token from the source
    pub fn next_token(&mut self) -> Result<Token, JsError> {
        if let Some(token) = self.current_token.take() {
            return Ok(token);
        }
        self.scan_token()
    }

    /// Peek at the next token without consuming it
    pub fn peek_token(&mut self) -> Result<&Token, JsError> {
        if self.current_token.is_none() {
            let token = self.scan_token()?;
            self.current_token = Some(token);
        }
        Ok(self.current_token.as_ref().unwrap())
    }

    /// Check whether the token after the current (buffered) one is a colon.
    /// Used to recognize labeled statements with one extra token of lookahead.
    pub fn colon_follows(&mut self) -> Result<bool, JsError> {
        self.peek_token()?;

        // Save lexer state
        let saved_position = self.position;
        let saved_line = self.line;
        let saved_column = self.column;
        let saved_token = self.current_token.take();
        let saved_token_start = self.token_start;
        let saved_token_position = self.token_position;
        let saved_line_term = self.line_terminator_before_token;

        let next = self.scan_token()?;
        let is_colon = matches!(next, Token::Punctuator(Punctuator::Colon));

        // Restore lexer state
        self.position = saved_position;
        self.line = saved_line;
        self.column = saved_column;
        self.current_token = saved_token;
        self.token_start = saved_token_start;
        self.token_position = saved_token_position;
        self.line_terminator_before_token = saved_line_term;

        Ok(is_colon)
    }

    /// Rescan the current `/` or `/=` token as a regular expression literal.
    ///
    /// The parser calls this when a slash shows up where an expression is
    /// expected, so the slash cannot be a division operator.
    pub fn rescan_regexp(&mut self) -> Result<Token, JsError> {
        let (index, line, column) = self.token_start;
        self.position = index;
        self.line = line;
        self.column = column;
        self.current_token = None;
        self.scan_regexp()
    }

    fn scan_regexp(&mut self) -> Result<Token, JsError> {
        let start_pos = SourcePosition::new(self.line, self.column);
        self.token_position = start_pos;

        if self.is_at_end() || self.peek() != '/' {
            return Err(syntax_error(
                "Expected '/' at start of regexp",
                Some(start_pos),
            ));
        }
        self.advance();

        let mut pattern = String::new();
        let mut in_class = false;

        loop {
            if self.is_at_end() {
                return Err(syntax_error(
                    "Unterminated regular expression",
                    Some(start_pos),
                ));
            }

            let ch = self.peek();

            // Line terminators are not allowed in a regex literal
            if is_line_terminator(ch) {
                return Err(syntax_error(
                    "Unterminated regular expression",
                    Some(start_pos),
                ));
            }

            if ch == '\\' {
                pattern.push(ch);
                self.advance();
                if !self.is_at_end() {
                    pattern.push(self.peek());
                    self.advance();
                }
            } else if ch == '[' {
                in_class = true;
                pattern.push(ch);
                self.advance();
            } else if ch == ']' && in_class {
                in_class = false;
                pattern.push(ch);
                self.advance();
            } else if ch == '/' && !in_class {
                self.advance();
                break;
            } else {
                pattern.push(ch);
                self.advance();
            }
        }

        let mut flags = String::new();
        while !self.is_at_end() && is_id_continue(self.peek()) {
            flags.push(self.peek());
            self.advance();
        }

        Ok(Token::RegExp(pattern, flags))
    }

    fn scan_token(&mut self) -> Result<Token, JsError> {
        let line_before = self.line;

        self.skip_whitespace_and_comments()?;

        // Check if we crossed a line boundary (for ASI)
        self.line_terminator_before_token = self.line > line_before;

        self.token_start = (self.position, self.line, self.column);
        self.token_position = SourcePosition::new(self.line, self.column);

        if self.is_at_end() {
            return Ok(Token::EOF);
        }

        let start_pos = self.token_position;
        let ch = self.advance();

        match ch {
            '(' => Ok(Token::Punctuator(Punctuator::LParen)),
            ')' => Ok(Token::Punctuator(Punctuator::RParen)),
            '{' => Ok(Token::Punctuator(Punctuator::LBrace)),
            '}' => Ok(Token::Punctuator(Punctuator::RBrace)),
            '[' => Ok(Token::Punctuator(Punctuator::LBracket)),
            ']' => Ok(Token::Punctuator(Punctuator::RBracket)),
            ';' => Ok(Token::Punctuator(Punctuator::Semicolon)),
            ',' => Ok(Token::Punctuator(Punctuator::Comma)),
            ':' => Ok(Token::Punctuator(Punctuator::Colon)),
            '?' => Ok(Token::Punctuator(Punctuator::Question)),
            '~' => Ok(Token::Punctuator(Punctuator::Tilde)),

            '.' => {
                if !self.is_at_end() && self.peek().is_ascii_digit() {
                    // Number with a leading decimal point: .5, .125
                    self.scan_leading_decimal_number()
                } else {
                    Ok(Token::Punctuator(Punctuator::Dot))
                }
            }

            '=' => {
                if self.match_char('=') {
                    if self.match_char('=') {
                        Ok(Token::Punctuator(Punctuator::EqEqEq))
                    } else {
                        Ok(Token::Punctuator(Punctuator::EqEq))
                    }
                } else {
                    Ok(Token::Punctuator(Punctuator::Assign))
                }
            }

            '+' => {
                if self.match_char('+') {
                    Ok(Token::Punctuator(Punctuator::PlusPlus))
                } else if self.match_char('=') {
                    Ok(Token::Punctuator(Punctuator::PlusEq))
                } else {
                    Ok(Token::Punctuator(Punctuator::Plus))
                }
            }

            '-' => {
                if self.match_char('-') {
                    Ok(Token::Punctuator(Punctuator::MinusMinus))
                } else if self.match_char('=') {
                    Ok(Token::Punctuator(Punctuator::MinusEq))
                } else {
                    Ok(Token::Punctuator(Punctuator::Minus))
                }
            }

            '*' => {
                if self.match_char('=') {
                    Ok(Token::Punctuator(Punctuator::StarEq))
                } else {
                    Ok(Token::Punctuator(Punctuator::Star))
                }
            }

            '/' => {
                if self.match_char('=') {
                    Ok(Token::Punctuator(Punctuator::SlashEq))
                } else {
                    Ok(Token::Punctuator(Punctuator::Slash))
                }
            }

            '%' => {
                if self.match_char('=') {
                    Ok(Token::Punctuator(Punctuator::PercentEq))
                } else {
                    Ok(Token::Punctuator(Punctuator::Percent))
                }
            }

            '!' => {
                if self.match_char('=') {
                    if self.match_char('=') {
                        Ok(Token::Punctuator(Punctuator::NotEqEq))
                    } else {
                        Ok(Token::Punctuator(Punctuator::NotEq))
                    }
                } else {
                    Ok(Token::Punctuator(Punctuator::Not))
                }
            }

            '<' => {
                if self.match_char('<') {
                    if self.match_char('=') {
                        Ok(Token::Punctuator(Punctuator::LtLtEq))
                    } else {
                        Ok(Token::Punctuator(Punctuator::LtLt))
                    }
                } else if self.match_char('=') {
                    Ok(Token::Punctuator(Punctuator::LtEq))
                } else {
                    Ok(Token::Punctuator(Punctuator::Lt))
                }
            }

            '>' => {
                if self.match_char('>') {
                    if self.match_char('>') {
                        if self.match_char('=') {
                            Ok(Token::Punctuator(Punctuator::GtGtGtEq))
                        } else {
                            Ok(Token::Punctuator(Punctuator::GtGtGt))
                        }
                    } else if self.match_char('=') {
                        Ok(Token::Punctuator(Punctuator::GtGtEq))
                    } else {
                        Ok(Token::Punctuator(Punctuator::GtGt))
                    }
                } else if self.match_char('=') {
                    Ok(Token::Punctuator(Punctuator::GtEq))
                } else {
                    Ok(Token::Punctuator(Punctuator::Gt))
                }
            }

            '&' => {
                if self.match_char('&') {
                    Ok(Token::Punctuator(Punctuator::AndAnd))
                } else if self.match_char('=') {
                    Ok(Token::Punctuator(Punctuator::AndEq))
                } else {
                    Ok(Token::Punctuator(Punctuator::And))
                }
            }

            '|' => {
                if self.match_char('|') {
                    Ok(Token::Punctuator(Punctuator::OrOr))
                } else if self.match_char('=') {
                    Ok(Token::Punctuator(Punctuator::OrEq))
                } else {
                    Ok(Token::Punctuator(Punctuator::Or))
                }
            }

            '^' => {
                if self.match_char('=') {
                    Ok(Token::Punctuator(Punctuator::XorEq))
                } else {
                    Ok(Token::Punctuator(Punctuator::Xor))
                }
            }

            '"' | '\'' => self.scan_string(ch),

            _ if ch.is_ascii_digit() => self.scan_number(ch),

            _ if is_id_start(ch) => self.scan_identifier(ch),

            _ => Err(syntax_error(
                format!("Unexpected character: '{}'", ch),
                Some(start_pos),
            )),
        }
    }

    fn scan_string(&mut self, quote: char) -> Result<Token, JsError> {
        let start_pos = self.token_position;
        let mut value = String::new();
        let mut raw = String::new();
        raw.push(quote);

        while !self.is_at_end() && self.peek() != quote {
            let ch = self.peek();
            if is_line_terminator(ch) {
                return Err(syntax_error("Unterminated string", Some(start_pos)));
            }
            if ch == '\\' {
                raw.push(ch);
                self.advance();
                if self.is_at_end() {
                    return Err(syntax_error("Unterminated string", Some(start_pos)));
                }
                let escaped = self.advance();
                raw.push(escaped);
                match escaped {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    'b' => value.push('\u{0008}'),
                    'f' => value.push('\u{000C}'),
                    'v' => value.push('\u{000B}'),
                    '0' => value.push('\0'),
                    'x' => {
                        let code = self.scan_hex_escape(2, start_pos, &mut raw)?;
                        value.push(code);
                    }
                    'u' => {
                        let code = self.scan_hex_escape(4, start_pos, &mut raw)?;
                        value.push(code);
                    }
                    // Line continuation: backslash followed by a line terminator
                    c if is_line_terminator(c) => {}
                    c => value.push(c),
                }
            } else {
                value.push(ch);
                raw.push(ch);
                self.advance();
            }
        }

        if self.is_at_end() {
            return Err(syntax_error("Unterminated string", Some(start_pos)));
        }

        self.advance(); // closing quote
        raw.push(quote);
        Ok(Token::String { value, raw })
    }

    fn scan_hex_escape(
        &mut self,
        digits: usize,
        start_pos: SourcePosition,
        raw: &mut String,
    ) -> Result<char, JsError> {
        let mut code: u32 = 0;
        for _ in 0..digits {
            if self.is_at_end() {
                return Err(syntax_error("Unterminated string", Some(start_pos)));
            }
            let ch = self.advance();
            raw.push(ch);
            let digit = ch
                .to_digit(16)
                .ok_or_else(|| syntax_error("Invalid escape sequence", Some(start_pos)))?;
            code = code * 16 + digit;
        }
        char::from_u32(code)
            .ok_or_else(|| syntax_error("Invalid escape sequence", Some(start_pos)))
    }

    fn scan_number(&mut self, first: char) -> Result<Token, JsError> {
        let start_pos = self.token_position;

        // Hex literal: 0x1f
        if first == '0' && !self.is_at_end() && matches!(self.peek(), 'x' | 'X') {
            self.advance();
            let mut value: f64 = 0.0;
            let mut any = false;
            while !self.is_at_end() && self.peek().is_ascii_hexdigit() {
                let digit = self.advance().to_digit(16).unwrap();
                value = value * 16.0 + digit as f64;
                any = true;
            }
            if !any {
                return Err(syntax_error("Missing hexadecimal digits", Some(start_pos)));
            }
            return Ok(Token::Number(value));
        }

        let mut num_str = first.to_string();
        while !self.is_at_end() && self.peek().is_ascii_digit() {
            num_str.push(self.advance());
        }
        if !self.is_at_end() && self.peek() == '.' {
            num_str.push(self.advance());
            while !self.is_at_end() && self.peek().is_ascii_digit() {
                num_str.push(self.advance());
            }
        }
        self.scan_exponent(&mut num_str)?;

        num_str
            .parse::<f64>()
            .map(Token::Number)
            .map_err(|_| syntax_error(format!("Invalid number: {}", num_str), Some(start_pos)))
    }

    fn scan_leading_decimal_number(&mut self) -> Result<Token, JsError> {
        let start_pos = self.token_position;
        let mut num_str = "0.".to_string();
        while !self.is_at_end() && self.peek().is_ascii_digit() {
            num_str.push(self.advance());
        }
        self.scan_exponent(&mut num_str)?;

        num_str
            .parse::<f64>()
            .map(Token::Number)
            .map_err(|_| syntax_error(format!("Invalid number: {}", num_str), Some(start_pos)))
    }

    fn scan_exponent(&mut self, num_str: &mut String) -> Result<(), JsError> {
        if !self.is_at_end() && matches!(self.peek(), 'e' | 'E') {
            let start_pos = SourcePosition::new(self.line, self.column);
            num_str.push(self.advance());
            if !self.is_at_end() && matches!(self.peek(), '+' | '-') {
                num_str.push(self.advance());
            }
            if self.is_at_end() || !self.peek().is_ascii_digit() {
                return Err(syntax_error("Missing exponent digits", Some(start_pos)));
            }
            while !self.is_at_end() && self.peek().is_ascii_digit() {
                num_str.push(self.advance());
            }
        }
        Ok(())
    }

    fn scan_identifier(&mut self, first: char) -> Result<Token, JsError> {
        let mut name = first.to_string();
        while !self.is_at_end() && is_id_continue(self.peek()) {
            name.push(self.advance());
        }
        match keyword_from_str(&name) {
            Some(kw) => Ok(Token::Keyword(kw)),
            None => Ok(Token::Identifier(name)),
        }
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), JsError> {
        loop {
            if self.is_at_end() {
                return Ok(());
            }
            let ch = self.peek();
            if ch.is_whitespace() || ch == '\u{FEFF}' {
                self.advance();
            } else if ch == '/' && self.peek_next() == Some('/') {
                while !self.is_at_end() && !is_line_terminator(self.peek()) {
                    self.advance();
                }
            } else if ch == '/' && self.peek_next() == Some('*') {
                let start_pos = SourcePosition::new(self.line, self.column);
                self.advance();
                self.advance();
                loop {
                    if self.is_at_end() {
                        return Err(syntax_error("Unterminated comment", Some(start_pos)));
                    }
                    if self.peek() == '*' && self.peek_next() == Some('/') {
                        self.advance();
                        self.advance();
                        break;
                    }
                    self.advance();
                }
            } else {
                return Ok(());
            }
        }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.chars.len()
    }

    fn peek(&self) -> char {
        self.chars[self.position]
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.position + 1).copied()
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.position];
        self.position += 1;
        if ch == '\n' || ch == '\u{2028}' || ch == '\u{2029}' {
            self.line += 1;
            self.column = 1;
        } else if ch == '\r' {
            // CRLF counts as one terminator
            if self.chars.get(self.position) != Some(&'\n') {
                self.line += 1;
                self.column = 1;
            }
        } else {
            self.column += 1;
        }
        ch
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.peek() != expected {
            return false;
        }
        self.advance();
        true
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_tokens(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token().unwrap();
            if token == Token::EOF {
                return tokens;
            }
            tokens.push(token);
        }
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let tokens = all_tokens("var foo = bar;");
        assert_eq!(
            tokens,
            vec![
                Token::Keyword(Keyword::Var),
                Token::Identifier("foo".to_string()),
                Token::Punctuator(Punctuator::Assign),
                Token::Identifier("bar".to_string()),
                Token::Punctuator(Punctuator::Semicolon),
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(all_tokens("42"), vec![Token::Number(42.0)]);
        assert_eq!(all_tokens("4.25"), vec![Token::Number(4.25)]);
        assert_eq!(all_tokens(".5"), vec![Token::Number(0.5)]);
        assert_eq!(all_tokens("0x1f"), vec![Token::Number(31.0)]);
        assert_eq!(all_tokens("1e3"), vec![Token::Number(1000.0)]);
    }

    #[test]
    fn test_string_keeps_raw_text() {
        let tokens = all_tokens("'a\\nb'");
        assert_eq!(
            tokens,
            vec![Token::String {
                value: "a\nb".to_string(),
                raw: "'a\\nb'".to_string(),
            }]
        );
    }

    #[test]
    fn test_multi_char_punctuators() {
        let tokens = all_tokens("a >>>= b === c");
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("a".to_string()),
                Token::Punctuator(Punctuator::GtGtGtEq),
                Token::Identifier("b".to_string()),
                Token::Punctuator(Punctuator::EqEqEq),
                Token::Identifier("c".to_string()),
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        let tokens = all_tokens("a // trailing\n/* block\nstill block */ b");
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("a".to_string()),
                Token::Identifier("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_line_terminator_flag() {
        let mut lexer = Lexer::new("a\nb");
        lexer.next_token().unwrap();
        assert!(!lexer.line_terminator_before_token);
        lexer.next_token().unwrap();
        assert!(lexer.line_terminator_before_token);
    }

    #[test]
    fn test_rescan_regexp() {
        let mut lexer = Lexer::new("/ab[c/]d/gi");
        assert_eq!(
            lexer.peek_token().unwrap(),
            &Token::Punctuator(Punctuator::Slash)
        );
        let token = lexer.rescan_regexp().unwrap();
        assert_eq!(
            token,
            Token::RegExp("ab[c/]d".to_string(), "gi".to_string())
        );
        assert_eq!(lexer.next_token().unwrap(), Token::EOF);
    }

    #[test]
    fn test_token_position() {
        let mut lexer = Lexer::new("a\n  b");
        lexer.next_token().unwrap();
        assert_eq!(lexer.token_position, SourcePosition::new(1, 1));
        lexer.peek_token().unwrap();
        assert_eq!(lexer.token_position, SourcePosition::new(2, 3));
    }

    #[test]
    fn test_unterminated_string() {
        let mut lexer = Lexer::new("'abc");
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn test_reserved_word_table() {
        assert!(is_reserved_word("void"));
        assert!(is_reserved_word("class"));
        assert!(!is_reserved_word("_prop1"));
    }

    #[test]
    fn test_identifier_name_check() {
        assert!(is_identifier_name("_prop1"));
        assert!(is_identifier_name("$x"));
        assert!(!is_identifier_name("3abc"));
        assert!(!is_identifier_name("_should not rename"));
        assert!(!is_identifier_name(""));
    }
}
