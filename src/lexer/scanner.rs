use super::token::{Token, TokenKind};
use crate::error::{Error, Result};

/// Scanner for S-expression source text
pub struct Scanner {
    /// Source code as character vector
    source: Vec<char>,
    /// Accumulated tokens
    tokens: Vec<Token>,
    /// Start position of the current token
    start: usize,
    /// Current position in source
    current: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
}

impl Scanner {
    /// Creates a new scanner from source code
    pub fn new(source: &str) -> Self {
        Scanner {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            column: 1,
        }
    }

    /// Scans all tokens from source code and returns them as a vector
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token()?;
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            String::new(),
            self.line,
            self.column,
        ));

        Ok(self.tokens.clone())
    }

    fn scan_token(&mut self) -> Result<()> {
        let c = self.advance();

        match c {
            // Whitespace; commas count as whitespace in this dialect
            ' ' | '\r' | '\t' | ',' => {}
            '\n' => {
                self.line += 1;
                self.column = 1;
            }

            ';' => self.skip_line_comment(),

            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '[' => self.add_token(TokenKind::LeftBracket),
            ']' => self.add_token(TokenKind::RightBracket),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),

            // Reader sugar
            '\'' => self.add_token(TokenKind::Quote),
            '`' => self.add_token(TokenKind::Backtick),
            '@' => self.add_token(TokenKind::At),
            '~' => {
                if self.match_char('@') {
                    self.add_token(TokenKind::TildeAt);
                } else {
                    self.add_token(TokenKind::Tilde);
                }
            }

            '"' => self.scan_string()?,

            ':' => self.scan_keyword()?,

            c if c.is_ascii_digit() => self.scan_number()?,

            // A minus is a number when digits follow, a symbol otherwise
            '-' if self.peek().is_ascii_digit() => self.scan_number()?,

            c if is_symbol_char(c) => self.scan_symbol(),

            _ => {
                return Err(Error::SyntaxError {
                    line: self.line,
                    col: self.column,
                    message: format!("Unexpected character '{}'", c),
                });
            }
        }

        Ok(())
    }

    fn skip_line_comment(&mut self) {
        while !self.is_at_end() && self.peek() != '\n' {
            self.advance();
        }
    }

    fn scan_string(&mut self) -> Result<()> {
        let mut value = String::new();

        while !self.is_at_end() && self.peek() != '"' {
            if self.peek() == '\\' {
                self.advance();
                if self.is_at_end() {
                    break;
                }
                let escaped = self.advance();
                match escaped {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    '\\' => value.push('\\'),
                    '"' => value.push('"'),
                    _ => {
                        return Err(Error::SyntaxError {
                            line: self.line,
                            col: self.column,
                            message: format!("Invalid escape sequence \\{}", escaped),
                        });
                    }
                }
            } else {
                if self.peek() == '\n' {
                    self.line += 1;
                    self.column = 1;
                }
                value.push(self.advance());
            }
        }

        if self.is_at_end() {
            return Err(Error::SyntaxError {
                line: self.line,
                col: self.column,
                message: "Unterminated string".to_string(),
            });
        }

        self.advance(); // Closing "

        self.add_token(TokenKind::String(value));
        Ok(())
    }

    fn scan_keyword(&mut self) -> Result<()> {
        while is_symbol_char(self.peek()) {
            self.advance();
        }

        // Skip the leading colon
        let name: String = self.source[self.start + 1..self.current].iter().collect();
        if name.is_empty() {
            return Err(Error::SyntaxError {
                line: self.line,
                col: self.column,
                message: "Keyword needs a name after ':'".to_string(),
            });
        }

        self.add_token(TokenKind::Keyword(name));
        Ok(())
    }

    fn scan_number(&mut self) -> Result<()> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        let text: String = self.source[self.start..self.current].iter().collect();
        let value: i64 = text.parse().map_err(|_| Error::SyntaxError {
            line: self.line,
            col: self.column,
            message: format!("Invalid integer: {}", text),
        })?;

        self.add_token(TokenKind::Integer(value));
        Ok(())
    }

    fn scan_symbol(&mut self) {
        while is_symbol_char(self.peek()) {
            self.advance();
        }

        let text: String = self.source[self.start..self.current].iter().collect();

        let kind = match text.as_str() {
            "nil" => TokenKind::Nil,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => TokenKind::Symbol(text),
        };

        self.add_token(kind);
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        self.column += 1;
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.source[self.current] != expected {
            false
        } else {
            self.current += 1;
            self.column += 1;
            true
        }
    }

    fn add_token(&mut self, kind: TokenKind) {
        let lexeme: String = self.source[self.start..self.current].iter().collect();
        self.tokens
            .push(Token::new(kind, lexeme, self.line, self.column));
    }
}

/// Symbol constituents: anything that is not whitespace, a delimiter, reader
/// sugar, or a string/comment starter. Covers operator names like `+`, `<=`
/// and the variadic marker `&`.
fn is_symbol_char(c: char) -> bool {
    !c.is_whitespace()
        && !matches!(
            c,
            '\0' | '(' | ')' | '[' | ']' | '{' | '}' | '\'' | '`' | '~' | '@' | '"' | ';' | ','
        )
}
