//! Reader: turns tokens into AST nodes
//!
//! The nodes are ordinary [`Value`]s — nested lists, vectors, maps and
//! literals — so the evaluator, macros and quasiquote all operate on one
//! uniform tree type.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind};
use crate::runtime::Value;

/// Recursive descent reader over a token stream
pub struct Reader {
    /// Token stream, ending in Eof
    tokens: Vec<Token>,
    /// Current position in the stream
    current: usize,
}

impl Reader {
    /// Creates a new reader from scanned tokens
    pub fn new(tokens: Vec<Token>) -> Self {
        Reader { tokens, current: 0 }
    }

    /// Reads every top-level form in the stream
    pub fn read_all(&mut self) -> Result<Vec<Value>> {
        let mut forms = Vec::new();
        while !self.is_at_end() {
            forms.push(self.read_form()?);
        }
        Ok(forms)
    }

    /// Reads a single form
    pub fn read_form(&mut self) -> Result<Value> {
        let token = self.advance()?;

        match token.kind {
            TokenKind::LeftParen => self.read_sequence(TokenKind::RightParen),
            TokenKind::LeftBracket => self.read_sequence(TokenKind::RightBracket),
            TokenKind::LeftBrace => self.read_map(),

            TokenKind::RightParen | TokenKind::RightBracket | TokenKind::RightBrace => {
                Err(Error::ParseError(format!(
                    "Unexpected '{}' at line {}, column {}",
                    token.kind, token.line, token.column
                )))
            }

            // Reader sugar expands to its two-element list form
            TokenKind::Quote => self.read_wrapped("quote"),
            TokenKind::Backtick => self.read_wrapped("quasiquote"),
            TokenKind::Tilde => self.read_wrapped("unquote"),
            TokenKind::TildeAt => self.read_wrapped("splice-unquote"),
            TokenKind::At => self.read_wrapped("deref"),

            TokenKind::Integer(n) => Ok(Value::Int(n)),
            TokenKind::String(s) => Ok(Value::Str(s)),
            TokenKind::Keyword(k) => Ok(Value::Keyword(k)),
            TokenKind::Symbol(s) => Ok(Value::Symbol(s)),
            TokenKind::Nil => Ok(Value::Nil),
            TokenKind::True => Ok(Value::Bool(true)),
            TokenKind::False => Ok(Value::Bool(false)),

            TokenKind::Eof => Err(Error::UnexpectedEof),
        }
    }

    /// Reads forms up to `closing`, producing a List or Vector
    fn read_sequence(&mut self, closing: TokenKind) -> Result<Value> {
        let mut items = Vec::new();

        while self.peek_kind() != &closing {
            if self.is_at_end() {
                return Err(Error::UnexpectedEof);
            }
            items.push(self.read_form()?);
        }
        self.advance()?; // Consume the closing delimiter

        match closing {
            TokenKind::RightBracket => Ok(Value::vector(items)),
            _ => Ok(Value::list(items)),
        }
    }

    /// Reads `{k v ...}` into a map
    ///
    /// Keys must be strings or keywords and are stored in the sentinel
    /// encoding; a trailing key without a value is an error.
    fn read_map(&mut self) -> Result<Value> {
        let mut entries = HashMap::new();

        while self.peek_kind() != &TokenKind::RightBrace {
            if self.is_at_end() {
                return Err(Error::UnexpectedEof);
            }

            let key = self.read_form()?;
            if self.peek_kind() == &TokenKind::RightBrace {
                return Err(Error::ParseError(
                    "Map literal needs an even number of forms".to_string(),
                ));
            }
            let value = self.read_form()?;
            entries.insert(key.map_key()?, value);
        }
        self.advance()?; // Consume the closing brace

        Ok(Value::map(entries))
    }

    /// Expands reader sugar into `(symbol form)`
    fn read_wrapped(&mut self, symbol: &str) -> Result<Value> {
        let form = self.read_form()?;
        Ok(Value::list(vec![Value::symbol(symbol), form]))
    }

    fn is_at_end(&self) -> bool {
        self.peek_kind() == &TokenKind::Eof
    }

    fn peek_kind(&self) -> &TokenKind {
        self.tokens
            .get(self.current)
            .map(|t| &t.kind)
            .unwrap_or(&TokenKind::Eof)
    }

    fn advance(&mut self) -> Result<Token> {
        let token = self
            .tokens
            .get(self.current)
            .cloned()
            .ok_or(Error::UnexpectedEof)?;
        self.current += 1;
        Ok(token)
    }
}

/// Scans and reads a source string into its top-level forms
pub fn read_source(source: &str) -> Result<Vec<Value>> {
    let mut scanner = crate::lexer::Scanner::new(source);
    let tokens = scanner.scan_tokens()?;
    let mut reader = Reader::new(tokens);
    reader.read_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_one(source: &str) -> Value {
        let mut forms = read_source(source).unwrap();
        assert_eq!(forms.len(), 1, "expected a single form from {:?}", source);
        forms.remove(0)
    }

    #[test]
    fn test_read_literals() {
        assert_eq!(read_one("42"), Value::Int(42));
        assert_eq!(read_one("\"hi\""), Value::Str("hi".to_string()));
        assert_eq!(read_one(":ok"), Value::keyword("ok"));
        assert_eq!(read_one("x"), Value::symbol("x"));
        assert_eq!(read_one("nil"), Value::Nil);
        assert_eq!(read_one("true"), Value::Bool(true));
    }

    #[test]
    fn test_read_nested_list() {
        let form = read_one("(+ 1 (* 2 3))");
        let items = form.as_list().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], Value::symbol("+"));
        assert_eq!(items[2].as_list().unwrap().len(), 3);
    }

    #[test]
    fn test_read_vector() {
        let form = read_one("[1 2 3]");
        assert!(matches!(form, Value::Vector(_)));
        assert_eq!(form.as_seq().unwrap().len(), 3);
    }

    #[test]
    fn test_read_map() {
        let form = read_one("{:a 1 \"b\" 2}");
        let entries = form.as_map().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries.get(&Value::keyword("a").map_key().unwrap()),
            Some(&Value::Int(1))
        );
        assert_eq!(entries.get("b"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_map_with_odd_forms() {
        let result = read_source("{:a}");
        assert!(result.is_err());
    }

    #[test]
    fn test_quote_sugar() {
        let form = read_one("'x");
        assert_eq!(
            form,
            Value::list(vec![Value::symbol("quote"), Value::symbol("x")])
        );
    }

    #[test]
    fn test_quasiquote_sugar() {
        let form = read_one("`(a ~b ~@(list 1))");
        let items = form.as_list().unwrap();
        assert_eq!(items[0], Value::symbol("quasiquote"));

        let inner = items[1].as_list().unwrap();
        assert_eq!(
            inner[1],
            Value::list(vec![Value::symbol("unquote"), Value::symbol("b")])
        );
        let splice = inner[2].as_list().unwrap();
        assert_eq!(splice[0], Value::symbol("splice-unquote"));
    }

    #[test]
    fn test_deref_sugar() {
        let form = read_one("@cell");
        assert_eq!(
            form,
            Value::list(vec![Value::symbol("deref"), Value::symbol("cell")])
        );
    }

    #[test]
    fn test_unbalanced_list() {
        assert!(matches!(
            read_source("(+ 1 2"),
            Err(Error::UnexpectedEof)
        ));
        assert!(read_source(")").is_err());
    }

    #[test]
    fn test_read_all_multiple_forms() {
        let forms = read_source("(def! x 3) (+ x 4)").unwrap();
        assert_eq!(forms.len(), 2);
    }
}
