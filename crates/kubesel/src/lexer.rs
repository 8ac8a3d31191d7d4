//! Tokenizer for selector text.
//!
//! The lexer is a single forward cursor over the input. It never looks at
//! grammar: `in` and `notin` come out as plain identifiers and the parser
//! decides what they mean from their position.

use std::fmt;

use crate::error::{Result, SelectorError};

/// Atomic unit of selector text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Maximal run of `[A-Za-z0-9_.\-/]`: a key, a value, `in` or `notin`.
    Identifier(&'a str),
    /// `=`
    Equals,
    /// `==`
    DoubleEquals,
    /// `!=`
    NotEquals,
    /// `!` (prefix of a does-not-exist requirement)
    Bang,
    /// `>`
    GreaterThan,
    /// `<`
    LessThan,
    /// `,`
    Comma,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
}

impl Token<'_> {
    /// Describes the token for error messages.
    pub fn describe(&self) -> &str {
        match self {
            Token::Identifier(s) => s,
            Token::Equals => "=",
            Token::DoubleEquals => "==",
            Token::NotEquals => "!=",
            Token::Bang => "!",
            Token::GreaterThan => ">",
            Token::LessThan => "<",
            Token::Comma => ",",
            Token::OpenParen => "(",
            Token::CloseParen => ")",
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token and the byte offset where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spanned<'a> {
    pub token: Token<'a>,
    pub position: usize,
}

/// Returns `true` for characters that may appear in an identifier.
pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | '/')
}

/// Splits `input` into tokens, failing on the first disallowed character.
///
/// The empty string (or all-whitespace input) yields no tokens.
pub fn tokenize(input: &str) -> Result<Vec<Spanned<'_>>> {
    Lexer::new(input).collect()
}

/// Cursor-based tokenizer over selector text.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.pos..];
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();
    }

    /// Consumes `c` if it is the next character.
    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn identifier(&mut self) -> &'a str {
        let start = self.pos;
        let rest = &self.input[start..];
        let len = rest
            .find(|c: char| !is_identifier_char(c))
            .unwrap_or(rest.len());
        self.pos += len;
        &self.input[start..start + len]
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Spanned<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace();
        let position = self.pos;
        let c = self.peek()?;

        let token = match c {
            c if is_identifier_char(c) => Token::Identifier(self.identifier()),
            '=' => {
                self.pos += 1;
                if self.eat('=') {
                    Token::DoubleEquals
                } else {
                    Token::Equals
                }
            }
            '!' => {
                self.pos += 1;
                if self.eat('=') {
                    Token::NotEquals
                } else {
                    Token::Bang
                }
            }
            '>' | '<' | ',' | '(' | ')' => {
                self.pos += 1;
                match c {
                    '>' => Token::GreaterThan,
                    '<' => Token::LessThan,
                    ',' => Token::Comma,
                    '(' => Token::OpenParen,
                    _ => Token::CloseParen,
                }
            }
            other => {
                // Stop here: a lexer error ends the stream.
                self.pos = self.input.len();
                return Some(Err(SelectorError::syntax(
                    position,
                    other.to_string(),
                    "identifier, operator, ',' or parenthesis",
                )));
            }
        };

        Some(Ok(Spanned { token, position }))
    }
}
