//! Parser error types.

use crate::lexer::TokenKind;

/// A failed compile: where in the input it went wrong, and why.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at position {position}")]
pub struct ParseError {
    /// Byte offset into the filter input.
    pub position: usize,
    /// The error message.
    pub message: String,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: &str, found: TokenKind, lexeme: &str, position: usize) -> Self {
        let message = if lexeme.is_empty() {
            format!("unexpected {found}: expected {expected}")
        } else {
            format!("unexpected {found} '{lexeme}': expected {expected}")
        };
        Self::new(message, position)
    }

    /// Creates an "unexpected end of input" error.
    #[must_use]
    pub fn unexpected_eof(expected: &str, position: usize) -> Self {
        Self::new(format!("unexpected end of input: expected {expected}"), position)
    }

    /// Describes an `Illegal` token from its source text.
    #[must_use]
    pub fn illegal(lexeme: &str, position: usize) -> Self {
        let message = match lexeme.chars().next() {
            Some(q @ ('\'' | '"')) if lexeme.len() == 2 && lexeme.ends_with(q) => {
                String::from("empty string literal")
            }
            Some('\'' | '"') => String::from("unterminated string literal"),
            Some('/') => String::from("unterminated regex literal"),
            Some('!') => String::from("unexpected '!': expected '!=' or '!~'"),
            _ => format!("unsupported character '{lexeme}'"),
        };
        Self::new(message, position)
    }

    /// Creates an error for a regex literal that does not compile.
    #[must_use]
    pub fn invalid_regex(err: &regex::Error, position: usize) -> Self {
        let detail = match err {
            regex::Error::Syntax(syntax) => syntax
                .lines()
                .last()
                .unwrap_or_default()
                .trim_start_matches("error: ")
                .to_string(),
            other => other.to_string(),
        };
        Self::new(format!("invalid regex: {detail}"), position)
    }

    /// Renders the input with a caret under the failing character.
    #[must_use]
    pub fn render(&self, input: &str) -> String {
        let column = input
            .get(..self.position)
            .map_or(self.position, |prefix| prefix.chars().count());
        format!("{input}\n{}^ {}", " ".repeat(column), self.message)
    }
}
