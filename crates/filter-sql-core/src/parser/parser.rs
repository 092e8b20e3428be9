//! Filter expression parser implementation.

use super::error::ParseError;
use super::pratt::{infix_binding_power, starts_operand, token_to_binary_op};
use crate::ast::{Expr, Quantity, RegexLiteral};
use crate::lexer::{Lexer, Span, Token, TokenKind};

/// Filter expression parser.
///
/// Precedence from loosest to tightest: `or`, `and`, comparisons
/// (`= != < <= > >= ~ !~`), operands. All binary operators are
/// left-associative.
pub struct Parser<I: Iterator<Item = Token>> {
    tokens: I,
    current: Token,
}

impl<'a> Parser<Lexer<'a>> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::from_tokens(Lexer::new(input))
    }
}

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Creates a parser over an existing token stream.
    ///
    /// A stream that stops without an `Eol` token is treated as if one
    /// followed its last token.
    pub fn from_tokens(mut tokens: I) -> Self {
        let current = tokens
            .next()
            .unwrap_or_else(|| Token::new(TokenKind::Eol, Span::at(0), ""));
        Self { tokens, current }
    }

    /// Parses the whole input as a single expression.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` on illegal tokens, unexpected tokens, unbalanced
    /// brackets and regex literals that do not compile.
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_binary(0)?;

        match self.current.kind {
            TokenKind::Eol => Ok(expr),
            TokenKind::RBracket => Err(ParseError::new(
                "unmatched ')'",
                self.current.position(),
            )),
            TokenKind::Illegal => Err(self.illegal()),
            kind if starts_operand(kind) => Err(self.unexpected("operator")),
            _ => Err(self.unexpected("end of input")),
        }
    }

    /// Parses a binary expression using Pratt parsing.
    fn parse_binary(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_primary()?;

        loop {
            let Some((l_bp, r_bp)) = infix_binding_power(self.current.kind) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            let Some(op) = token_to_binary_op(self.current.kind) else {
                break;
            };

            self.advance();
            let rhs = self.parse_binary(r_bp)?;
            lhs = lhs.binary(op, rhs);
        }

        Ok(lhs)
    }

    /// Parses an operand: a literal, an identifier or a bracketed expression.
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.current.kind {
            TokenKind::LBracket => self.parse_bracketed(),
            TokenKind::Illegal => Err(self.illegal()),
            TokenKind::Eol => Err(ParseError::unexpected_eof(
                "expression",
                self.current.position(),
            )),
            kind if starts_operand(kind) => {
                let token = self.advance();
                literal(token)
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    fn parse_bracketed(&mut self) -> Result<Expr, ParseError> {
        let open = self.advance();
        let inner = self.parse_binary(0)?;

        match self.current.kind {
            TokenKind::RBracket => {
                self.advance();
                Ok(inner)
            }
            TokenKind::Eol => Err(ParseError::new("unmatched '('", open.position())),
            TokenKind::Illegal => Err(self.illegal()),
            _ => Err(self.unexpected("')'")),
        }
    }

    // --- Helper methods ---

    /// Moves to the next token, returning the one just consumed.
    fn advance(&mut self) -> Token {
        let end = self.current.span.end;
        let next = self
            .tokens
            .next()
            .unwrap_or_else(|| Token::new(TokenKind::Eol, Span::at(end), ""));
        core::mem::replace(&mut self.current, next)
    }

    fn illegal(&self) -> ParseError {
        ParseError::illegal(&self.current.lexeme, self.current.position())
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::unexpected(
            expected,
            self.current.kind,
            &self.current.lexeme,
            self.current.position(),
        )
    }
}

/// Builds the literal or identifier node for an operand token.
fn literal(token: Token) -> Result<Expr, ParseError> {
    let position = token.position();
    match token.kind {
        TokenKind::StringLit => Ok(Expr::String(token.lexeme)),
        TokenKind::Identifier => Ok(Expr::Var(token.lexeme)),
        TokenKind::Boolean => Ok(Expr::Boolean(token.lexeme.eq_ignore_ascii_case("true"))),
        TokenKind::Quantity => token
            .lexeme
            .parse::<Quantity>()
            .map(Expr::Quantity)
            .map_err(|err| ParseError::new(err.to_string(), position)),
        TokenKind::RegexLit => RegexLiteral::new(token.lexeme)
            .map(Expr::Regex)
            .map_err(|err| ParseError::invalid_regex(&err, position)),
        kind => Err(ParseError::unexpected(
            "expression",
            kind,
            &token.lexeme,
            position,
        )),
    }
}
