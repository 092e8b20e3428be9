//! Filter expression lexer.
//!
//! This module provides a hand-written lexer that produces a stream of tokens
//! terminated by a single `Eol`.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Token, TokenKind};
pub use tokenizer::Lexer;
