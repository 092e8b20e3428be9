//! # filter-sql-core
//!
//! Compiles inventory filter expressions into SQL `WHERE` predicates.
//!
//! This crate provides:
//! - A hand-written lexer that never fails and always ends with `Eol`
//! - A Pratt parser with `or` < `and` < comparison precedence
//! - An expression AST that renders itself as SQL, normalizing storage sizes
//!   to megabytes and escaping every inlined literal
//!
//! ## Compiling a filter
//!
//! ```rust
//! use filter_sql_core::{ColumnMap, compile};
//!
//! let columns: ColumnMap = [("cpus", r#"i."CPUs""#)].into_iter().collect();
//! let sql = compile("vm.name ~ /^prod-.*/ and memory <= 8GB or cpus > 4", &columns).unwrap();
//!
//! assert_eq!(
//!     sql,
//!     r#"((regexp_matches("vm.name", '^prod-.*') AND ("memory" <= 8192.00)) OR (i."CPUs" > 4.00))"#
//! );
//! ```
//!
//! ## Errors
//!
//! Every failure is a [`ParseError`] carrying the byte offset of the problem:
//!
//! ```rust
//! use filter_sql_core::parse;
//!
//! let err = parse("name ~ /[/").unwrap_err();
//! assert_eq!(err.position, 7);
//! ```

pub mod ast;
pub mod columns;
pub mod lexer;
pub mod parser;
pub mod quantity;

pub use ast::{BinaryOp, Expr};
pub use columns::ColumnMap;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{ParseError, Parser};
pub use quantity::{Quantity, Unit};

/// Parses a filter expression into its AST.
///
/// # Errors
///
/// Returns a `ParseError` if the input is not a valid filter expression.
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    Parser::new(input).parse_expression()
}

/// Compiles a filter expression into a SQL predicate.
///
/// # Errors
///
/// Returns a `ParseError` if the input is not a valid filter expression.
pub fn compile(input: &str, columns: &ColumnMap) -> Result<String, ParseError> {
    tracing::debug!(filter = input, mapped_columns = columns.len(), "compiling filter");
    let expr = parse(input).inspect_err(|err| {
        tracing::debug!(position = err.position, error = %err.message, "filter rejected");
    })?;
    let sql = expr.to_sql(columns);
    tracing::debug!(%sql, "filter compiled");
    Ok(sql)
}
