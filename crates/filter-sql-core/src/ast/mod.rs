//! Abstract Syntax Tree (AST) types for filter expressions.

mod expression;

pub use expression::{BinaryOp, Expr, RegexLiteral};
pub use crate::quantity::{Quantity, Unit};
