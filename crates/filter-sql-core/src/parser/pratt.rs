//! Pratt binding powers for filter operators.

use crate::ast::BinaryOp;
use crate::lexer::TokenKind;

/// Returns true if the token can start an operand.
#[must_use]
pub const fn starts_operand(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::StringLit
            | TokenKind::RegexLit
            | TokenKind::Boolean
            | TokenKind::Quantity
            | TokenKind::Identifier
            | TokenKind::LBracket
    )
}

/// Returns the infix binding power for a token.
///
/// Returns `(left_bp, right_bp)` where:
/// - Higher binding power = binds tighter
/// - Left associative: left_bp < right_bp
///
/// Returns `None` if the token is not an infix operator.
#[must_use]
pub const fn infix_binding_power(kind: TokenKind) -> Option<(u8, u8)> {
    match kind {
        // Logical OR (lowest precedence)
        TokenKind::Or => Some((1, 2)),

        // Logical AND
        TokenKind::And => Some((3, 4)),

        // Comparison and regex match
        TokenKind::Equal
        | TokenKind::NotEqual
        | TokenKind::Less
        | TokenKind::Lte
        | TokenKind::Greater
        | TokenKind::Gte
        | TokenKind::Like
        | TokenKind::NotLike => Some((5, 6)),

        _ => None,
    }
}

/// Converts a token to a binary operator.
#[must_use]
pub const fn token_to_binary_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Equal => Some(BinaryOp::Eq),
        TokenKind::NotEqual => Some(BinaryOp::NotEq),
        TokenKind::Less => Some(BinaryOp::Lt),
        TokenKind::Lte => Some(BinaryOp::LtEq),
        TokenKind::Greater => Some(BinaryOp::Gt),
        TokenKind::Gte => Some(BinaryOp::GtEq),
        TokenKind::Like => Some(BinaryOp::Like),
        TokenKind::NotLike => Some(BinaryOp::NotLike),
        TokenKind::And => Some(BinaryOp::And),
        TokenKind::Or => Some(BinaryOp::Or),
        _ => None,
    }
}
