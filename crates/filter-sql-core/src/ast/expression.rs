//! Filter expression AST and its SQL rendering.

use core::fmt;

use serde::Serialize;

use crate::columns::ColumnMap;
use crate::quantity::{Quantity, Unit};

/// Binary operators of the filter language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Pattern matching
    Like,
    NotLike,

    // Logical
    And,
    Or,
}

impl BinaryOp {
    /// Returns the operator as written in a filter expression.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Like => "~",
            Self::NotLike => "!~",
            Self::And => "and",
            Self::Or => "or",
        }
    }

    /// Returns the SQL infix operator, or `None` for the regex match operators
    /// which compile to a function call instead.
    #[must_use]
    pub const fn as_sql(&self) -> Option<&'static str> {
        match self {
            Self::Eq => Some("="),
            Self::NotEq => Some("!="),
            Self::Lt => Some("<"),
            Self::LtEq => Some("<="),
            Self::Gt => Some(">"),
            Self::GtEq => Some(">="),
            Self::And => Some("AND"),
            Self::Or => Some("OR"),
            Self::Like | Self::NotLike => None,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A regular expression literal whose pattern is known to compile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RegexLiteral {
    pattern: String,
}

impl RegexLiteral {
    /// Validates `pattern` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns the regex compiler's error if the pattern is not a valid
    /// regular expression.
    pub fn new(pattern: impl Into<String>) -> Result<Self, regex::Error> {
        let pattern = pattern.into();
        regex::Regex::new(&pattern)?;
        Ok(Self { pattern })
    }

    /// The pattern text, without delimiters.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// A filter expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// A binary expression.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
    },

    /// A quoted string literal.
    String(String),

    /// A column reference such as `vm.name`.
    Var(String),

    /// `true` or `false`.
    Boolean(bool),

    /// A `/.../` regex literal.
    Regex(RegexLiteral),

    /// A number with an optional storage unit.
    Quantity(Quantity),
}

impl Expr {
    /// Creates a column reference.
    #[must_use]
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }

    /// Creates a string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Creates a boolean literal.
    #[must_use]
    pub const fn boolean(value: bool) -> Self {
        Self::Boolean(value)
    }

    /// Creates a quantity literal.
    #[must_use]
    pub const fn quantity(value: f64, unit: Unit) -> Self {
        Self::Quantity(Quantity::new(value, unit))
    }

    /// Creates a regex literal.
    ///
    /// # Errors
    ///
    /// Fails if `pattern` is not a valid regular expression.
    pub fn regex(pattern: impl Into<String>) -> Result<Self, regex::Error> {
        RegexLiteral::new(pattern).map(Self::Regex)
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(self, op: BinaryOp, right: Self) -> Self {
        Self::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    /// Creates an equality expression.
    #[must_use]
    pub fn eq(self, right: Self) -> Self {
        self.binary(BinaryOp::Eq, right)
    }

    /// Creates an inequality expression.
    #[must_use]
    pub fn not_eq(self, right: Self) -> Self {
        self.binary(BinaryOp::NotEq, right)
    }

    /// Creates a less-than expression.
    #[must_use]
    pub fn lt(self, right: Self) -> Self {
        self.binary(BinaryOp::Lt, right)
    }

    /// Creates a less-than-or-equal expression.
    #[must_use]
    pub fn lt_eq(self, right: Self) -> Self {
        self.binary(BinaryOp::LtEq, right)
    }

    /// Creates a greater-than expression.
    #[must_use]
    pub fn gt(self, right: Self) -> Self {
        self.binary(BinaryOp::Gt, right)
    }

    /// Creates a greater-than-or-equal expression.
    #[must_use]
    pub fn gt_eq(self, right: Self) -> Self {
        self.binary(BinaryOp::GtEq, right)
    }

    /// Creates a regex match expression.
    #[must_use]
    pub fn like(self, right: Self) -> Self {
        self.binary(BinaryOp::Like, right)
    }

    /// Creates a negated regex match expression.
    #[must_use]
    pub fn not_like(self, right: Self) -> Self {
        self.binary(BinaryOp::NotLike, right)
    }

    /// Creates an AND expression.
    #[must_use]
    pub fn and(self, right: Self) -> Self {
        self.binary(BinaryOp::And, right)
    }

    /// Creates an OR expression.
    #[must_use]
    pub fn or(self, right: Self) -> Self {
        self.binary(BinaryOp::Or, right)
    }

    /// Compiles the expression into a SQL boolean predicate.
    ///
    /// Identifiers are looked up in `columns`; unmapped identifiers are
    /// rendered as double-quoted names with underscores turned into spaces.
    /// `~` and `!~` become `regexp_matches` calls.
    #[must_use]
    pub fn to_sql(&self, columns: &ColumnMap) -> String {
        match self {
            Self::Binary { left, op, right } => {
                let left = left.to_sql(columns);
                let right = right.to_sql(columns);
                match (op, op.as_sql()) {
                    (_, Some(sql_op)) => format!("({left} {sql_op} {right})"),
                    (BinaryOp::NotLike, None) => format!("NOT regexp_matches({left}, {right})"),
                    (_, None) => format!("regexp_matches({left}, {right})"),
                }
            }
            Self::String(value) => quote_string(value),
            Self::Regex(regex) => quote_string(regex.pattern()),
            Self::Boolean(true) => String::from("TRUE"),
            Self::Boolean(false) => String::from("FALSE"),
            Self::Var(name) => columns.resolve(name).map_or_else(
                || {
                    tracing::trace!(identifier = %name, "identifier not in column map, using humanized name");
                    format!("\"{}\"", name.replace('_', " "))
                },
                String::from,
            ),
            Self::Quantity(quantity) => quantity.to_sql(),
        }
    }
}

/// Wraps `value` in single quotes, doubling any embedded single quote.
fn quote_string(value: &str) -> String {
    let escaped = value.replace('\'', "''");
    format!("'{escaped}'")
}

/// Debug form of the expression, in filter syntax.
///
/// Quantities are rounded to two decimals, and a string holding both `'` and
/// `"` has no quoting the lexer accepts, so such trees do not re-parse to an
/// equal tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary { left, op, right } => write!(f, "({left} {op} {right})"),
            Self::String(value) if value.contains('\'') => write!(f, "\"{value}\""),
            Self::String(value) => write!(f, "'{value}'"),
            Self::Var(name) => f.write_str(name),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Regex(regex) => write!(f, "/{}/", regex.pattern().replace('/', "\\/")),
            Self::Quantity(quantity) => write!(f, "{quantity}"),
        }
    }
}
