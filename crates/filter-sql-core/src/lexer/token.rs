//! Token types for the filter lexer.

use super::Span;

/// Reserved words of the filter language, matched case-insensitively against
/// the whole identifier-shaped run.
const KEYWORDS: &[(&str, TokenKind)] = &[
    ("and", TokenKind::And),
    ("or", TokenKind::Or),
    ("true", TokenKind::Boolean),
    ("false", TokenKind::Boolean),
];

/// The kind of token.
///
/// Kinds carry no payload; the source text travels next to the kind in
/// [`Token::lexeme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `=`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    Lte,
    /// `>`
    Greater,
    /// `>=`
    Gte,
    /// `~`
    Like,
    /// `!~`
    NotLike,
    /// `and` (any case)
    And,
    /// `or` (any case)
    Or,
    /// `(`
    LBracket,
    /// `)`
    RBracket,
    /// `'...'` or `"..."`
    StringLit,
    /// `/.../`
    RegexLit,
    /// `true` or `false` (any case)
    Boolean,
    /// A number with an optional storage unit, e.g. `8GB`.
    Quantity,
    /// A column reference such as `vm.name`.
    Identifier,
    /// Anything the lexer could not make sense of.
    Illegal,
    /// End of input.
    Eol,
}

impl TokenKind {
    /// Classifies an identifier-shaped run, returning the keyword kind when the
    /// whole run is a reserved word and [`TokenKind::Identifier`] otherwise.
    #[must_use]
    pub fn from_word(word: &str) -> Self {
        KEYWORDS
            .iter()
            .find(|(kw, _)| kw.eq_ignore_ascii_case(word))
            .map_or(Self::Identifier, |(_, kind)| *kind)
    }

    /// Returns a short human-readable name, used in diagnostics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::Lte => "<=",
            Self::Greater => ">",
            Self::Gte => ">=",
            Self::Like => "~",
            Self::NotLike => "!~",
            Self::And => "and",
            Self::Or => "or",
            Self::LBracket => "(",
            Self::RBracket => ")",
            Self::StringLit => "string",
            Self::RegexLit => "regex",
            Self::Boolean => "boolean",
            Self::Quantity => "quantity",
            Self::Identifier => "identifier",
            Self::Illegal => "illegal",
            Self::Eol => "eol",
        }
    }

    /// Returns the SQL text of comparison and logical operators.
    ///
    /// `~` and `!~` have no SQL operator; they compile to `regexp_matches`.
    #[must_use]
    pub const fn as_sql(&self) -> Option<&'static str> {
        match self {
            Self::Equal => Some("="),
            Self::NotEqual => Some("!="),
            Self::Less => Some("<"),
            Self::Lte => Some("<="),
            Self::Greater => Some(">"),
            Self::Gte => Some(">="),
            Self::And => Some("AND"),
            Self::Or => Some("OR"),
            _ => None,
        }
    }
}

impl core::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A token with its location and source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source.
    pub span: Span,
    /// The literal text of the token (delimiters stripped for strings and regexes).
    pub lexeme: String,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, span: Span, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            lexeme: lexeme.into(),
        }
    }

    /// Byte offset where the token starts.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.span.start
    }

    /// Returns true if this is the end-of-line token.
    #[must_use]
    pub const fn is_eol(&self) -> bool {
        matches!(self.kind, TokenKind::Eol)
    }
}
