//! Filter expression tokenizer.

use super::{Span, Token, TokenKind};
use crate::quantity::Unit;

/// A lexer that turns a filter expression into tokens.
///
/// Scanning never fails: malformed input becomes [`TokenKind::Illegal`]
/// tokens and the stream always ends with a single [`TokenKind::Eol`].
pub struct Lexer<'a> {
    /// The input source.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// Set once the iterator has yielded `Eol`.
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            finished: false,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the character after the current one without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self
            .peek()
            .is_some_and(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
        {
            self.advance();
        }
    }

    fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Creates a token whose lexeme is the raw source text of the current span.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.make_span(), &self.input[self.start..self.pos])
    }

    /// Creates a token with an explicit lexeme.
    fn make_token_with(&self, kind: TokenKind, lexeme: String) -> Token {
        Token::new(kind, self.make_span(), lexeme)
    }

    /// Scans an identifier-shaped run and classifies it.
    ///
    /// The whole run is compared against the keyword table, so `android` or
    /// `origin` stay identifiers.
    fn scan_word(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '.' || c == '_')
        {
            self.advance();
        }
        let kind = TokenKind::from_word(&self.input[self.start..self.pos]);
        self.make_token(kind)
    }

    /// Scans a number with an optional storage unit suffix.
    fn scan_quantity(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // consume .
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        // The unit is only taken when the full letter run is a known suffix.
        let rest = &self.input[self.pos..];
        let letters = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        if Unit::from_suffix(&rest[..letters]).is_some() {
            self.pos += letters;
        }

        self.make_token(TokenKind::Quantity)
    }

    /// Scans a quoted string. Empty and unterminated strings are illegal.
    fn scan_string(&mut self, quote: char) -> Token {
        self.advance(); // consume opening quote
        let content_start = self.pos;

        loop {
            match self.peek() {
                Some(c) if c == quote => break,
                Some(_) => {
                    self.advance();
                }
                None => return self.make_token(TokenKind::Illegal),
            }
        }

        let content_end = self.pos;
        self.advance(); // consume closing quote

        if content_start == content_end {
            return self.make_token(TokenKind::Illegal);
        }
        let content = self.input[content_start..content_end].to_string();
        self.make_token_with(TokenKind::StringLit, content)
    }

    /// Scans a `/.../` regex literal. `\/` stands for a literal slash.
    fn scan_regex(&mut self) -> Token {
        self.advance(); // consume opening slash
        let mut pattern = String::new();

        loop {
            match self.advance() {
                Some('/') => break,
                Some('\\') => match self.advance() {
                    Some('/') => pattern.push('/'),
                    Some(c) => {
                        pattern.push('\\');
                        pattern.push(c);
                    }
                    None => return self.make_token(TokenKind::Illegal),
                },
                Some(c) => pattern.push(c),
                None => return self.make_token(TokenKind::Illegal),
            }
        }

        self.make_token_with(TokenKind::RegexLit, pattern)
    }

    /// Scans the next token. Once the input is exhausted every call returns `Eol`.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return self.make_token(TokenKind::Eol);
        };

        match c {
            '(' => self.make_token(TokenKind::LBracket),
            ')' => self.make_token(TokenKind::RBracket),
            '=' => self.make_token(TokenKind::Equal),
            '~' => self.make_token(TokenKind::Like),
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::Lte)
                } else {
                    self.make_token(TokenKind::Less)
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::Gte)
                } else {
                    self.make_token(TokenKind::Greater)
                }
            }
            '!' => match self.peek() {
                Some('=') => {
                    self.advance();
                    self.make_token(TokenKind::NotEqual)
                }
                Some('~') => {
                    self.advance();
                    self.make_token(TokenKind::NotLike)
                }
                _ => self.make_token(TokenKind::Illegal),
            },

            '\'' | '"' => {
                self.pos = self.start;
                self.scan_string(c)
            }

            '/' => {
                self.pos = self.start;
                self.scan_regex()
            }

            c if c.is_ascii_digit() => {
                self.pos = self.start;
                self.scan_quantity()
            }

            c if c.is_alphabetic() || c == '_' => {
                self.pos = self.start;
                self.scan_word()
            }

            _ => self.make_token(TokenKind::Illegal),
        }
    }

    /// Tokenizes the entire input, including the trailing `Eol`.
    #[must_use]
    pub fn tokenize(self) -> Vec<Token> {
        self.collect()
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = token.is_eol();
        Some(token)
    }
}

impl core::iter::FusedIterator for Lexer<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize()
    }

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    fn lexemes(input: &str) -> Vec<String> {
        tokenize(input).into_iter().map(|t| t.lexeme).collect()
    }

    #[test]
    fn test_empty_input() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eol);
        assert_eq!(tokens[0].span, Span::at(0));
    }

    #[test]
    fn test_whitespace_only() {
        let tokens = tokenize("  \t  ");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eol);
        assert_eq!(tokens[0].position(), 5);
    }

    #[test]
    fn test_iterator_is_fused_after_eol() {
        let mut lexer = Lexer::new("a");
        assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::Identifier));
        assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::Eol));
        assert!(lexer.next().is_none());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(
            token_kinds("and AND Or oR true FALSE"),
            vec![
                TokenKind::And,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Or,
                TokenKind::Boolean,
                TokenKind::Boolean,
                TokenKind::Eol,
            ]
        );
    }

    #[test]
    fn test_keyword_substrings_are_identifiers() {
        for word in ["android", "organic", "indoor", "origin"] {
            assert_eq!(
                token_kinds(word),
                vec![TokenKind::Identifier, TokenKind::Eol],
                "{word}"
            );
        }
    }

    #[test]
    fn test_dotted_identifiers() {
        assert_eq!(
            lexemes("vm.host.datacenter primary_ip_address"),
            vec!["vm.host.datacenter", "primary_ip_address", ""]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            token_kinds("= != < <= > >= ~ !~"),
            vec![
                TokenKind::Equal,
                TokenKind::NotEqual,
                TokenKind::Less,
                TokenKind::Lte,
                TokenKind::Greater,
                TokenKind::Gte,
                TokenKind::Like,
                TokenKind::NotLike,
                TokenKind::Eol,
            ]
        );
    }

    #[test]
    fn test_operators_without_spaces() {
        assert_eq!(
            token_kinds("a<=1"),
            vec![
                TokenKind::Identifier,
                TokenKind::Lte,
                TokenKind::Quantity,
                TokenKind::Eol,
            ]
        );
    }

    #[test]
    fn test_lone_bang_is_illegal() {
        assert_eq!(
            token_kinds("a ! b"),
            vec![
                TokenKind::Identifier,
                TokenKind::Illegal,
                TokenKind::Identifier,
                TokenKind::Eol,
            ]
        );
    }

    #[test]
    fn test_brackets() {
        assert_eq!(
            token_kinds("(a)"),
            vec![
                TokenKind::LBracket,
                TokenKind::Identifier,
                TokenKind::RBracket,
                TokenKind::Eol,
            ]
        );
    }

    #[test]
    fn test_strings() {
        let tokens = tokenize("'hello' \"world\"");
        assert_eq!(tokens[0].kind, TokenKind::StringLit);
        assert_eq!(tokens[0].lexeme, "hello");
        assert_eq!(tokens[0].span, Span::new(0, 7));
        assert_eq!(tokens[1].kind, TokenKind::StringLit);
        assert_eq!(tokens[1].lexeme, "world");
    }

    #[test]
    fn test_string_keeps_other_quote() {
        let tokens = tokenize("\"it's\"");
        assert_eq!(tokens[0].kind, TokenKind::StringLit);
        assert_eq!(tokens[0].lexeme, "it's");
    }

    #[test]
    fn test_empty_strings_are_illegal() {
        assert_eq!(token_kinds("''"), vec![TokenKind::Illegal, TokenKind::Eol]);
        assert_eq!(token_kinds("\"\""), vec![TokenKind::Illegal, TokenKind::Eol]);
    }

    #[test]
    fn test_unterminated_string_is_illegal() {
        let tokens = tokenize("name = 'abc");
        assert_eq!(tokens[2].kind, TokenKind::Illegal);
        assert_eq!(tokens[2].lexeme, "'abc");
        assert_eq!(tokens[3].kind, TokenKind::Eol);
    }

    #[test]
    fn test_mismatched_delimiter_is_unterminated() {
        assert_eq!(
            token_kinds("'abc\""),
            vec![TokenKind::Illegal, TokenKind::Eol]
        );
    }

    #[test]
    fn test_regex() {
        let tokens = tokenize("/^prod-.*/");
        assert_eq!(tokens[0].kind, TokenKind::RegexLit);
        assert_eq!(tokens[0].lexeme, "^prod-.*");
    }

    #[test]
    fn test_regex_escaped_slash() {
        let tokens = tokenize(r"/a\/b/");
        assert_eq!(tokens[0].kind, TokenKind::RegexLit);
        assert_eq!(tokens[0].lexeme, "a/b");
        assert_eq!(tokens[1].kind, TokenKind::Eol);
    }

    #[test]
    fn test_regex_keeps_other_escapes() {
        let tokens = tokenize(r"/\d+\.\d+/");
        assert_eq!(tokens[0].lexeme, r"\d+\.\d+");
    }

    #[test]
    fn test_empty_regex_is_legal() {
        let tokens = tokenize("//");
        assert_eq!(tokens[0].kind, TokenKind::RegexLit);
        assert_eq!(tokens[0].lexeme, "");
    }

    #[test]
    fn test_unterminated_regex_is_illegal() {
        assert_eq!(
            token_kinds("/abc"),
            vec![TokenKind::Illegal, TokenKind::Eol]
        );
        assert_eq!(
            token_kinds(r"/abc\/"),
            vec![TokenKind::Illegal, TokenKind::Eol]
        );
    }

    #[test]
    fn test_invalid_regex_is_not_checked_by_lexer() {
        assert_eq!(
            token_kinds("/[/"),
            vec![TokenKind::RegexLit, TokenKind::Eol]
        );
    }

    #[test]
    fn test_quantities() {
        let tokens = tokenize("100 50MB 8gb 1.5GB 2Tb 64kb");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert!(kinds[..6].iter().all(|k| *k == TokenKind::Quantity));
        let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(
            lexemes,
            vec!["100", "50MB", "8gb", "1.5GB", "2Tb", "64kb", ""]
        );
    }

    #[test]
    fn test_quantity_unknown_suffix_is_not_consumed() {
        let tokens = tokenize("8xb");
        assert_eq!(tokens[0].kind, TokenKind::Quantity);
        assert_eq!(tokens[0].lexeme, "8");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].lexeme, "xb");
    }

    #[test]
    fn test_quantity_single_decimal_point() {
        assert_eq!(lexemes("1.2.3"), vec!["1.2", ".", "3", ""]);
        assert_eq!(
            token_kinds("1.2.3"),
            vec![
                TokenKind::Quantity,
                TokenKind::Illegal,
                TokenKind::Quantity,
                TokenKind::Eol,
            ]
        );
    }

    #[test]
    fn test_unsupported_characters_are_illegal() {
        for c in ["@", "#", "$", "%", "^", "&", "*", "`", "\\", "|", ";", ":"] {
            let tokens = tokenize(c);
            assert_eq!(tokens[0].kind, TokenKind::Illegal, "{c}");
            assert_eq!(tokens[0].lexeme, c);
            assert_eq!(tokens[1].kind, TokenKind::Eol);
        }
    }

    #[test]
    fn test_full_expression() {
        assert_eq!(
            token_kinds("vm.name ~ /^prod-.*/ and memory <= 8GB"),
            vec![
                TokenKind::Identifier,
                TokenKind::Like,
                TokenKind::RegexLit,
                TokenKind::And,
                TokenKind::Identifier,
                TokenKind::Lte,
                TokenKind::Quantity,
                TokenKind::Eol,
            ]
        );
    }

    #[test]
    fn test_span_tracking() {
        let tokens = tokenize("cpus >= 4");
        assert_eq!(tokens[0].span, Span::new(0, 4));
        assert_eq!(tokens[1].span, Span::new(5, 7));
        assert_eq!(tokens[2].span, Span::new(8, 9));
        assert_eq!(tokens[3].span, Span::at(9));
    }
}
