//! Token cursor shared by every clause parser.

use super::error::{ParseError, Result};
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};
use crate::util::exact_value;

/// A cursor over the tokens of one SQL statement.
///
/// The cursor is owned by a single parse and tracks how many `?`
/// placeholders have been consumed so far.
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    input: &'a str,
    /// Always ends with an EOF token.
    tokens: Vec<Token>,
    pos: usize,
    previous: Span,
    parameters_index: usize,
}

impl<'a> TokenCursor<'a> {
    /// Tokenizes `input`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Lexical`] for the first token the lexer rejects.
    pub fn new(input: &'a str) -> Result<Self> {
        let tokens = Lexer::new(input).tokenize();
        let rejected = tokens.iter().find_map(|token| match &token.kind {
            TokenKind::Error(message) => Some((message.clone(), token.span)),
            _ => None,
        });
        if let Some((message, span)) = rejected {
            return Err(ParseError::Lexical { message, span });
        }
        Ok(Self {
            input,
            tokens,
            pos: 0,
            previous: Span::default(),
            parameters_index: 0,
        })
    }

    /// Returns the SQL text being parsed.
    #[must_use]
    pub const fn input(&self) -> &'a str {
        self.input
    }

    /// Returns the current token.
    #[must_use]
    pub fn current(&self) -> &Token {
        self.peek(0)
    }

    /// Returns the current token kind.
    #[must_use]
    pub fn kind(&self) -> &TokenKind {
        &self.current().kind
    }

    /// Returns the token `n` positions ahead; EOF past the end.
    #[must_use]
    pub fn peek(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    /// Returns the current token's text exactly as written.
    #[must_use]
    pub fn literal(&self) -> &'a str {
        self.source(self.current().span)
    }

    /// Returns the original text covered by `span`.
    #[must_use]
    pub fn source(&self, span: Span) -> &'a str {
        span.slice(self.input)
    }

    /// Returns the start offset of the current token.
    #[must_use]
    pub fn start(&self) -> usize {
        self.current().span.start
    }

    /// Returns the span of the last consumed token.
    #[must_use]
    pub const fn previous(&self) -> Span {
        self.previous
    }

    /// Returns true at end of input.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.current().is_eof()
    }

    /// Moves to the next token. Does nothing at EOF.
    pub fn advance(&mut self) {
        if !self.is_eof() {
            self.previous = self.current().span;
            self.pos += 1;
        }
    }

    /// Number of `?` placeholders consumed so far.
    #[must_use]
    pub const fn parameters_index(&self) -> usize {
        self.parameters_index
    }

    /// Consumes a `?` placeholder and returns its 0-based index.
    ///
    /// # Errors
    ///
    /// Fails if the current token is not `?`.
    pub fn next_parameter(&mut self) -> Result<usize> {
        self.expect(&TokenKind::Question)?;
        let index = self.parameters_index;
        self.parameters_index += 1;
        Ok(index)
    }

    /// Checks if the current token has the same kind as `kind`, ignoring payloads.
    #[must_use]
    pub fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(self.kind()) == core::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    #[must_use]
    pub fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(self.kind(), TokenKind::Keyword(kw) if *kw == keyword)
    }

    /// Checks if the current token is any of the given keywords.
    #[must_use]
    pub fn check_any_keyword(&self, keywords: &[Keyword]) -> bool {
        matches!(self.kind(), TokenKind::Keyword(kw) if keywords.contains(kw))
    }

    /// Consumes the current token if it has the kind of `kind`.
    pub fn skip_if(&mut self, kind: &TokenKind) -> bool {
        let matched = self.check(kind);
        if matched {
            self.advance();
        }
        matched
    }

    /// Consumes the current token if it is `keyword`.
    pub fn skip_if_keyword(&mut self, keyword: Keyword) -> bool {
        self.skip_if_any_keyword(&[keyword])
    }

    /// Consumes the current token if it is any of `keywords`.
    pub fn skip_if_any_keyword(&mut self, keywords: &[Keyword]) -> bool {
        let matched = self.check_any_keyword(keywords);
        if matched {
            self.advance();
        }
        matched
    }

    /// Builds an "unexpected token" error at the current token.
    #[must_use]
    pub fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        ParseError::unexpected(expected, self.kind().clone(), self.current().span)
    }

    /// Consumes a token of the given kind or fails.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Unexpected`] if the current token differs.
    pub fn expect(&mut self, kind: &TokenKind) -> Result<()> {
        if self.skip_if(kind) {
            Ok(())
        } else {
            Err(self.unexpected(format!("{kind:?}")))
        }
    }

    /// Consumes the given keyword or fails.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Unexpected`] if the current token differs.
    pub fn expect_keyword(&mut self, keyword: Keyword) -> Result<()> {
        if self.skip_if_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    /// Consumes a balanced parenthesized group and returns it verbatim,
    /// parentheses included. Returns an empty string when the current
    /// token is not `(`.
    ///
    /// `?` placeholders inside the group are counted.
    ///
    /// # Errors
    ///
    /// Fails if input ends before the group is closed.
    pub fn skip_parentheses(&mut self) -> Result<&'a str> {
        if !self.check(&TokenKind::LeftParen) {
            return Ok("");
        }
        let start = self.start();
        let mut depth = 0_usize;
        loop {
            match self.kind() {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth -= 1,
                TokenKind::Question => self.parameters_index += 1,
                TokenKind::Eof => return Err(self.unexpected(")")),
                _ => {}
            }
            self.advance();
            if depth == 0 {
                break;
            }
        }
        Ok(self.source(Span::new(start, self.previous.end)))
    }

    /// Consumes a join operator if one starts here.
    ///
    /// Recognizes `[INNER] JOIN`, `{LEFT|RIGHT|FULL} [OUTER] JOIN`,
    /// `CROSS JOIN`, `NATURAL [{LEFT|RIGHT} [OUTER]] JOIN`, `STRAIGHT_JOIN`
    /// and the comma join.
    ///
    /// # Errors
    ///
    /// Fails when a join prefix such as `LEFT` is not followed by `JOIN`.
    pub fn skip_join(&mut self) -> Result<bool> {
        if self.skip_if(&TokenKind::Comma)
            || self.skip_if_any_keyword(&[Keyword::Join, Keyword::StraightJoin])
        {
            return Ok(true);
        }
        if self.skip_if_keyword(Keyword::Natural) {
            if self.skip_if_any_keyword(&[Keyword::Left, Keyword::Right]) {
                self.skip_if_keyword(Keyword::Outer);
            }
        } else if self.skip_if_any_keyword(&[Keyword::Left, Keyword::Right, Keyword::Full]) {
            self.skip_if_keyword(Keyword::Outer);
        } else if !self.skip_if_any_keyword(&[Keyword::Inner, Keyword::Cross]) {
            return Ok(false);
        }
        self.expect_keyword(Keyword::Join)?;
        Ok(true)
    }

    /// Parses an optional alias: `AS name` or a bare identifier or string.
    ///
    /// After `AS` any non-symbol token is accepted, keywords included.
    pub fn parse_alias(&mut self) -> Option<String> {
        if self.skip_if_keyword(Keyword::As) {
            if self.kind().is_symbol() || self.is_eof() {
                return None;
            }
        } else if !matches!(self.kind(), TokenKind::Identifier(_) | TokenKind::String(_)) {
            return None;
        }
        let alias = exact_value(self.literal());
        self.advance();
        Some(alias)
    }
}
