//! Expression sub-parser.
//!
//! Consumes a scalar or boolean expression with Pratt parsing and reports
//! only its top-level shape. Qualified column references met on the way are
//! collected so the caller can anchor table rewrite tokens at their owners.

use super::cursor::TokenCursor;
use super::error::{ParseError, Result};
use super::pratt::{
    COMPARISON_BP, infix_binding_power, postfix_binding_power, prefix_binding_power,
};
use crate::ast::{Expr, Ident};
use crate::lexer::{Keyword, Span, TokenKind};
use crate::util::exact_value;

/// Parses one expression from a borrowed cursor.
pub struct ExpressionParser<'c, 'a> {
    cursor: &'c mut TokenCursor<'a>,
    qualifiers: Vec<Ident>,
}

impl<'c, 'a> ExpressionParser<'c, 'a> {
    /// Creates a parser positioned at the cursor's current token.
    pub fn new(cursor: &'c mut TokenCursor<'a>) -> Self {
        Self {
            cursor,
            qualifiers: Vec::new(),
        }
    }

    /// Parses a full expression, `AND`/`OR` included.
    ///
    /// # Errors
    ///
    /// Fails on malformed input and on subqueries.
    pub fn parse(&mut self) -> Result<Expr> {
        self.parse_expression(0)
    }

    /// Parses an expression that stops before any comparison operator,
    /// such as one side of `a.id = b.id`.
    ///
    /// # Errors
    ///
    /// Fails on malformed input and on subqueries.
    pub fn parse_operand(&mut self) -> Result<Expr> {
        self.parse_expression(COMPARISON_BP + 1)
    }

    /// Returns the owners of every `owner.column` reference parsed so far.
    #[must_use]
    pub fn into_qualifiers(self) -> Vec<Ident> {
        self.qualifiers
    }

    fn parse_expression(&mut self, min_bp: u8) -> Result<Expr> {
        let start = self.cursor.start();
        let mut lhs = self.parse_prefix()?;

        loop {
            if let Some(bp) = postfix_binding_power(self.cursor.kind()) {
                if bp < min_bp {
                    break;
                }
                self.parse_cast()?;
                lhs = self.other_since(start);
                continue;
            }

            let Some((l_bp, r_bp)) = infix_binding_power(self.cursor.kind()) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            if self.cursor.check_keyword(Keyword::Not)
                && !matches!(
                    self.cursor.peek(1).as_keyword(),
                    Some(Keyword::In | Keyword::Between | Keyword::Like)
                )
            {
                break;
            }

            self.parse_infix(r_bp)?;
            lhs = self.other_since(start);
        }

        Ok(lhs)
    }

    fn parse_infix(&mut self, r_bp: u8) -> Result<()> {
        self.cursor.skip_if_keyword(Keyword::Not);
        match self.cursor.kind() {
            TokenKind::Keyword(Keyword::Is) => {
                self.cursor.advance();
                self.cursor.skip_if_keyword(Keyword::Not);
                if !self
                    .cursor
                    .skip_if_any_keyword(&[Keyword::Null, Keyword::True, Keyword::False])
                {
                    return Err(self.cursor.unexpected("NULL"));
                }
            }
            TokenKind::Keyword(Keyword::In) => {
                self.cursor.advance();
                if !self.cursor.check(&TokenKind::LeftParen) {
                    return Err(self.cursor.unexpected("("));
                }
                self.parse_parenthesized()?;
            }
            TokenKind::Keyword(Keyword::Between) => {
                self.cursor.advance();
                self.parse_expression(r_bp)?;
                self.cursor.expect_keyword(Keyword::And)?;
                self.parse_expression(r_bp)?;
            }
            TokenKind::Keyword(Keyword::Like) => {
                self.cursor.advance();
                self.parse_expression(r_bp)?;
                if self.cursor.literal().eq_ignore_ascii_case("ESCAPE") {
                    self.cursor.advance();
                    self.parse_expression(r_bp)?;
                }
            }
            _ => {
                self.cursor.advance();
                self.parse_expression(r_bp)?;
            }
        }
        Ok(())
    }

    fn parse_prefix(&mut self) -> Result<Expr> {
        let start = self.cursor.start();
        if let Some(bp) = prefix_binding_power(self.cursor.kind()) {
            self.cursor.advance();
            self.parse_expression(bp)?;
            return Ok(self.other_since(start));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let token = self.cursor.current().clone();

        match &token.kind {
            TokenKind::Integer(n) => {
                self.cursor.advance();
                Ok(Expr::number(*n))
            }
            TokenKind::Float(_)
            | TokenKind::String(_)
            | TokenKind::Blob(_)
            | TokenKind::Keyword(Keyword::Null | Keyword::True | Keyword::False) => {
                self.cursor.advance();
                Ok(Expr::other(token.span))
            }

            TokenKind::Question => {
                self.cursor.next_parameter()?;
                Ok(Expr::other(token.span))
            }
            // Named parameter `:name` and session variables `@x`, `@@x`
            TokenKind::Colon | TokenKind::At => {
                self.cursor.advance();
                self.cursor.skip_if(&TokenKind::At);
                if self.cursor.kind().is_symbol() || self.cursor.is_eof() {
                    return Err(self.cursor.unexpected("name"));
                }
                self.cursor.advance();
                Ok(self.other_since(token.span.start))
            }

            TokenKind::LeftParen => {
                self.parse_parenthesized()?;
                Ok(self.other_since(token.span.start))
            }

            TokenKind::Keyword(Keyword::Exists) => {
                Err(ParseError::SubqueryUnsupported { span: token.span })
            }

            TokenKind::Keyword(Keyword::Case) => {
                self.parse_case()?;
                Ok(self.other_since(token.span.start))
            }

            // Aggregates and LEFT/RIGHT are keywords but also function names.
            TokenKind::Keyword(
                Keyword::Count
                | Keyword::Sum
                | Keyword::Avg
                | Keyword::Min
                | Keyword::Max
                | Keyword::Left
                | Keyword::Right,
            ) if matches!(self.cursor.peek(1).kind, TokenKind::LeftParen) => {
                self.cursor.advance();
                self.skip_function_arguments()?;
                Ok(self.other_since(token.span.start))
            }

            TokenKind::Identifier(_)
            | TokenKind::Keyword(
                Keyword::Count | Keyword::Sum | Keyword::Avg | Keyword::Min | Keyword::Max,
            ) => self.parse_name(),

            TokenKind::Keyword(kw) if kw.is_non_reserved() => self.parse_name(),

            _ => Err(self.cursor.unexpected("expression")),
        }
    }

    /// Parses a column reference, a qualified property or a function call.
    fn parse_name(&mut self) -> Result<Expr> {
        let start = self.cursor.start();
        let mut ident = self.take_ident();

        if self.cursor.check(&TokenKind::LeftParen) {
            self.skip_function_arguments()?;
            return Ok(self.other_since(start));
        }

        let mut owner = None;
        while self.cursor.skip_if(&TokenKind::Dot) {
            if self.cursor.skip_if(&TokenKind::Star) {
                self.qualifiers.push(ident);
                return Ok(self.other_since(start));
            }
            if self.cursor.kind().is_symbol() || self.cursor.is_eof() {
                return Err(self.cursor.unexpected("column name"));
            }
            owner = Some(ident);
            ident = self.take_ident();
        }

        Ok(match owner {
            Some(owner) => {
                self.qualifiers.push(owner.clone());
                Expr::property(owner, ident)
            }
            None => Expr::identifier(ident),
        })
    }

    fn take_ident(&mut self) -> Ident {
        let span = self.cursor.current().span;
        let ident = Ident::new(exact_value(self.cursor.literal()), span);
        self.cursor.advance();
        ident
    }

    /// Consumes `( expr [, expr]* )` or a parenthesized subquery, which fails.
    fn parse_parenthesized(&mut self) -> Result<()> {
        let open = self.cursor.current().span;
        self.cursor.expect(&TokenKind::LeftParen)?;
        if self.cursor.check_keyword(Keyword::Select) {
            return Err(ParseError::SubqueryUnsupported { span: open });
        }
        if self.cursor.skip_if(&TokenKind::RightParen) {
            return Ok(());
        }
        loop {
            self.parse_expression(0)?;
            if !self.cursor.skip_if(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(&TokenKind::RightParen)
    }

    /// Skips a function's argument list token by token.
    ///
    /// Arguments are not parsed as expressions because functions such as
    /// `CAST(x AS INT)` or `EXTRACT(YEAR FROM d)` have their own grammar.
    /// Placeholders are still counted and qualifiers still collected.
    fn skip_function_arguments(&mut self) -> Result<()> {
        let mut depth = 0_usize;
        loop {
            match self.cursor.kind() {
                TokenKind::LeftParen => {
                    if matches!(self.cursor.peek(1).as_keyword(), Some(Keyword::Select)) {
                        return Err(ParseError::SubqueryUnsupported {
                            span: self.cursor.current().span,
                        });
                    }
                    depth += 1;
                }
                TokenKind::RightParen => depth -= 1,
                TokenKind::Question => {
                    self.cursor.next_parameter()?;
                    continue;
                }
                TokenKind::Identifier(_)
                    if matches!(self.cursor.peek(1).kind, TokenKind::Dot) =>
                {
                    let owner = self.take_ident();
                    self.qualifiers.push(owner);
                    continue;
                }
                TokenKind::Eof => return Err(self.cursor.unexpected(")")),
                _ => {}
            }
            self.cursor.advance();
            if depth == 0 {
                return Ok(());
            }
        }
    }

    fn parse_case(&mut self) -> Result<()> {
        self.cursor.expect_keyword(Keyword::Case)?;
        if !self.cursor.check_keyword(Keyword::When) {
            self.parse_expression(0)?;
        }
        if !self.cursor.check_keyword(Keyword::When) {
            return Err(self.cursor.unexpected("WHEN"));
        }
        while self.cursor.skip_if_keyword(Keyword::When) {
            self.parse_expression(0)?;
            self.cursor.expect_keyword(Keyword::Then)?;
            self.parse_expression(0)?;
        }
        if self.cursor.skip_if_keyword(Keyword::Else) {
            self.parse_expression(0)?;
        }
        self.cursor.expect_keyword(Keyword::End)
    }

    /// Consumes `::type` or `::type(n)`.
    fn parse_cast(&mut self) -> Result<()> {
        self.cursor.expect(&TokenKind::DoubleColon)?;
        if self.cursor.kind().is_symbol() || self.cursor.is_eof() {
            return Err(self.cursor.unexpected("type name"));
        }
        self.cursor.advance();
        self.cursor.skip_parentheses()?;
        Ok(())
    }

    fn other_since(&self, start: usize) -> Expr {
        Expr::other(Span::new(start, self.cursor.previous().end))
    }
}
