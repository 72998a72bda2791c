//! SQL Dialect support.
//!
//! Databases disagree on a few corners of SELECT syntax: `DISTINCT ON`,
//! trailing row-limiting clauses, ORDER BY extensions. The analyzer runs a
//! fixed clause sequence and asks the dialect at each of these points.

mod generic;
mod postgres;

pub use generic::GenericDialect;
pub use postgres::PostgresDialect;

use crate::ast::{OrderKey, SelectStatement};
use crate::lexer::TokenKind;
use crate::parser::{ParseError, Result, TokenCursor};
use crate::select;

/// Dialect hooks consulted by [`SelectParser`](crate::SelectParser).
///
/// Every hook but [`name`](Dialect::name) has a default matching ANSI
/// behavior, so a dialect only overrides what it changes.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns whether `SELECT DISTINCT ON (...)` is accepted.
    fn supports_distinct_on(&self) -> bool {
        false
    }

    /// Returns a keyword skipped in front of each projection item, such as
    /// Oracle's `CONNECT_BY_ROOT`.
    fn select_item_prefix(&self) -> Option<&'static str> {
        None
    }

    /// Called after GROUP BY/HAVING, before ORDER BY.
    ///
    /// # Errors
    ///
    /// The default rejects set operations with [`ParseError::Unsupported`].
    fn on_query_rest(
        &self,
        cursor: &mut TokenCursor<'_>,
        _statement: &mut SelectStatement,
    ) -> Result<()> {
        reject_set_operation(cursor)
    }

    /// Parses one ORDER BY item. `Ok(None)` drops the item.
    ///
    /// # Errors
    ///
    /// Propagates expression parsing failures.
    fn parse_order_by_item(
        &self,
        cursor: &mut TokenCursor<'_>,
        statement: &mut SelectStatement,
    ) -> Result<Option<OrderKey>> {
        select::parse_order_by_item(cursor, statement)
    }

    /// Called after ORDER BY for dialect-only trailing clauses.
    ///
    /// # Errors
    ///
    /// Implementations fail on malformed trailing clauses.
    fn on_customized_select(
        &self,
        _cursor: &mut TokenCursor<'_>,
        _statement: &mut SelectStatement,
    ) -> Result<()> {
        Ok(())
    }
}

impl<D: Dialect + ?Sized> Dialect for Box<D> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn supports_distinct_on(&self) -> bool {
        (**self).supports_distinct_on()
    }

    fn select_item_prefix(&self) -> Option<&'static str> {
        (**self).select_item_prefix()
    }

    fn on_query_rest(
        &self,
        cursor: &mut TokenCursor<'_>,
        statement: &mut SelectStatement,
    ) -> Result<()> {
        (**self).on_query_rest(cursor, statement)
    }

    fn parse_order_by_item(
        &self,
        cursor: &mut TokenCursor<'_>,
        statement: &mut SelectStatement,
    ) -> Result<Option<OrderKey>> {
        (**self).parse_order_by_item(cursor, statement)
    }

    fn on_customized_select(
        &self,
        cursor: &mut TokenCursor<'_>,
        statement: &mut SelectStatement,
    ) -> Result<()> {
        (**self).on_customized_select(cursor, statement)
    }
}

/// Fails if the current token is `UNION`, `EXCEPT`, `INTERSECT` or `MINUS`.
///
/// # Errors
///
/// Returns [`ParseError::Unsupported`] naming the keyword.
pub fn reject_set_operation(cursor: &TokenCursor<'_>) -> Result<()> {
    match cursor.kind() {
        TokenKind::Keyword(kw) if kw.is_set_operation() => Err(ParseError::unsupported(
            kw.as_str(),
            cursor.current().span,
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_set_operation() {
        let cursor = TokenCursor::new("UNION SELECT").unwrap();
        let err = reject_set_operation(&cursor).unwrap_err();
        assert_eq!(
            err,
            ParseError::unsupported("UNION", crate::lexer::Span::new(0, 5))
        );

        let cursor = TokenCursor::new("ORDER BY x").unwrap();
        assert!(reject_set_operation(&cursor).is_ok());
    }

    #[test]
    fn test_boxed_dialect_delegates() {
        let dialect: Box<dyn Dialect> = Box::new(PostgresDialect::new());
        assert_eq!(dialect.name(), "postgres");
        assert!(dialect.supports_distinct_on());
        assert_eq!(dialect.select_item_prefix(), None);
    }
}
