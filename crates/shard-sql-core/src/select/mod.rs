//! The SELECT analyzer.
//!
//! [`SelectParser`] drives the clause parsers in a fixed order, consults
//! the [`Dialect`] at its hook points and finishes by injecting the derived
//! columns a cross-shard merge needs.

mod alias;
mod derived;
mod items;
mod limit;
mod order;
mod table;

pub use alias::resolve_alias;
pub use limit::parse_limit_value;
pub use order::parse_order_by_item;

use tracing::debug;

use crate::ast::{Expr, SelectStatement};
use crate::dialect::{Dialect, GenericDialect};
use crate::lexer::{Keyword, TokenKind};
use crate::parser::{ExpressionParser, Result, TokenCursor};
use crate::rewrite::RewriteToken;

/// Analyzes one SELECT statement.
///
/// ```
/// use shard_sql_core::{GenericDialect, SelectParser};
///
/// let statement = SelectParser::new("SELECT AVG(score) FROM t_score", GenericDialect::new())
///     .unwrap()
///     .parse()
///     .unwrap();
/// let avg = statement.items[0].as_aggregation().unwrap();
/// assert_eq!(avg.derived.len(), 2);
/// ```
#[derive(Debug)]
pub struct SelectParser<'a, D = GenericDialect> {
    cursor: TokenCursor<'a>,
    dialect: D,
    statement: SelectStatement,
}

impl<'a, D: Dialect> SelectParser<'a, D> {
    /// Tokenizes `sql` and prepares a parse under `dialect`.
    ///
    /// # Errors
    ///
    /// Returns a lexical error if `sql` cannot be tokenized.
    pub fn new(sql: &'a str, dialect: D) -> Result<Self> {
        Ok(Self::from_cursor(TokenCursor::new(sql)?, dialect))
    }

    /// Prepares a parse from a cursor positioned at `SELECT`.
    #[must_use]
    pub fn from_cursor(cursor: TokenCursor<'a>, dialect: D) -> Self {
        Self {
            cursor,
            dialect,
            statement: SelectStatement::new(),
        }
    }

    /// Runs the analysis and returns the statement with its rewrite tokens.
    ///
    /// The parser is consumed: a parse cannot be repeated.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed clause, unsupported construct or
    /// subquery. No partial statement is returned.
    pub fn parse(mut self) -> Result<SelectStatement> {
        debug!(dialect = self.dialect.name(), sql = self.cursor.input(), "parsing select");
        self.query()?;
        order::parse_order_by(&mut self.cursor, &mut self.statement, &self.dialect)?;
        self.dialect
            .on_customized_select(&mut self.cursor, &mut self.statement)?;
        self.cursor.skip_if(&TokenKind::Semicolon);
        if !self.cursor.is_eof() {
            return Err(self.cursor.unexpected("end of statement"));
        }
        derived::append_derived_columns(&mut self.statement);
        debug!(
            items = self.statement.items.len(),
            tables = self.statement.tables.len(),
            tokens = self.statement.tokens.len(),
            "parsed select"
        );
        Ok(self.statement)
    }

    fn query(&mut self) -> Result<()> {
        self.cursor.expect_keyword(Keyword::Select)?;
        self.parse_distinct()?;
        items::parse_select_list(&mut self.cursor, &mut self.statement, &self.dialect)?;
        if self.cursor.skip_if_keyword(Keyword::From) {
            table::parse_table(&mut self.cursor, &mut self.statement)?;
        }
        self.parse_where()?;
        order::parse_group_by(&mut self.cursor, &mut self.statement)?;
        self.dialect
            .on_query_rest(&mut self.cursor, &mut self.statement)
    }

    fn parse_distinct(&mut self) -> Result<()> {
        if self
            .cursor
            .skip_if_any_keyword(&[Keyword::Distinct, Keyword::Distinctrow])
        {
            self.statement.distinct = true;
            if self.dialect.supports_distinct_on() && self.cursor.skip_if_keyword(Keyword::On) {
                self.cursor.skip_parentheses()?;
            }
        } else {
            self.cursor.skip_if_keyword(Keyword::All);
        }
        Ok(())
    }

    fn parse_where(&mut self) -> Result<()> {
        if self.statement.tables.is_empty() {
            // Nothing to route: the condition is consumed but not tracked.
            if self.cursor.skip_if_keyword(Keyword::Where) {
                ExpressionParser::new(&mut self.cursor).parse()?;
            }
            return Ok(());
        }
        if self.cursor.skip_if_keyword(Keyword::Where) {
            parse_tracked_expression(&mut self.cursor, &mut self.statement)?;
        }
        self.statement.parameters_index = self.cursor.parameters_index();
        Ok(())
    }
}

/// Parses an expression and records a table rewrite token for every
/// `owner.column` whose owner is a registered table name.
///
/// # Errors
///
/// Propagates expression parsing failures.
pub fn parse_tracked_expression(
    cursor: &mut TokenCursor<'_>,
    statement: &mut SelectStatement,
) -> Result<Expr> {
    let mut parser = ExpressionParser::new(cursor);
    let expr = parser.parse()?;
    for owner in parser.into_qualifiers() {
        if statement.find_table(&owner.value).is_some() {
            statement.push_token(RewriteToken::table_name(
                owner.span.start,
                cursor.source(owner.span),
            ));
        }
    }
    Ok(expr)
}

/// Analyzes `sql` with the [`GenericDialect`].
///
/// # Errors
///
/// See [`SelectParser::parse`].
pub fn parse_select(sql: &str) -> Result<SelectStatement> {
    SelectParser::new(sql, GenericDialect::new())?.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{LimitValue, SelectItem};
    use crate::dialect::PostgresDialect;
    use crate::parser::ParseError;

    #[test]
    fn test_simple_select() {
        let statement = parse_select("SELECT id, name FROM t_user").unwrap();
        assert_eq!(statement.items.len(), 2);
        assert_eq!(statement.tables[0].name, "t_user");
        assert!(!statement.distinct);
        assert_eq!(statement.select_list_last_position, 16);
    }

    #[test]
    fn test_distinct_and_all() {
        assert!(parse_select("SELECT DISTINCT id FROM t").unwrap().distinct);
        assert!(parse_select("SELECT DISTINCTROW id FROM t").unwrap().distinct);
        assert!(!parse_select("SELECT ALL id FROM t").unwrap().distinct);
    }

    #[test]
    fn test_distinct_on_depends_on_dialect() {
        let sql = "SELECT DISTINCT ON (user_id) user_id, status FROM t_order";
        let statement = SelectParser::new(sql, PostgresDialect::new())
            .unwrap()
            .parse()
            .unwrap();
        assert!(statement.distinct);
        assert_eq!(statement.items.len(), 2);

        let err = parse_select(sql).unwrap_err();
        assert!(matches!(err, ParseError::Unexpected { .. }));
    }

    #[test]
    fn test_where_tracks_table_qualifiers() {
        let sql = "SELECT * FROM t_order WHERE t_order.user_id = ? AND status = ?";
        let statement = parse_select(sql).unwrap();
        assert_eq!(statement.parameters_index, 2);
        assert_eq!(
            statement.tokens,
            vec![
                RewriteToken::table_name(14, "t_order"),
                RewriteToken::table_name(28, "t_order"),
            ]
        );
    }

    #[test]
    fn test_where_without_tables_is_not_tracked() {
        let statement = parse_select("SELECT 1 WHERE ? = 1").unwrap();
        assert_eq!(statement.parameters_index, 0);
        assert!(statement.tokens.is_empty());
    }

    #[test]
    fn test_trailing_tokens_fail() {
        let err = parse_select("SELECT id FROM t LIMIT 1").unwrap_err();
        assert!(matches!(err, ParseError::Unexpected { ref expected, .. } if expected == "end of statement"));
    }

    #[test]
    fn test_trailing_semicolon() {
        assert!(parse_select("SELECT id FROM t;").is_ok());
    }

    #[test]
    fn test_postgres_limit() {
        let statement = SelectParser::new(
            "SELECT id FROM t WHERE a = ? ORDER BY id LIMIT ? OFFSET 5",
            PostgresDialect::new(),
        )
        .unwrap()
        .parse()
        .unwrap();
        let limit = statement.limit.unwrap();
        assert_eq!(limit.row_count, Some(LimitValue::Parameter(1)));
        assert_eq!(limit.offset, Some(LimitValue::Literal(5)));
        assert_eq!(statement.parameters_index, 1);
    }

    #[test]
    fn test_missing_select() {
        let err = parse_select("UPDATE t SET a = 1").unwrap_err();
        assert!(matches!(err, ParseError::Unexpected { ref expected, .. } if expected == "SELECT"));
    }

    #[test]
    fn test_items_keep_textual_order() {
        let statement = parse_select("SELECT COUNT(*), user_id, MAX(price) FROM t").unwrap();
        let indexes: Vec<_> = statement
            .items
            .iter()
            .filter_map(SelectItem::as_aggregation)
            .map(|item| item.index)
            .collect();
        assert_eq!(indexes, vec![Some(1), Some(3)]);
    }
}
