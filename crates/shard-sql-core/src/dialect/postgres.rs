//! PostgreSQL dialect.

use tracing::debug;

use super::Dialect;
use crate::ast::{Limit, SelectStatement};
use crate::lexer::Keyword;
use crate::parser::{Result, TokenCursor};
use crate::select::parse_limit_value;

/// PostgreSQL: `DISTINCT ON (...)` and `LIMIT`/`OFFSET` in either order.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn supports_distinct_on(&self) -> bool {
        true
    }

    /// Parses `LIMIT {n | ? | ALL}` and `OFFSET {n | ?} [ROW | ROWS]`.
    fn on_customized_select(
        &self,
        cursor: &mut TokenCursor<'_>,
        statement: &mut SelectStatement,
    ) -> Result<()> {
        let mut limit = None::<Limit>;
        loop {
            if cursor.skip_if_keyword(Keyword::Limit) {
                let row_count = if cursor.skip_if_keyword(Keyword::All) {
                    None
                } else {
                    Some(parse_limit_value(cursor)?)
                };
                limit.get_or_insert_with(Limit::default).row_count = row_count;
            } else if cursor.skip_if_keyword(Keyword::Offset) {
                let offset = parse_limit_value(cursor)?;
                cursor.skip_if_any_keyword(&[Keyword::Row, Keyword::Rows]);
                limit.get_or_insert_with(Limit::default).offset = Some(offset);
            } else {
                break;
            }
        }
        if limit.is_some() {
            debug!(?limit, "parsed row limit");
            statement.limit = limit;
        }
        Ok(())
    }
}
