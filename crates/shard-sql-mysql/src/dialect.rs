//! MySQL dialect implementation.

use shard_sql_core::ast::{Limit, SelectStatement};
use shard_sql_core::dialect::Dialect;
use shard_sql_core::lexer::{Keyword, TokenKind};
use shard_sql_core::parser::{Result, TokenCursor};
use shard_sql_core::parse_limit_value;
use tracing::debug;

/// MySQL dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn parse_limit(cursor: &mut TokenCursor<'_>) -> Result<Option<Limit>> {
        if !cursor.skip_if_keyword(Keyword::Limit) {
            return Ok(None);
        }
        let first = parse_limit_value(cursor)?;
        let limit = if cursor.skip_if(&TokenKind::Comma) {
            Limit {
                offset: Some(first),
                row_count: Some(parse_limit_value(cursor)?),
            }
        } else if cursor.skip_if_keyword(Keyword::Offset) {
            Limit {
                offset: Some(parse_limit_value(cursor)?),
                row_count: Some(first),
            }
        } else {
            Limit {
                offset: None,
                row_count: Some(first),
            }
        };
        Ok(Some(limit))
    }

    /// Skips `FOR UPDATE` or `LOCK IN SHARE MODE`.
    fn skip_locking_read(cursor: &mut TokenCursor<'_>) -> Result<()> {
        let words: &[&str] = if cursor.skip_if_keyword(Keyword::For) {
            &["UPDATE"]
        } else if cursor.skip_if_keyword(Keyword::Lock) {
            &["IN", "SHARE", "MODE"]
        } else {
            return Ok(());
        };
        for word in words {
            if !cursor.literal().eq_ignore_ascii_case(word) {
                return Err(cursor.unexpected(*word));
            }
            cursor.advance();
        }
        Ok(())
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn on_customized_select(
        &self,
        cursor: &mut TokenCursor<'_>,
        statement: &mut SelectStatement,
    ) -> Result<()> {
        if let Some(limit) = Self::parse_limit(cursor)? {
            debug!(?limit, "parsed row limit");
            statement.limit = Some(limit);
        }
        Self::skip_locking_read(cursor)
    }
}
