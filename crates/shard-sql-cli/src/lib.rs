//! # shard-sql-cli
//!
//! Inspect how a sharding router sees a SELECT: the parsed projection,
//! tables and keys, the rewrite tokens, and the SQL sent to one shard.
//!
//! ```text
//! shard-sql --dialect mysql analyze "SELECT AVG(price) FROM t_order LIMIT 10"
//! shard-sql rewrite --table t_order=t_order_1 "SELECT * FROM t_order o"
//! shard-sql analyze --json -t t_order=t_order_1 "SELECT id FROM t_order"
//! ```

pub mod config;
pub mod error;
pub mod report;

use std::io::Read;

use shard_sql_core::{SelectParser, SelectStatement, SqlRewriter, TableMap};
use tracing::info;

pub use config::DialectKind;
pub use error::{CliError, Result};
pub use report::Report;

/// Returns `sql`, or reads the query from stdin when it is absent.
///
/// # Errors
///
/// Fails on read errors or when the query is blank.
pub fn read_sql(sql: Option<String>) -> Result<String> {
    let sql = match sql {
        Some(sql) => sql,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let sql = sql.trim();
    if sql.is_empty() {
        return Err(CliError::EmptyQuery);
    }
    Ok(sql.to_owned())
}

/// Parses `sql` under the chosen dialect.
///
/// # Errors
///
/// Returns the parser's error for unsupported or malformed statements.
pub fn analyze(sql: &str, dialect: DialectKind) -> Result<SelectStatement> {
    let statement = SelectParser::new(sql, dialect.dialect())?.parse()?;
    info!(
        dialect = dialect.name(),
        items = statement.items.len(),
        tables = statement.tables.len(),
        tokens = statement.tokens.len(),
        "analyzed statement"
    );
    Ok(statement)
}

/// Applies the statement's tokens with the given routes.
#[must_use]
pub fn rewrite(sql: &str, statement: &SelectStatement, tables: &TableMap) -> String {
    SqlRewriter::new(sql, &statement.tokens).rewrite_with(tables)
}

/// Rewrites `sql` when at least one route is given.
#[must_use]
pub fn rewrite_routed(
    sql: &str,
    statement: &SelectStatement,
    tables: &TableMap,
) -> Option<String> {
    (!tables.is_empty()).then(|| rewrite(sql, statement, tables))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shard_sql_core::ParseError;

    #[test]
    fn test_analyze_and_rewrite() {
        let sql = "SELECT AVG(price) FROM t_order";
        let statement = analyze(sql, DialectKind::Generic).unwrap();
        let tables = config::table_map(&[String::from("t_order=t_order_7")]).unwrap();
        assert_eq!(
            rewrite(sql, &statement, &tables),
            "SELECT AVG(price) , COUNT(price) AS AVG_DERIVED_COUNT_0, \
             SUM(price) AS AVG_DERIVED_SUM_0 FROM t_order_7"
        );
    }

    #[test]
    fn test_rewrite_routed_needs_a_route() {
        let sql = "SELECT id FROM t_order FOR UPDATE";
        let statement = analyze(sql, DialectKind::Mysql).unwrap();
        assert_eq!(rewrite_routed(sql, &statement, &TableMap::new()), None);
        let tables = config::table_map(&[String::from("t_order=t_order_2")]).unwrap();
        assert_eq!(
            rewrite_routed(sql, &statement, &tables).as_deref(),
            Some("SELECT id FROM t_order_2 FOR UPDATE")
        );
    }

    #[test]
    fn test_analyze_with_mysql_limit() {
        let statement = analyze("SELECT id FROM t LIMIT 5, 10", DialectKind::Mysql).unwrap();
        assert!(statement.limit.is_some());
        assert!(analyze("SELECT id FROM t LIMIT 5, 10", DialectKind::Generic).is_err());
    }

    #[test]
    fn test_parse_errors_are_wrapped() {
        let err = analyze("SELECT id FROM (SELECT 1) t", DialectKind::Generic).unwrap_err();
        assert!(matches!(
            err,
            CliError::Parse(ParseError::SubqueryUnsupported { .. })
        ));
    }

    #[test]
    fn test_read_sql_rejects_blank() {
        assert!(matches!(read_sql(Some(String::from("  "))), Err(CliError::EmptyQuery)));
        assert_eq!(read_sql(Some(String::from(" SELECT 1 \n"))).unwrap(), "SELECT 1");
    }
}
