//! Command-line configuration: dialect choice and table routes.

use clap::ValueEnum;
use shard_sql_core::{Dialect, GenericDialect, PostgresDialect, TableMap};
use shard_sql_mysql::MySqlDialect;

use crate::error::{CliError, Result};

/// SQL dialects selectable with `--dialect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DialectKind {
    /// ANSI defaults.
    #[default]
    Generic,
    /// MySQL: `LIMIT m, n`, locking reads.
    Mysql,
    /// PostgreSQL: `DISTINCT ON`, `LIMIT`/`OFFSET`.
    Postgres,
}

impl DialectKind {
    /// Returns the dialect's name as reported by its implementation.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.dialect().name()
    }

    /// Returns the dialect implementation.
    #[must_use]
    pub fn dialect(self) -> Box<dyn Dialect> {
        match self {
            Self::Generic => Box::new(GenericDialect::new()),
            Self::Mysql => Box::new(MySqlDialect::new()),
            Self::Postgres => Box::new(PostgresDialect::new()),
        }
    }
}

/// Parses one `logical=physical` route.
///
/// # Errors
///
/// Fails when either side is empty or `=` is missing.
pub fn parse_table_route(route: &str) -> Result<(String, String)> {
    match route.split_once('=') {
        Some((logical, physical)) if !logical.trim().is_empty() && !physical.trim().is_empty() => {
            Ok((logical.trim().to_owned(), physical.trim().to_owned()))
        }
        _ => Err(CliError::InvalidTableRoute(route.to_owned())),
    }
}

/// Builds a [`TableMap`] from `--table` arguments.
///
/// # Errors
///
/// Fails on the first malformed route.
pub fn table_map(routes: &[String]) -> Result<TableMap> {
    routes
        .iter()
        .map(|route| parse_table_route(route))
        .collect::<Result<Vec<_>>>()
        .map(|pairs| pairs.into_iter().collect())
}
