//! # shard-sql-core
//!
//! SELECT analysis for SQL sharding middleware.
//!
//! Given one logical SELECT, the analyzer builds a [`SelectStatement`]
//! describing its projection list, tables, grouping and ordering, together
//! with a list of [`RewriteToken`]s anchored at byte offsets of the original
//! text. A router applies the tokens per shard with [`SqlRewriter`] instead
//! of re-serializing an AST:
//!
//! - table names are swapped for physical shard tables;
//! - `AVG` is complemented by `COUNT` and `SUM` columns so partial results
//!   can be merged;
//! - ORDER BY and GROUP BY keys missing from the projection are appended so
//!   a merge sort can see them.
//!
//! ```rust
//! use shard_sql_core::{SqlRewriter, TableMap, parse_select};
//!
//! let sql = "SELECT o.user_id FROM t_order o WHERE o.status = ? ORDER BY o.created";
//! let statement = parse_select(sql).unwrap();
//! assert_eq!(statement.tables[0].name, "t_order");
//!
//! let tables: TableMap = [("t_order", "t_order_3")].into_iter().collect();
//! let rewritten = SqlRewriter::new(sql, &statement.tokens).rewrite_with(&tables);
//! assert_eq!(
//!     rewritten,
//!     "SELECT o.user_id , o.created AS ORDER_BY_DERIVED_0 FROM t_order_3 o \
//!      WHERE o.status = ? ORDER BY o.created"
//! );
//! ```
//!
//! Dialect differences (`DISTINCT ON`, trailing `LIMIT` forms) are handled
//! through the [`Dialect`] trait.

pub mod ast;
pub mod dialect;
pub mod lexer;
pub mod parser;
pub mod rewrite;
mod select;
mod util;

pub use ast::{SelectItem, SelectStatement};
pub use dialect::{Dialect, GenericDialect, PostgresDialect};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{ParseError, TokenCursor};
pub use rewrite::{RewriteToken, SqlRewriter, TableMap};
pub use select::{
    SelectParser, parse_limit_value, parse_order_by_item, parse_select, parse_tracked_expression,
    resolve_alias,
};
pub use util::exact_value;
