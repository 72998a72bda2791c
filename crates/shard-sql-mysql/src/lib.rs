//! # shard-sql-mysql
//!
//! MySQL dialect for `shard-sql-core`.
//!
//! # How MySQL differs from other dialects
//!
//! - **[LIMIT]**: MySQL accepts `LIMIT row_count`,
//!   `LIMIT offset, row_count` and `LIMIT row_count OFFSET offset`.
//!   Both operands may be `?` placeholders. The parsed values land in
//!   [`SelectStatement::limit`](shard_sql_core::SelectStatement) so a
//!   router can widen the limit per shard.
//! - **Locking reads**: `FOR UPDATE` and `LOCK IN SHARE MODE` may close a
//!   SELECT. They do not affect routing and are skipped.
//! - **`DISTINCTROW`**: a synonym of `DISTINCT`, understood by the core
//!   analyzer for every dialect.
//! - **Identifier quoting**: backticks, which the core lexer strips when
//!   comparing names while keeping them in rewrite tokens.
//!
//! [LIMIT]: https://dev.mysql.com/doc/refman/8.0/en/select.html
//!
//! ## Example
//!
//! ```rust
//! use shard_sql_core::SelectParser;
//! use shard_sql_core::ast::LimitValue;
//! use shard_sql_mysql::MySqlDialect;
//!
//! let statement = SelectParser::new(
//!     "SELECT * FROM `t_order` WHERE user_id = ? LIMIT ?, 20",
//!     MySqlDialect::new(),
//! )
//! .unwrap()
//! .parse()
//! .unwrap();
//! let limit = statement.limit.unwrap();
//! assert_eq!(limit.offset, Some(LimitValue::Parameter(1)));
//! assert_eq!(limit.row_count, Some(LimitValue::Literal(20)));
//! ```

mod dialect;

pub use dialect::MySqlDialect;
