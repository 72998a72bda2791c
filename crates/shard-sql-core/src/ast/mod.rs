//! The statement model: projection items, tables, grouping and ordering keys.

mod expression;
mod item;
mod statement;

pub use expression::{Expr, Ident};
pub use item::{AggregationItem, AggregationKind, PlainItem, SelectItem, StarItem};
pub use statement::{
    GroupKey, Limit, LimitValue, OrderDirection, OrderKey, SelectStatement, Table,
};
