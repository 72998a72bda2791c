//! The SELECT statement model built by the analyzer.

use serde::Serialize;
use tracing::trace;

use super::item::SelectItem;
use crate::rewrite::RewriteToken;

/// Order direction for ORDER BY and GROUP BY keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A table named in the FROM clause.
///
/// Names are not deduplicated: self-joins register the same table twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    /// The logical table name, quoting removed.
    pub name: String,
    /// Alias, if any.
    pub alias: Option<String>,
}

impl Table {
    /// Creates a table reference.
    #[must_use]
    pub fn new(name: impl Into<String>, alias: Option<String>) -> Self {
        Self {
            name: name.into(),
            alias,
        }
    }
}

/// Returns `name` qualified by `owner` when there is one.
fn qualify(owner: Option<&str>, name: &str) -> String {
    match owner {
        Some(owner) => format!("{owner}.{name}"),
        None => name.to_owned(),
    }
}

/// A GROUP BY key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupKey {
    /// Table or alias qualifier.
    pub owner: Option<String>,
    /// Column name.
    pub name: String,
    /// Direction (MySQL allows `GROUP BY x DESC`).
    pub direction: OrderDirection,
    /// Alias of the projection carrying this key.
    pub alias: Option<String>,
}

impl GroupKey {
    /// Returns `owner.name` or `name`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        qualify(self.owner.as_deref(), &self.name)
    }
}

/// An ORDER BY key, either a column or a 1-based projection position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderKey {
    /// Table or alias qualifier.
    pub owner: Option<String>,
    /// Column name; `None` for positional keys.
    pub name: Option<String>,
    /// Projection position for `ORDER BY 2`.
    pub index: Option<usize>,
    /// Sort direction.
    pub direction: OrderDirection,
    /// Alias of the projection carrying this key.
    pub alias: Option<String>,
}

impl OrderKey {
    /// Creates a column key.
    #[must_use]
    pub fn column(
        owner: Option<String>,
        name: impl Into<String>,
        direction: OrderDirection,
        alias: Option<String>,
    ) -> Self {
        Self {
            owner,
            name: Some(name.into()),
            index: None,
            direction,
            alias,
        }
    }

    /// Creates a positional key.
    #[must_use]
    pub const fn position(index: usize, direction: OrderDirection) -> Self {
        Self {
            owner: None,
            name: None,
            index: Some(index),
            direction,
            alias: None,
        }
    }

    /// Returns `owner.name` or `name`; `None` for positional keys.
    #[must_use]
    pub fn qualified_name(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(|name| qualify(self.owner.as_deref(), name))
    }
}

/// A LIMIT/OFFSET operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum LimitValue {
    /// A literal number.
    Literal(i64),
    /// A `?` placeholder, by 0-based parameter index.
    Parameter(usize),
}

/// Row limiting parsed by a dialect's trailing-clause hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Limit {
    /// Rows to skip.
    pub offset: Option<LimitValue>,
    /// Rows to return; `None` for `LIMIT ALL`.
    pub row_count: Option<LimitValue>,
}

/// A SELECT statement together with its rewrite tokens.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SelectStatement {
    /// `DISTINCT` (or `DISTINCTROW`) was given.
    pub distinct: bool,
    /// The projection list in textual order.
    pub items: Vec<SelectItem>,
    /// Tables from FROM and JOIN clauses in textual order.
    pub tables: Vec<Table>,
    /// GROUP BY keys.
    pub group_by: Vec<GroupKey>,
    /// ORDER BY keys.
    pub order_by: Vec<OrderKey>,
    /// Some projection item is `*`.
    pub contains_star: bool,
    /// Byte offset of the token that ended the projection list.
    pub select_list_last_position: usize,
    /// `?` placeholders consumed up to the end of the WHERE clause.
    pub parameters_index: usize,
    /// Row limiting, when the dialect parses it.
    pub limit: Option<Limit>,
    /// Rewrite instructions in discovery order.
    pub tokens: Vec<RewriteToken>,
}

impl SelectStatement {
    /// Creates an empty statement.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the first registered table with the given name (case-insensitive).
    #[must_use]
    pub fn find_table(&self, name: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|table| table.name.eq_ignore_ascii_case(name))
    }

    /// Appends a rewrite token.
    pub fn push_token(&mut self, token: RewriteToken) {
        trace!(offset = token.offset(), ?token, "recorded rewrite token");
        self.tokens.push(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_names() {
        let group = GroupKey {
            owner: Some(String::from("o")),
            name: String::from("user_id"),
            direction: OrderDirection::Asc,
            alias: None,
        };
        assert_eq!(group.qualified_name(), "o.user_id");

        let order = OrderKey::column(None, "status", OrderDirection::Desc, None);
        assert_eq!(order.qualified_name().as_deref(), Some("status"));
        assert_eq!(OrderKey::position(2, OrderDirection::Asc).qualified_name(), None);
    }

    #[test]
    fn test_find_table_ignores_case() {
        let mut statement = SelectStatement::new();
        statement.tables.push(Table::new("t_order", Some(String::from("o"))));
        assert!(statement.find_table("T_ORDER").is_some());
        assert!(statement.find_table("o").is_none());
    }
}
