//! Applies rewrite tokens to the original SQL text.

use std::cmp::Reverse;
use std::collections::HashMap;

use tracing::{debug, warn};

use super::token::RewriteToken;
use crate::util::exact_value;

/// Logical-to-physical table names, matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct TableMap {
    tables: HashMap<String, String>,
}

impl TableMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes `logical` to `physical`.
    pub fn insert(&mut self, logical: impl Into<String>, physical: impl Into<String>) {
        self.tables
            .insert(logical.into().to_ascii_lowercase(), physical.into());
    }

    /// Returns the physical name for a logical table.
    #[must_use]
    pub fn get(&self, logical: &str) -> Option<&str> {
        self.tables
            .get(&logical.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns true if no routes are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TableMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (logical, physical) in iter {
            map.insert(logical, physical);
        }
        map
    }
}

/// Rewrites one query for one shard.
///
/// Tokens are applied in descending offset order against the original text,
/// so every offset recorded at parse time stays valid.
#[derive(Debug, Clone, Copy)]
pub struct SqlRewriter<'a> {
    sql: &'a str,
    tokens: &'a [RewriteToken],
}

impl<'a> SqlRewriter<'a> {
    /// Creates a rewriter over the SQL the tokens were produced from.
    #[must_use]
    pub const fn new(sql: &'a str, tokens: &'a [RewriteToken]) -> Self {
        Self { sql, tokens }
    }

    /// Rewrites table names with `physical_name` and inserts derived columns.
    ///
    /// `physical_name` receives the unquoted logical name; returning `None`
    /// leaves that occurrence untouched.
    #[must_use]
    pub fn rewrite<F>(&self, mut physical_name: F) -> String
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut ordered: Vec<&RewriteToken> = self.tokens.iter().collect();
        ordered.sort_by_key(|token| Reverse(token.offset()));
        ordered.dedup();

        let mut sql = self.sql.to_owned();
        let mut boundary = sql.len();
        for token in ordered {
            match token {
                RewriteToken::TableName(table) => {
                    let written = self.sql.get(table.offset..table.end());
                    if table.end() > boundary || written != Some(table.original_text.as_str()) {
                        warn!(
                            offset = table.offset,
                            text = %table.original_text,
                            "table token does not match the original text; skipping"
                        );
                        continue;
                    }
                    if let Some(physical) = physical_name(&exact_value(&table.original_text)) {
                        sql.replace_range(table.offset..table.end(), &physical);
                    }
                    boundary = table.offset;
                }
                RewriteToken::ProjectionInsert(insert) => {
                    if insert.offset > boundary || !self.sql.is_char_boundary(insert.offset) {
                        warn!(offset = insert.offset, "insert token out of order; skipping");
                        continue;
                    }
                    sql.insert_str(insert.offset, &insert.render());
                    boundary = insert.offset;
                }
            }
        }
        debug!(original = self.sql, rewritten = %sql, "rewrote query");
        sql
    }

    /// Rewrites table names through a [`TableMap`].
    #[must_use]
    pub fn rewrite_with(&self, tables: &TableMap) -> String {
        self.rewrite(|logical| tables.get(logical).map(str::to_owned))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::ProjectionInsertToken;

    #[test]
    fn test_replaces_table_names() {
        let sql = "SELECT o.id FROM t_order o";
        let tokens = vec![
            RewriteToken::table_name(7, "o"),
            RewriteToken::table_name(17, "t_order"),
        ];
        let tables: TableMap = [("t_order", "t_order_1")].into_iter().collect();
        assert_eq!(
            SqlRewriter::new(sql, &tokens).rewrite_with(&tables),
            "SELECT o.id FROM t_order_1 o"
        );
    }

    #[test]
    fn test_quoted_name_lookup_is_unquoted() {
        let sql = "SELECT * FROM `T_Order`";
        let tokens = vec![RewriteToken::table_name(14, "`T_Order`")];
        let tables: TableMap = [("t_order", "t_order_0")].into_iter().collect();
        assert_eq!(
            SqlRewriter::new(sql, &tokens).rewrite_with(&tables),
            "SELECT * FROM t_order_0"
        );
    }

    #[test]
    fn test_inserts_and_replaces_together() {
        let sql = "SELECT id FROM t ORDER BY name";
        let mut insert = ProjectionInsertToken::new(10);
        insert.items.push(String::from("name AS ORDER_BY_DERIVED_0"));
        let tokens = vec![
            RewriteToken::table_name(15, "t"),
            RewriteToken::ProjectionInsert(insert),
        ];
        let rewritten = SqlRewriter::new(sql, &tokens).rewrite(|_| Some(String::from("t_1")));
        assert_eq!(
            rewritten,
            "SELECT id , name AS ORDER_BY_DERIVED_0 FROM t_1 ORDER BY name"
        );
    }

    #[test]
    fn test_mismatched_token_is_skipped() {
        let sql = "SELECT * FROM t";
        let tokens = vec![RewriteToken::table_name(14, "other")];
        assert_eq!(
            SqlRewriter::new(sql, &tokens).rewrite(|_| Some(String::from("x"))),
            sql
        );
    }

    #[test]
    fn test_table_map_ignores_case() {
        let mut tables = TableMap::new();
        assert!(tables.is_empty());
        tables.insert("T_ORDER", "t_order_7");
        assert_eq!(tables.get("t_order"), Some("t_order_7"));
        assert_eq!(tables.get("t_item"), None);
    }
}
