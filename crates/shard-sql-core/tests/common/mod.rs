#![allow(dead_code)]

use shard_sql_core::ast::SelectStatement;
use shard_sql_core::{Dialect, ParseError, RewriteToken, SelectParser, SqlRewriter, TableMap};

pub fn analyze(sql: &str) -> SelectStatement {
    shard_sql_core::parse_select(sql)
        .unwrap_or_else(|e| panic!("Failed to analyze: {sql}\nError: {e:?}"))
}

pub fn analyze_with<D: Dialect>(sql: &str, dialect: D) -> SelectStatement {
    SelectParser::new(sql, dialect)
        .and_then(SelectParser::parse)
        .unwrap_or_else(|e| panic!("Failed to analyze: {sql}\nError: {e:?}"))
}

pub fn analyze_err(sql: &str) -> ParseError {
    shard_sql_core::parse_select(sql).expect_err(&format!("Expected error for: {sql}"))
}

/// Applies the statement's tokens to `sql` with the given routes.
pub fn rewrite(sql: &str, statement: &SelectStatement, routes: &[(&str, &str)]) -> String {
    let tables: TableMap = routes.iter().copied().collect();
    SqlRewriter::new(sql, &statement.tokens).rewrite_with(&tables)
}

pub fn offsets(statement: &SelectStatement) -> Vec<usize> {
    statement.tokens.iter().map(RewriteToken::offset).collect()
}

/// Fragments of the projection insert token, empty if there is none.
pub fn inserted(statement: &SelectStatement) -> Vec<String> {
    statement
        .tokens
        .iter()
        .find_map(|token| match token {
            RewriteToken::ProjectionInsert(insert) => Some(insert.items.clone()),
            RewriteToken::TableName(_) => None,
        })
        .unwrap_or_default()
}

/// Asserts that analyzing the rewritten text needs no further derived columns.
pub fn assert_settled(rewritten: &str) {
    let again = analyze(rewritten);
    assert!(
        inserted(&again).is_empty(),
        "re-analysis injected {:?} into: {rewritten}",
        inserted(&again)
    );
}
