//! Derived columns for cross-shard merging.
//!
//! A shard cannot return a mergeable AVG, and a merge sort or group needs
//! every ORDER BY and GROUP BY key among the returned columns. This pass
//! adds what is missing as aliased projections, all inserted at the end of
//! the projection list.

use tracing::debug;

use crate::ast::{AggregationItem, AggregationKind, SelectItem, SelectStatement};
use crate::rewrite::{ProjectionInsertToken, RewriteToken};

const AVG_DERIVED_COUNT: &str = "AVG_DERIVED_COUNT_";
const AVG_DERIVED_SUM: &str = "AVG_DERIVED_SUM_";
const ORDER_BY_DERIVED: &str = "ORDER_BY_DERIVED_";
const GROUP_BY_DERIVED: &str = "GROUP_BY_DERIVED_";

/// Splits AVG items and materializes ORDER BY and GROUP BY keys.
///
/// Pushes one [`ProjectionInsertToken`] at `select_list_last_position`
/// unless nothing needs inserting.
pub(super) fn append_derived_columns(statement: &mut SelectStatement) {
    let mut insert = ProjectionInsertToken::new(statement.select_list_last_position);
    append_avg_derived_columns(statement, &mut insert);
    append_order_by_derived_columns(statement, &mut insert);
    append_group_by_derived_columns(statement, &mut insert);
    if !insert.items.is_empty() {
        debug!(columns = ?insert.items, "injecting derived columns");
        statement.push_token(RewriteToken::ProjectionInsert(insert));
    }
}

fn append_avg_derived_columns(
    statement: &mut SelectStatement,
    insert: &mut ProjectionInsertToken,
) {
    // Aliases already projected, e.g. when re-analyzing rewritten SQL.
    let projected: Vec<String> = statement
        .items
        .iter()
        .filter_map(SelectItem::alias)
        .map(str::to_ascii_uppercase)
        .collect();

    let avg_items = statement.items.iter_mut().filter_map(|item| match item {
        SelectItem::Aggregation(avg) if avg.kind == AggregationKind::Avg => Some(avg),
        _ => None,
    });
    for (offset, avg) in avg_items.enumerate() {
        for (kind, prefix) in [
            (AggregationKind::Count, AVG_DERIVED_COUNT),
            (AggregationKind::Sum, AVG_DERIVED_SUM),
        ] {
            let alias = format!("{prefix}{offset}");
            let derived = AggregationItem::derived(kind, avg.inner_expression.clone(), &alias);
            if !projected.contains(&alias) {
                insert.items.push(format!("{} AS {alias}", derived.expression()));
            }
            avg.derived.push(derived);
        }
    }
}

fn append_order_by_derived_columns(
    statement: &mut SelectStatement,
    insert: &mut ProjectionInsertToken,
) {
    if statement.contains_star {
        return;
    }
    let keys = statement
        .order_by
        .iter_mut()
        .filter(|key| key.index.is_none() && key.alias.is_none());
    for (offset, key) in keys.enumerate() {
        let Some(expression) = key.qualified_name() else {
            continue;
        };
        let alias = format!("{ORDER_BY_DERIVED}{offset}");
        insert.items.push(format!("{expression} AS {alias}"));
        key.alias = Some(alias);
    }
}

fn append_group_by_derived_columns(
    statement: &mut SelectStatement,
    insert: &mut ProjectionInsertToken,
) {
    if statement.contains_star {
        return;
    }
    let keys = statement
        .group_by
        .iter_mut()
        .filter(|key| key.alias.is_none());
    for (offset, key) in keys.enumerate() {
        let alias = format!("{GROUP_BY_DERIVED}{offset}");
        insert
            .items
            .push(format!("{} AS {alias}", key.qualified_name()));
        key.alias = Some(alias);
    }
}
