//! Tests for projection items: kinds, ordinal indices, aliases and star.

mod common;
use common::*;

use shard_sql_core::ast::{AggregationKind, SelectItem};

#[test]
fn items_ordinal_indices_span_the_whole_list() {
    let s = analyze("SELECT id, COUNT(*), name, MAX(price) AS top FROM t_order");
    assert_eq!(s.items.len(), 4);
    let count = s.items[1].as_aggregation().unwrap();
    assert_eq!(count.kind, AggregationKind::Count);
    assert_eq!(count.inner_expression, "(*)");
    assert_eq!(count.index, Some(2));
    let max = s.items[3].as_aggregation().unwrap();
    assert_eq!(max.kind, AggregationKind::Max);
    assert_eq!(max.index, Some(4));
    assert_eq!(max.alias.as_deref(), Some("top"));
}

#[test]
fn items_plain_with_as_and_bare_alias() {
    let s = analyze("SELECT o.user_id AS uid, price * qty total FROM t_order o");
    assert!(matches!(
        &s.items[0],
        SelectItem::Plain(p) if p.expression == "o.user_id" && p.alias.as_deref() == Some("uid")
    ));
    assert!(matches!(
        &s.items[1],
        SelectItem::Plain(p) if p.expression == "price * qty" && p.alias.as_deref() == Some("total")
    ));
}

#[test]
fn items_quotes_are_stripped() {
    let s = analyze("SELECT `status` AS `st` FROM `t_order`");
    assert_eq!(s.items[0].expression(), "status");
    assert_eq!(s.items[0].alias(), Some("st"));
    assert_eq!(s.tables[0].name, "t_order");
}

#[test]
fn items_aggregation_inside_expression_is_plain() {
    let s = analyze("SELECT COUNT(id) + 1 AS n FROM t_order");
    assert!(matches!(
        &s.items[0],
        SelectItem::Plain(p) if p.expression == "COUNT(id) + 1" && p.alias.as_deref() == Some("n")
    ));
}

#[test]
fn items_star_sets_flag_without_derived_columns() {
    let s = analyze("SELECT * FROM t_order GROUP BY status ORDER BY name");
    assert!(s.contains_star);
    assert!(s.items[0].is_star());
    assert!(inserted(&s).is_empty());
    assert_eq!(s.order_by[0].alias, None);
    assert_eq!(s.group_by[0].alias, None);
}

#[test]
fn items_star_with_other_items() {
    let s = analyze("SELECT id, * FROM t_order ORDER BY name");
    assert!(s.contains_star);
    assert!(inserted(&s).is_empty());
}

#[test]
fn items_qualified_star_is_plain() {
    let s = analyze("SELECT o.* FROM t_order o ORDER BY o.id");
    assert!(!s.contains_star);
    assert_eq!(s.items[0].expression(), "o.*");
    assert_eq!(inserted(&s), vec!["o.id AS ORDER_BY_DERIVED_0"]);
}

#[test]
fn items_parameters_before_from_are_counted() {
    let s = analyze("SELECT IFNULL(name, ?) FROM t_user WHERE id = ?");
    assert_eq!(s.parameters_index, 2);
}

#[test]
fn items_case_expression() {
    let s = analyze(
        "SELECT CASE WHEN status = 'PAID' THEN 1 ELSE 0 END AS paid FROM t_order",
    );
    assert_eq!(
        s.items[0].expression(),
        "CASE WHEN status = PAID THEN 1 ELSE 0 END"
    );
    assert_eq!(s.items[0].alias(), Some("paid"));
}

#[test]
fn items_select_list_last_position() {
    let sql = "SELECT id, name FROM t_user";
    assert_eq!(analyze(sql).select_list_last_position, sql.find("FROM").unwrap());
}
