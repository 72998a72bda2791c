//! Tests for the JSON shape of analyzed statements.

mod common;
use common::*;

use serde_json::{json, Value};
use shard_sql_core::PostgresDialect;

fn to_json(sql: &str) -> Value {
    let statement = analyze_with(sql, PostgresDialect::new());
    serde_json::to_value(&statement).unwrap()
}

#[test]
fn items_are_tagged_by_type() {
    let value = to_json("SELECT AVG(score) AS a, *, name n FROM t_order");
    let items = &value["items"];
    assert_eq!(items[0]["type"], "aggregation");
    assert_eq!(items[0]["kind"], "AVG");
    assert_eq!(items[0]["inner_expression"], "(score)");
    assert_eq!(items[0]["index"], 1);
    assert_eq!(items[0]["derived"][0]["kind"], "COUNT");
    assert_eq!(items[0]["derived"][1]["alias"], "AVG_DERIVED_SUM_0");
    assert_eq!(items[0]["derived"][1]["index"], Value::Null);
    assert_eq!(items[1]["type"], "star");
    assert_eq!(items[2], json!({"type": "plain", "expression": "name", "alias": "n"}));
    assert_eq!(value["contains_star"], true);
}

#[test]
fn tokens_are_tagged_by_type() {
    let sql = "SELECT o.id FROM t_order o ORDER BY o.created";
    let value = to_json(sql);
    let tokens = value["tokens"].as_array().unwrap();
    assert_eq!(
        tokens[0],
        json!({"type": "table_name", "offset": 7, "original_text": "o"})
    );
    assert_eq!(tokens[1]["type"], "table_name");
    assert_eq!(tokens[1]["offset"], sql.find("t_order").unwrap());
    let insert = tokens.last().unwrap();
    assert_eq!(insert["type"], "projection_insert");
    assert_eq!(insert["items"], json!(["o.created AS ORDER_BY_DERIVED_0"]));
}

#[test]
fn order_keys_and_limit() {
    let value = to_json("SELECT id FROM t ORDER BY id, created DESC LIMIT 10 OFFSET ?");
    let order_by = &value["order_by"];
    assert_eq!(order_by[0]["direction"], "ASC");
    assert_eq!(order_by[0]["name"], "id");
    assert_eq!(order_by[1]["direction"], "DESC");
    assert_eq!(order_by[1]["owner"], Value::Null);
    assert_eq!(
        value["limit"],
        json!({
            "offset": {"type": "parameter", "value": 0},
            "row_count": {"type": "literal", "value": 10},
        })
    );
}
