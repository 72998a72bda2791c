//! Human-readable and JSON renderings of an analysis.

use serde::Serialize;
use shard_sql_core::ast::LimitValue;
use shard_sql_core::{RewriteToken, SelectItem, SelectStatement};

use crate::error::Result;

/// Analysis output for `--json`.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    /// Dialect used for the analysis.
    pub dialect: &'static str,
    /// The analyzed statement, rewrite tokens included.
    pub statement: &'a SelectStatement,
    /// The rewritten SQL, when table routes were given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewritten: Option<&'a str>,
}

impl Report<'_> {
    /// Renders the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Fails if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Renders the report as text.
    #[must_use]
    pub fn to_text(&self) -> String {
        let statement = self.statement;
        let mut out = String::new();
        out.push_str(&format!("dialect: {}\n", self.dialect));
        out.push_str(&format!("distinct: {}\n", statement.distinct));
        out.push_str("items:\n");
        for item in &statement.items {
            let kind = match item {
                SelectItem::Star(_) => "star",
                SelectItem::Aggregation(_) => "aggregation",
                SelectItem::Plain(_) => "plain",
            };
            out.push_str(&format!("  {kind:<12}{}", item.expression()));
            if let Some(alias) = item.alias() {
                out.push_str(&format!(" AS {alias}"));
            }
            out.push('\n');
            if let Some(aggregation) = item.as_aggregation() {
                for derived in &aggregation.derived {
                    out.push_str(&format!(
                        "    derived   {} AS {}\n",
                        derived.expression(),
                        derived.alias.as_deref().unwrap_or_default()
                    ));
                }
            }
        }
        out.push_str("tables:\n");
        for table in &statement.tables {
            out.push_str(&format!("  {}", table.name));
            if let Some(alias) = &table.alias {
                out.push_str(&format!(" AS {alias}"));
            }
            out.push('\n');
        }
        for key in &statement.group_by {
            out.push_str(&format!(
                "group by: {} {} (alias {})\n",
                key.qualified_name(),
                key.direction.as_str(),
                key.alias.as_deref().unwrap_or("-")
            ));
        }
        for key in &statement.order_by {
            let target = key
                .qualified_name()
                .or_else(|| key.index.map(|index| format!("#{index}")))
                .unwrap_or_default();
            out.push_str(&format!(
                "order by: {target} {} (alias {})\n",
                key.direction.as_str(),
                key.alias.as_deref().unwrap_or("-")
            ));
        }
        if let Some(limit) = statement.limit {
            out.push_str(&format!(
                "limit: offset {} row count {}\n",
                limit_value(limit.offset),
                limit_value(limit.row_count)
            ));
        }
        out.push_str(&format!(
            "parameters before ORDER BY: {}\n",
            statement.parameters_index
        ));
        out.push_str("rewrite tokens:\n");
        for token in &statement.tokens {
            match token {
                RewriteToken::TableName(table) => {
                    out.push_str(&format!(
                        "  @{:<5} table  {}\n",
                        table.offset, table.original_text
                    ));
                }
                RewriteToken::ProjectionInsert(insert) => {
                    out.push_str(&format!(
                        "  @{:<5} insert {}\n",
                        insert.offset,
                        insert.items.join(", ")
                    ));
                }
            }
        }
        if let Some(rewritten) = self.rewritten {
            out.push_str(&format!("rewritten: {rewritten}\n"));
        }
        out
    }
}

fn limit_value(value: Option<LimitValue>) -> String {
    match value {
        Some(LimitValue::Literal(n)) => n.to_string(),
        Some(LimitValue::Parameter(index)) => format!("?{index}"),
        None => String::from("-"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shard_sql_core::parse_select;

    #[test]
    fn test_text_report() {
        let statement = parse_select("SELECT AVG(price) FROM t_order ORDER BY user_id").unwrap();
        let report = Report {
            dialect: "generic",
            statement: &statement,
            rewritten: None,
        };
        let text = report.to_text();
        assert!(text.contains("aggregation AVG(price)"));
        assert!(text.contains("derived   COUNT(price) AS AVG_DERIVED_COUNT_0"));
        assert!(text.contains("order by: user_id ASC (alias ORDER_BY_DERIVED_0)"));
        assert!(text.contains("table  t_order"));
    }

    #[test]
    fn test_text_report_with_rewrite() {
        let statement = parse_select("SELECT id FROM t_order o").unwrap();
        let report = Report {
            dialect: "generic",
            statement: &statement,
            rewritten: Some("SELECT id FROM t_order_3 o"),
        };
        let text = report.to_text();
        assert!(text.contains("  t_order AS o\n"));
        assert!(text.contains("parameters before ORDER BY: 0\n"));
        assert!(text.ends_with("rewritten: SELECT id FROM t_order_3 o\n"));
    }

    #[test]
    fn test_json_report() {
        let statement = parse_select("SELECT * FROM t_order").unwrap();
        let report = Report {
            dialect: "generic",
            statement: &statement,
            rewritten: Some("SELECT * FROM t_order_1"),
        };
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["statement"]["contains_star"], true);
        assert_eq!(value["statement"]["tokens"][0]["type"], "table_name");
        assert_eq!(value["rewritten"], "SELECT * FROM t_order_1");
    }
}
