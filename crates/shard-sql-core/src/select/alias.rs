//! Correlates ORDER BY and GROUP BY names with projection items.

use crate::ast::SelectStatement;
use crate::util::exact_value;

/// Returns the alias under which `name` is already projected.
///
/// Items are scanned in order and the first match wins:
/// - an item whose expression is `name` yields that item's alias, which may
///   be `None` when the value is projected without one;
/// - an item aliased `name` yields `name` itself.
///
/// Always `None` once the statement projects `*`.
#[must_use]
pub fn resolve_alias(statement: &SelectStatement, name: &str) -> Option<String> {
    if statement.contains_star {
        return None;
    }
    let name = exact_value(name);
    for item in &statement.items {
        if exact_value(&item.expression()).eq_ignore_ascii_case(&name) {
            return item.alias().map(str::to_owned);
        }
        if item
            .alias()
            .is_some_and(|alias| alias.eq_ignore_ascii_case(&name))
        {
            return Some(name);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{PlainItem, SelectItem, StarItem};

    fn statement(items: &[(&str, Option<&str>)]) -> SelectStatement {
        let mut statement = SelectStatement::new();
        statement.items = items
            .iter()
            .map(|(expression, alias)| {
                SelectItem::Plain(PlainItem {
                    expression: (*expression).to_owned(),
                    alias: alias.map(str::to_owned),
                })
            })
            .collect();
        statement
    }

    #[test]
    fn test_expression_match_returns_item_alias() {
        let statement = statement(&[("id", None), ("o.name", Some("n"))]);
        assert_eq!(resolve_alias(&statement, "O.NAME").as_deref(), Some("n"));
        assert_eq!(resolve_alias(&statement, "id"), None);
    }

    #[test]
    fn test_alias_match_returns_name() {
        let statement = statement(&[("price * qty", Some("Total"))]);
        assert_eq!(resolve_alias(&statement, "`total`").as_deref(), Some("total"));
    }

    #[test]
    fn test_first_match_wins() {
        let statement = statement(&[("status", None), ("x", Some("status"))]);
        assert_eq!(resolve_alias(&statement, "status"), None);
    }

    #[test]
    fn test_star_disables_resolution() {
        let mut statement = statement(&[("name", Some("n"))]);
        statement.items.push(SelectItem::Star(StarItem::default()));
        statement.contains_star = true;
        assert_eq!(resolve_alias(&statement, "name"), None);
    }
}
