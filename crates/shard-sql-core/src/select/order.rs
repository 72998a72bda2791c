//! GROUP BY, HAVING and ORDER BY.

use tracing::warn;

use super::alias::resolve_alias;
use super::parse_tracked_expression;
use crate::ast::{Expr, GroupKey, OrderDirection, OrderKey, SelectStatement};
use crate::dialect::Dialect;
use crate::lexer::{Keyword, Span, TokenKind};
use crate::parser::{Result, TokenCursor};

fn parse_direction(cursor: &mut TokenCursor<'_>) -> OrderDirection {
    if cursor.skip_if_keyword(Keyword::Desc) {
        OrderDirection::Desc
    } else {
        cursor.skip_if_keyword(Keyword::Asc);
        OrderDirection::Asc
    }
}

/// Parses `ORDER BY item [, item]*` through the dialect's item hook.
pub(super) fn parse_order_by<D: Dialect>(
    cursor: &mut TokenCursor<'_>,
    statement: &mut SelectStatement,
    dialect: &D,
) -> Result<()> {
    if !cursor.skip_if_keyword(Keyword::Order) {
        return Ok(());
    }
    cursor.expect_keyword(Keyword::By)?;
    loop {
        if let Some(key) = dialect.parse_order_by_item(cursor, statement)? {
            statement.order_by.push(key);
        }
        if !cursor.skip_if(&TokenKind::Comma) {
            return Ok(());
        }
    }
}

/// Parses one ORDER BY item and classifies it.
///
/// Positional references, columns and qualified columns become keys.
/// Any other expression is dropped with a warning.
///
/// # Errors
///
/// Propagates expression parsing failures.
pub fn parse_order_by_item(
    cursor: &mut TokenCursor<'_>,
    statement: &mut SelectStatement,
) -> Result<Option<OrderKey>> {
    let start = cursor.start();
    let expr = parse_tracked_expression(cursor, statement)?;
    let end = cursor.previous().end;
    let direction = parse_direction(cursor);
    let key = match expr {
        Expr::Number { value } => match usize::try_from(value) {
            Ok(index) if index > 0 => Some(OrderKey::position(index, direction)),
            _ => None,
        },
        Expr::Identifier { ident } => {
            let alias = resolve_alias(statement, &ident.value);
            Some(OrderKey::column(None, ident.value, direction, alias))
        }
        Expr::Property { owner, name } => {
            let alias = resolve_alias(statement, &format!("{}.{}", owner.value, name.value));
            Some(OrderKey::column(Some(owner.value), name.value, direction, alias))
        }
        Expr::Other { .. } => None,
    };
    if key.is_none() {
        warn!(
            item = cursor.source(Span::new(start, end)),
            "ORDER BY item is not a column or position; dropped"
        );
    }
    Ok(key)
}

/// Parses `GROUP BY ... [WITH ROLLUP] [HAVING ...]` or a lone `HAVING`.
pub(super) fn parse_group_by(
    cursor: &mut TokenCursor<'_>,
    statement: &mut SelectStatement,
) -> Result<()> {
    if cursor.skip_if_keyword(Keyword::Group) {
        cursor.expect_keyword(Keyword::By)?;
        loop {
            let start = cursor.start();
            let expr = parse_tracked_expression(cursor, statement)?;
            let end = cursor.previous().end;
            let direction = parse_direction(cursor);
            match expr {
                Expr::Property { owner, name } => {
                    let alias =
                        resolve_alias(statement, &format!("{}.{}", owner.value, name.value));
                    statement.group_by.push(GroupKey {
                        owner: Some(owner.value),
                        name: name.value,
                        direction,
                        alias,
                    });
                }
                Expr::Identifier { ident } => {
                    let alias = resolve_alias(statement, &ident.value);
                    statement.group_by.push(GroupKey {
                        owner: None,
                        name: ident.value,
                        direction,
                        alias,
                    });
                }
                Expr::Number { .. } | Expr::Other { .. } => warn!(
                    item = cursor.source(Span::new(start, end)),
                    "GROUP BY item is not a column; ignored"
                ),
            }
            if !cursor.skip_if(&TokenKind::Comma) {
                break;
            }
        }
        while cursor.skip_if_any_keyword(&[Keyword::With, Keyword::Rollup]) {}
    }
    if cursor.skip_if_keyword(Keyword::Having) {
        parse_tracked_expression(cursor, statement)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{PlainItem, SelectItem, Table};
    use crate::dialect::GenericDialect;

    fn statement_with(items: &[(&str, Option<&str>)]) -> SelectStatement {
        let mut statement = SelectStatement::new();
        statement.tables.push(Table::new("t_order", None));
        for (expression, alias) in items {
            statement.items.push(SelectItem::Plain(PlainItem {
                expression: (*expression).to_owned(),
                alias: alias.map(str::to_owned),
            }));
        }
        statement
    }

    fn order_by(sql: &str, statement: &mut SelectStatement) {
        let mut cursor = TokenCursor::new(sql).unwrap();
        parse_order_by(&mut cursor, statement, &GenericDialect::new()).unwrap();
        assert!(cursor.is_eof(), "{sql}");
    }

    #[test]
    fn test_order_by_classification() {
        let mut statement = statement_with(&[("name", Some("n"))]);
        order_by("ORDER BY 2 DESC, name, o.status ASC, price * 2", &mut statement);
        assert_eq!(
            statement.order_by,
            vec![
                OrderKey::position(2, OrderDirection::Desc),
                OrderKey::column(None, "name", OrderDirection::Asc, Some(String::from("n"))),
                OrderKey::column(
                    Some(String::from("o")),
                    "status",
                    OrderDirection::Asc,
                    None
                ),
            ]
        );
    }

    #[test]
    fn test_order_by_position_zero_is_dropped() {
        let mut statement = statement_with(&[]);
        order_by("ORDER BY 0", &mut statement);
        assert!(statement.order_by.is_empty());
    }

    #[test]
    fn test_order_by_table_qualifier_token() {
        let mut statement = statement_with(&[]);
        order_by("ORDER BY t_order.id", &mut statement);
        assert_eq!(statement.tokens.len(), 1);
        assert_eq!(statement.tokens[0].offset(), 9);
    }

    #[test]
    fn test_order_requires_by() {
        let mut cursor = TokenCursor::new("ORDER name").unwrap();
        let mut statement = statement_with(&[]);
        assert!(parse_order_by(&mut cursor, &mut statement, &GenericDialect::new()).is_err());
    }

    #[test]
    fn test_group_by_with_rollup_and_having() {
        let mut statement = statement_with(&[("o.user_id", Some("uid"))]);
        let mut cursor =
            TokenCursor::new("GROUP BY o.user_id DESC, status, 1 WITH ROLLUP HAVING COUNT(*) > ?")
                .unwrap();
        parse_group_by(&mut cursor, &mut statement).unwrap();
        assert!(cursor.is_eof());
        assert_eq!(cursor.parameters_index(), 1);
        assert_eq!(
            statement.group_by,
            vec![
                GroupKey {
                    owner: Some(String::from("o")),
                    name: String::from("user_id"),
                    direction: OrderDirection::Desc,
                    alias: Some(String::from("uid")),
                },
                GroupKey {
                    owner: None,
                    name: String::from("status"),
                    direction: OrderDirection::Asc,
                    alias: None,
                },
            ]
        );
    }

    #[test]
    fn test_having_without_group_by() {
        let mut statement = statement_with(&[]);
        let mut cursor = TokenCursor::new("HAVING SUM(price) > 10").unwrap();
        parse_group_by(&mut cursor, &mut statement).unwrap();
        assert!(cursor.is_eof());
        assert!(statement.group_by.is_empty());
    }
}
