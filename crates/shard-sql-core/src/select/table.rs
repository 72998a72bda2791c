//! FROM clause: table factors and join chains.

use tracing::warn;

use crate::ast::{Expr, SelectStatement, Table};
use crate::lexer::{Keyword, TokenKind};
use crate::parser::{ExpressionParser, ParseError, Result, TokenCursor};
use crate::rewrite::RewriteToken;
use crate::util::exact_value;

/// Parses a table reference followed by any number of joins.
pub(super) fn parse_table(
    cursor: &mut TokenCursor<'_>,
    statement: &mut SelectStatement,
) -> Result<()> {
    parse_table_factor(cursor, statement)?;
    while cursor.skip_join()? {
        parse_table_factor(cursor, statement)?;
        if cursor.skip_if_keyword(Keyword::On) {
            loop {
                parse_table_condition(cursor, statement)?;
                cursor.expect(&TokenKind::Eq)?;
                parse_table_condition(cursor, statement)?;
                if !cursor.skip_if_keyword(Keyword::And) {
                    break;
                }
            }
        } else if cursor.skip_if_keyword(Keyword::Using) {
            cursor.skip_parentheses()?;
        }
    }
    Ok(())
}

fn parse_table_factor(
    cursor: &mut TokenCursor<'_>,
    statement: &mut SelectStatement,
) -> Result<()> {
    let token = cursor.current().clone();
    match token.kind {
        TokenKind::LeftParen => {
            return Err(ParseError::SubqueryUnsupported { span: token.span });
        }
        TokenKind::Identifier(_) => {}
        _ => return Err(cursor.unexpected("table name")),
    }
    let literal = cursor.literal();
    cursor.advance();

    if cursor.skip_if(&TokenKind::Dot) {
        let table = cursor.literal();
        cursor.advance();
        cursor.parse_alias();
        warn!(schema = literal, table, "schema-qualified table is not routed");
        return Ok(());
    }

    statement.push_token(RewriteToken::table_name(token.span.start, literal));
    let table = Table::new(exact_value(literal), cursor.parse_alias());
    statement.tables.push(table);
    Ok(())
}

/// Parses one side of an `ON a = b` pair.
///
/// A qualified side whose owner names a registered table gets a rewrite
/// token at the owner.
fn parse_table_condition(
    cursor: &mut TokenCursor<'_>,
    statement: &mut SelectStatement,
) -> Result<()> {
    let expr = ExpressionParser::new(cursor).parse_operand()?;
    if let Expr::Property { owner, .. } = expr {
        if statement.find_table(&owner.value).is_some() {
            statement.push_token(RewriteToken::table_name(
                owner.span.start,
                cursor.source(owner.span),
            ));
        }
    }
    Ok(())
}
