//! Projection list parsing.

use tracing::trace;

use crate::ast::{AggregationItem, AggregationKind, PlainItem, SelectItem, SelectStatement, StarItem};
use crate::dialect::Dialect;
use crate::lexer::{Keyword, Span, TokenKind};
use crate::parser::{ParseError, Result, TokenCursor};
use crate::rewrite::RewriteToken;
use crate::util::exact_value;

/// Keywords that end a projection item at parenthesis depth 0.
const ITEM_TERMINATORS: &[Keyword] = &[
    Keyword::As,
    Keyword::From,
    Keyword::Where,
    Keyword::Group,
    Keyword::Having,
    Keyword::Order,
    Keyword::Limit,
    Keyword::Union,
    Keyword::Except,
    Keyword::Intersect,
    Keyword::Minus,
    Keyword::For,
    Keyword::Lock,
];

/// Keywords that may open a plain projection item.
const ITEM_START_KEYWORDS: &[Keyword] = &[
    Keyword::Case,
    Keyword::Not,
    Keyword::Null,
    Keyword::True,
    Keyword::False,
    Keyword::Exists,
    Keyword::Left,
    Keyword::Right,
    Keyword::Count,
    Keyword::Sum,
    Keyword::Avg,
    Keyword::Min,
    Keyword::Max,
];

/// Parses the comma-separated projection list and records where it ends.
pub(super) fn parse_select_list<D: Dialect>(
    cursor: &mut TokenCursor<'_>,
    statement: &mut SelectStatement,
    dialect: &D,
) -> Result<()> {
    let mut index = 1;
    loop {
        let item = parse_select_item(cursor, statement, dialect, index)?;
        if item.is_star() {
            statement.contains_star = true;
        }
        trace!(index, ?item, "parsed projection item");
        statement.items.push(item);
        index += 1;
        if !cursor.skip_if(&TokenKind::Comma) {
            break;
        }
    }
    statement.select_list_last_position = cursor.start();
    Ok(())
}

fn parse_select_item<D: Dialect>(
    cursor: &mut TokenCursor<'_>,
    statement: &mut SelectStatement,
    dialect: &D,
    index: usize,
) -> Result<SelectItem> {
    if let Some(prefix) = dialect.select_item_prefix() {
        if cursor.literal().eq_ignore_ascii_case(prefix) {
            cursor.advance();
        }
    }

    if cursor.check(&TokenKind::Star) || exact_value(cursor.literal()) == "*" {
        cursor.advance();
        return Ok(SelectItem::Star(StarItem {
            alias: cursor.parse_alias(),
        }));
    }

    let start = cursor.start();
    let aggregation = cursor
        .current()
        .as_keyword()
        .and_then(AggregationKind::from_keyword)
        .filter(|_| matches!(cursor.peek(1).kind, TokenKind::LeftParen));
    if let Some(kind) = aggregation {
        cursor.advance();
        let inner_expression = cursor.skip_parentheses()?;
        // `COUNT(x) + 1` is not an aggregation the merger can combine.
        if ends_item(cursor) {
            return Ok(SelectItem::Aggregation(AggregationItem::new(
                kind,
                inner_expression,
                cursor.parse_alias(),
                index,
            )));
        }
        return parse_plain_item(cursor, statement, start, true);
    }

    match cursor.kind() {
        TokenKind::Keyword(kw) if !kw.is_non_reserved() && !ITEM_START_KEYWORDS.contains(kw) => {
            Err(cursor.unexpected("projection item"))
        }
        TokenKind::Comma | TokenKind::Semicolon | TokenKind::Eof | TokenKind::RightParen => {
            Err(cursor.unexpected("projection item"))
        }
        _ => parse_plain_item(cursor, statement, start, false),
    }
}

/// Returns true if nothing but an alias can follow in this item.
fn ends_item(cursor: &TokenCursor<'_>) -> bool {
    is_terminator(cursor)
        || matches!(cursor.kind(), TokenKind::Identifier(_) | TokenKind::String(_))
}

fn is_terminator(cursor: &TokenCursor<'_>) -> bool {
    matches!(
        cursor.kind(),
        TokenKind::Comma | TokenKind::Semicolon | TokenKind::Eof
    ) || cursor.check_any_keyword(ITEM_TERMINATORS)
}

/// Returns true for tokens after which a bare identifier reads as an alias.
const fn ends_value(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Integer(_)
            | TokenKind::Float(_)
            | TokenKind::String(_)
            | TokenKind::Blob(_)
            | TokenKind::Identifier(_)
            | TokenKind::RightParen
            | TokenKind::Keyword(Keyword::End | Keyword::Null | Keyword::True | Keyword::False)
    ) || matches!(kind, TokenKind::Keyword(kw) if kw.is_non_reserved())
}

/// Consumes a free-form item up to a depth-0 terminator.
///
/// `after_value` tells whether the tokens already consumed since `start`
/// ended with a value, as after an aggregate call.
fn parse_plain_item(
    cursor: &mut TokenCursor<'_>,
    statement: &mut SelectStatement,
    start: usize,
    after_value: bool,
) -> Result<SelectItem> {
    let mut depth = 0_usize;
    let mut end = cursor.previous().end.max(start);
    let mut previous_is_value = after_value;
    let mut bare_alias: Option<(Span, usize)> = None;

    while depth > 0 || !is_terminator(cursor) {
        let token = cursor.current().clone();
        match &token.kind {
            TokenKind::LeftParen => {
                if cursor.peek(1).as_keyword() == Some(Keyword::Select) {
                    return Err(ParseError::SubqueryUnsupported { span: token.span });
                }
                depth += 1;
            }
            TokenKind::RightParen => {
                if depth == 0 {
                    return Err(cursor.unexpected("projection item"));
                }
                depth -= 1;
            }
            TokenKind::Keyword(Keyword::Exists) => {
                return Err(ParseError::SubqueryUnsupported { span: token.span });
            }
            TokenKind::Eof => return Err(cursor.unexpected(")")),
            _ => {}
        }

        if depth == 0 {
            bare_alias = match token.kind {
                TokenKind::Identifier(_) | TokenKind::String(_) if previous_is_value => {
                    Some((token.span, end))
                }
                _ => None,
            };
            previous_is_value = ends_value(&token.kind);
        }

        if matches!(token.kind, TokenKind::Question) {
            cursor.next_parameter()?;
        } else {
            cursor.advance();
        }
        if matches!(token.kind, TokenKind::Identifier(_)) && cursor.check(&TokenKind::Dot) {
            statement.push_token(RewriteToken::table_name(
                token.span.start,
                cursor.source(token.span),
            ));
        }
        end = token.span.end;
    }

    let (alias, end) = match bare_alias {
        Some((span, expression_end)) => (Some(exact_value(cursor.source(span))), expression_end),
        None => (cursor.parse_alias(), end),
    };
    if end <= start {
        return Err(cursor.unexpected("projection item"));
    }
    Ok(SelectItem::Plain(PlainItem {
        expression: exact_value(cursor.source(Span::new(start, end))),
        alias,
    }))
}
