//! Row-limit operands shared by the dialects' trailing-clause hooks.

use crate::ast::LimitValue;
use crate::lexer::TokenKind;
use crate::parser::{Result, TokenCursor};

/// Parses a LIMIT or OFFSET operand: an integer literal or `?`.
///
/// # Errors
///
/// Fails on anything else.
pub fn parse_limit_value(cursor: &mut TokenCursor<'_>) -> Result<LimitValue> {
    match *cursor.kind() {
        TokenKind::Integer(value) => {
            cursor.advance();
            Ok(LimitValue::Literal(value))
        }
        TokenKind::Question => Ok(LimitValue::Parameter(cursor.next_parameter()?)),
        _ => Err(cursor.unexpected("row count")),
    }
}
