//! Binding powers for the expression sub-parser.

use crate::lexer::{Keyword, TokenKind};

/// Left binding power shared by comparisons and `IS`/`IN`/`BETWEEN`/`LIKE`.
pub const COMPARISON_BP: u8 = 7;

/// Right binding power of a unary operator.
#[must_use]
pub const fn prefix_binding_power(kind: &TokenKind) -> Option<u8> {
    match kind {
        TokenKind::Minus | TokenKind::Plus | TokenKind::BitNot => Some(19),
        TokenKind::Keyword(Keyword::Not) => Some(5),
        _ => None,
    }
}

/// `(left, right)` binding powers of a binary operator; every level is
/// left associative.
///
/// `NOT` is listed because it introduces `NOT IN`, `NOT LIKE` and
/// `NOT BETWEEN`; the parser checks the following keyword.
#[must_use]
pub const fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        TokenKind::Keyword(Keyword::Or) => Some((1, 2)),

        TokenKind::Keyword(Keyword::And) => Some((3, 4)),

        TokenKind::Eq
        | TokenKind::NotEq
        | TokenKind::Lt
        | TokenKind::LtEq
        | TokenKind::Gt
        | TokenKind::GtEq
        | TokenKind::Keyword(
            Keyword::Is | Keyword::In | Keyword::Between | Keyword::Like | Keyword::Not,
        ) => Some((COMPARISON_BP, COMPARISON_BP + 1)),

        TokenKind::BitOr => Some((9, 10)),

        TokenKind::BitAnd => Some((11, 12)),

        TokenKind::LeftShift | TokenKind::RightShift => Some((13, 14)),

        TokenKind::Plus | TokenKind::Minus | TokenKind::Concat => Some((15, 16)),

        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some((17, 18)),

        _ => None,
    }
}

#[must_use]
pub const fn postfix_binding_power(kind: &TokenKind) -> Option<u8> {
    match kind {
        // PostgreSQL cast, `x::text`
        TokenKind::DoubleColon => Some(21),
        _ => None,
    }
}
