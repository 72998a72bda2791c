//! Expression shapes returned by the expression sub-parser.

use serde::Serialize;

use crate::lexer::Span;

/// A name as it appeared in the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ident {
    /// The name with quoting removed.
    pub value: String,
    /// Where the name, quotes included, sits in the original text.
    pub span: Span,
}

impl Ident {
    /// Creates a new identifier.
    #[must_use]
    pub fn new(value: impl Into<String>, span: Span) -> Self {
        Self {
            value: value.into(),
            span,
        }
    }
}

/// The top-level shape of a parsed expression.
///
/// Only the shapes the SELECT analyzer reasons about are distinguished;
/// everything else collapses into [`Expr::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expr {
    /// An integer literal, e.g. the `2` of `ORDER BY 2`.
    Number {
        /// The literal value.
        value: i64,
    },
    /// A bare column or alias name.
    Identifier {
        /// The name.
        ident: Ident,
    },
    /// A qualified column reference, `owner.name`.
    Property {
        /// The qualifier (table name or table alias).
        owner: Ident,
        /// The column name.
        name: Ident,
    },
    /// Any other expression, kept only as its source span.
    Other {
        /// Where the expression sits in the original text.
        span: Span,
    },
}

impl Expr {
    /// Creates a number expression.
    #[must_use]
    pub const fn number(value: i64) -> Self {
        Self::Number { value }
    }

    /// Creates an identifier expression.
    #[must_use]
    pub const fn identifier(ident: Ident) -> Self {
        Self::Identifier { ident }
    }

    /// Creates a qualified property expression.
    #[must_use]
    pub const fn property(owner: Ident, name: Ident) -> Self {
        Self::Property { owner, name }
    }

    /// Creates an opaque expression.
    #[must_use]
    pub const fn other(span: Span) -> Self {
        Self::Other { span }
    }
}
