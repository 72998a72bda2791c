//! Parser error types.

use crate::lexer::{Span, TokenKind};

/// Errors raised while analyzing a SELECT statement.
///
/// Every variant is fatal to the parse that raised it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// The lexer could not produce a token.
    #[error("Lexical error: {message} at position {}..{}", .span.start, .span.end)]
    Lexical {
        /// What the lexer rejected.
        message: String,
        /// Where it happened.
        span: Span,
    },

    /// A mandatory token was missing.
    #[error("Unexpected token: expected {expected}, found {found:?} at position {}..{}", .span.start, .span.end)]
    Unexpected {
        /// What the parser required.
        expected: String,
        /// The token actually found.
        found: TokenKind,
        /// Location of the offending token.
        span: Span,
    },

    /// A construct the sharding layer cannot route, such as a set operation.
    #[error("Unsupported construct: {construct} at position {}..{}", .span.start, .span.end)]
    Unsupported {
        /// The construct, usually the keyword that introduced it.
        construct: String,
        /// Location of that keyword.
        span: Span,
    },

    /// A subquery appeared where a table or expression was expected.
    #[error("Cannot support subquery at position {}..{}", .span.start, .span.end)]
    SubqueryUnsupported {
        /// Location of the opening parenthesis or `EXISTS`.
        span: Span,
    },
}

impl ParseError {
    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: TokenKind, span: Span) -> Self {
        Self::Unexpected {
            expected: expected.into(),
            found,
            span,
        }
    }

    /// Creates an "unsupported construct" error.
    #[must_use]
    pub fn unsupported(construct: impl Into<String>, span: Span) -> Self {
        Self::Unsupported {
            construct: construct.into(),
            span,
        }
    }

    /// Returns the location the error points at.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Lexical { span, .. }
            | Self::Unexpected { span, .. }
            | Self::Unsupported { span, .. }
            | Self::SubqueryUnsupported { span } => *span,
        }
    }
}

/// Result type for parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Keyword;

    #[test]
    fn test_display() {
        let err = ParseError::unexpected("BY", TokenKind::Eof, Span::new(14, 14));
        assert_eq!(
            err.to_string(),
            "Unexpected token: expected BY, found Eof at position 14..14"
        );

        let err = ParseError::unsupported(Keyword::Union.as_str(), Span::new(20, 25));
        assert_eq!(
            err.to_string(),
            "Unsupported construct: UNION at position 20..25"
        );
    }

    #[test]
    fn test_span() {
        let err = ParseError::SubqueryUnsupported {
            span: Span::new(14, 15),
        };
        assert_eq!(err.span(), Span::new(14, 15));
    }
}
