//! Parsing primitives: the token cursor, the expression sub-parser and the
//! error type shared by every clause parser.

mod cursor;
mod error;
mod expression;
mod pratt;

pub use cursor::TokenCursor;
pub use error::{ParseError, Result};
pub use expression::ExpressionParser;
