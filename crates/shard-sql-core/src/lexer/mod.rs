//! SQL Lexer/Tokenizer
//!
//! A hand-written lexer that turns SQL text into tokens carrying their exact
//! byte spans, so later stages can anchor rewrites to the original text.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
