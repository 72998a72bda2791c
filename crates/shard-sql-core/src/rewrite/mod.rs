//! Rewrite tokens and the engine that applies them.
//!
//! The analyzer never re-serializes an AST. It records where the original
//! text must change; a router then rewrites a copy of the text per shard.

mod rewriter;
mod token;

pub use rewriter::{SqlRewriter, TableMap};
pub use token::{ProjectionInsertToken, RewriteToken, TableNameToken};
