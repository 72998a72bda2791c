//! Position-anchored rewrite instructions.

use serde::Serialize;

/// Marks a table name occurrence that a shard router may replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableNameToken {
    /// Byte offset of the name in the original SQL.
    pub offset: usize,
    /// The name exactly as written, quotes included.
    pub original_text: String,
}

impl TableNameToken {
    /// Returns the byte offset just past the name.
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.original_text.len()
    }
}

/// Projection text to insert verbatim at a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectionInsertToken {
    /// Byte offset in the original SQL where the text goes.
    pub offset: usize,
    /// Fragments such as `name AS ORDER_BY_DERIVED_0`, in insertion order.
    pub items: Vec<String>,
}

impl ProjectionInsertToken {
    /// Creates an empty insert token.
    #[must_use]
    pub const fn new(offset: usize) -> Self {
        Self {
            offset,
            items: Vec::new(),
        }
    }

    /// Renders the text to insert: `, a AS x, b AS y `.
    #[must_use]
    pub fn render(&self) -> String {
        let mut text = String::new();
        for item in &self.items {
            text.push_str(", ");
            text.push_str(item);
        }
        text.push(' ');
        text
    }
}

/// One edit against the original query text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RewriteToken {
    /// Replace a table name.
    TableName(TableNameToken),
    /// Insert derived projection columns.
    ProjectionInsert(ProjectionInsertToken),
}

impl RewriteToken {
    /// Creates a table-name token.
    #[must_use]
    pub fn table_name(offset: usize, original_text: impl Into<String>) -> Self {
        Self::TableName(TableNameToken {
            offset,
            original_text: original_text.into(),
        })
    }

    /// Returns the anchor offset.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::TableName(token) => token.offset,
            Self::ProjectionInsert(token) => token.offset,
        }
    }
}
