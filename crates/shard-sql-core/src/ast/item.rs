//! Projection list items.

use serde::Serialize;

use crate::lexer::Keyword;

/// Aggregation functions the merge layer knows how to combine across shards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AggregationKind {
    /// `COUNT(...)`
    Count,
    /// `SUM(...)`
    Sum,
    /// `MIN(...)`
    Min,
    /// `MAX(...)`
    Max,
    /// `AVG(...)`, which is split into a COUNT and a SUM.
    Avg,
}

impl AggregationKind {
    /// Maps an aggregate keyword to its kind.
    #[must_use]
    pub const fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Count => Some(Self::Count),
            Keyword::Sum => Some(Self::Sum),
            Keyword::Min => Some(Self::Min),
            Keyword::Max => Some(Self::Max),
            Keyword::Avg => Some(Self::Avg),
            _ => None,
        }
    }

    /// Returns the SQL function name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Min => "MIN",
            Self::Max => "MAX",
            Self::Avg => "AVG",
        }
    }
}

/// A `*` projection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StarItem {
    /// Alias, when the dialect allows one.
    pub alias: Option<String>,
}

/// An aggregate projection such as `AVG(score) AS s`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregationItem {
    /// The aggregate function.
    pub kind: AggregationKind,
    /// The parenthesized argument exactly as written, e.g. `(score)`.
    pub inner_expression: String,
    /// Alias, if any.
    pub alias: Option<String>,
    /// 1-based position in the projection list; `None` for derived items.
    pub index: Option<usize>,
    /// COUNT and SUM items injected for an AVG.
    pub derived: Vec<AggregationItem>,
}

impl AggregationItem {
    /// Creates an aggregation item found at `index` in the projection list.
    #[must_use]
    pub fn new(
        kind: AggregationKind,
        inner_expression: impl Into<String>,
        alias: Option<String>,
        index: usize,
    ) -> Self {
        Self {
            kind,
            inner_expression: inner_expression.into(),
            alias,
            index: Some(index),
            derived: Vec::new(),
        }
    }

    /// Creates an aggregation item that exists only in rewritten SQL.
    #[must_use]
    pub fn derived(
        kind: AggregationKind,
        inner_expression: impl Into<String>,
        alias: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            inner_expression: inner_expression.into(),
            alias: Some(alias.into()),
            index: None,
            derived: Vec::new(),
        }
    }

    /// Returns the full call, e.g. `COUNT(score)`.
    #[must_use]
    pub fn expression(&self) -> String {
        format!("{}{}", self.kind.as_str(), self.inner_expression)
    }
}

/// Any other projection, kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlainItem {
    /// The expression text with quoting removed.
    pub expression: String,
    /// Alias, if any.
    pub alias: Option<String>,
}

/// One entry of the projection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectItem {
    /// `*`
    Star(StarItem),
    /// An aggregate function call.
    Aggregation(AggregationItem),
    /// Anything else.
    Plain(PlainItem),
}

impl SelectItem {
    /// Returns the projected expression as text.
    #[must_use]
    pub fn expression(&self) -> String {
        match self {
            Self::Star(_) => String::from("*"),
            Self::Aggregation(item) => item.expression(),
            Self::Plain(item) => item.expression.clone(),
        }
    }

    /// Returns the alias, if any.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        match self {
            Self::Star(item) => item.alias.as_deref(),
            Self::Aggregation(item) => item.alias.as_deref(),
            Self::Plain(item) => item.alias.as_deref(),
        }
    }

    /// Returns the aggregation item, if this is one.
    #[must_use]
    pub const fn as_aggregation(&self) -> Option<&AggregationItem> {
        match self {
            Self::Aggregation(item) => Some(item),
            _ => None,
        }
    }

    /// Returns true for a `*` projection.
    #[must_use]
    pub const fn is_star(&self) -> bool {
        matches!(self, Self::Star(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregation_expression() {
        let item = AggregationItem::new(AggregationKind::Avg, "(score)", None, 3);
        assert_eq!(item.expression(), "AVG(score)");
        assert_eq!(item.index, Some(3));
    }

    #[test]
    fn test_derived_has_no_index() {
        let item = AggregationItem::derived(AggregationKind::Sum, "(x)", "AVG_DERIVED_SUM_0");
        assert_eq!(item.index, None);
        assert_eq!(item.alias.as_deref(), Some("AVG_DERIVED_SUM_0"));
    }

    #[test]
    fn test_select_item_accessors() {
        let star = SelectItem::Star(StarItem::default());
        assert_eq!(star.expression(), "*");
        assert!(star.is_star());

        let plain = SelectItem::Plain(PlainItem {
            expression: String::from("o.user_id"),
            alias: Some(String::from("uid")),
        });
        assert_eq!(plain.expression(), "o.user_id");
        assert_eq!(plain.alias(), Some("uid"));
        assert!(plain.as_aggregation().is_none());
    }

    #[test]
    fn test_kind_from_keyword() {
        assert_eq!(
            AggregationKind::from_keyword(Keyword::Max),
            Some(AggregationKind::Max)
        );
        assert_eq!(AggregationKind::from_keyword(Keyword::Select), None);
    }
}
