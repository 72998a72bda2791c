//! Token types for the SQL lexer.

use super::Span;

/// SQL keywords recognized by the SELECT analyzer and its dialects.
///
/// The set is kept small on purpose: everything else, including words that
/// other databases reserve, lexes as an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    // Query clauses
    Select,
    From,
    Where,
    Group,
    By,
    Having,
    Order,
    Asc,
    Desc,
    Distinct,
    Distinctrow,
    All,
    As,
    With,
    Rollup,
    Limit,
    Offset,
    Row,
    Rows,

    // Locking reads
    For,
    Lock,

    // Joins
    Join,
    Inner,
    Left,
    Right,
    Full,
    Outer,
    Cross,
    Natural,
    StraightJoin,
    On,
    Using,

    // Set operations
    Union,
    Except,
    Intersect,
    Minus,

    // Predicates
    And,
    Or,
    Not,
    In,
    Between,
    Like,
    Is,
    Null,
    True,
    False,
    Exists,

    // Conditional expressions
    Case,
    When,
    Then,
    Else,
    End,

    // Aggregates
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

/// Spellings of every keyword, in declaration order.
const KEYWORDS: &[(&str, Keyword)] = &[
    ("SELECT", Keyword::Select),
    ("FROM", Keyword::From),
    ("WHERE", Keyword::Where),
    ("GROUP", Keyword::Group),
    ("BY", Keyword::By),
    ("HAVING", Keyword::Having),
    ("ORDER", Keyword::Order),
    ("ASC", Keyword::Asc),
    ("DESC", Keyword::Desc),
    ("DISTINCT", Keyword::Distinct),
    ("DISTINCTROW", Keyword::Distinctrow),
    ("ALL", Keyword::All),
    ("AS", Keyword::As),
    ("WITH", Keyword::With),
    ("ROLLUP", Keyword::Rollup),
    ("LIMIT", Keyword::Limit),
    ("OFFSET", Keyword::Offset),
    ("ROW", Keyword::Row),
    ("ROWS", Keyword::Rows),
    ("FOR", Keyword::For),
    ("LOCK", Keyword::Lock),
    ("JOIN", Keyword::Join),
    ("INNER", Keyword::Inner),
    ("LEFT", Keyword::Left),
    ("RIGHT", Keyword::Right),
    ("FULL", Keyword::Full),
    ("OUTER", Keyword::Outer),
    ("CROSS", Keyword::Cross),
    ("NATURAL", Keyword::Natural),
    ("STRAIGHT_JOIN", Keyword::StraightJoin),
    ("ON", Keyword::On),
    ("USING", Keyword::Using),
    ("UNION", Keyword::Union),
    ("EXCEPT", Keyword::Except),
    ("INTERSECT", Keyword::Intersect),
    ("MINUS", Keyword::Minus),
    ("AND", Keyword::And),
    ("OR", Keyword::Or),
    ("NOT", Keyword::Not),
    ("IN", Keyword::In),
    ("BETWEEN", Keyword::Between),
    ("LIKE", Keyword::Like),
    ("IS", Keyword::Is),
    ("NULL", Keyword::Null),
    ("TRUE", Keyword::True),
    ("FALSE", Keyword::False),
    ("EXISTS", Keyword::Exists),
    ("CASE", Keyword::Case),
    ("WHEN", Keyword::When),
    ("THEN", Keyword::Then),
    ("ELSE", Keyword::Else),
    ("END", Keyword::End),
    ("COUNT", Keyword::Count),
    ("SUM", Keyword::Sum),
    ("AVG", Keyword::Avg),
    ("MIN", Keyword::Min),
    ("MAX", Keyword::Max),
];

impl Keyword {
    /// Looks up a word, ignoring ASCII case.
    #[must_use]
    pub fn lookup(word: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .find(|(spelling, _)| spelling.eq_ignore_ascii_case(word))
            .map(|&(_, keyword)| keyword)
    }

    /// Returns the upper-case spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        KEYWORDS
            .iter()
            .find(|(_, keyword)| *keyword == self)
            .map_or("", |&(spelling, _)| spelling)
    }

    /// Returns true for keywords that are also valid column names.
    ///
    /// `LIMIT` is not one of them: it closes a projection item or a clause
    /// in every dialect, so a column named `limit` must be quoted.
    #[must_use]
    pub const fn is_non_reserved(self) -> bool {
        matches!(self, Self::Offset | Self::Row | Self::Rows)
    }

    /// Returns true for the set-operation keywords that start a second query body.
    #[must_use]
    pub const fn is_set_operation(self) -> bool {
        matches!(
            self,
            Self::Union | Self::Except | Self::Intersect | Self::Minus
        )
    }
}

/// What a token is, without its position.
///
/// Literal payloads are decoded (quotes removed, escapes resolved); the
/// source text as written stays reachable through the token's [`Span`].
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Integer(i64),
    Float(f64),
    String(String),
    /// `X'..'` hex literal.
    Blob(Vec<u8>),
    Identifier(String),
    Keyword(Keyword),

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Eq,
    /// `!=` or `<>`.
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    /// `||`.
    Concat,
    BitAnd,
    BitOr,
    BitNot,
    LeftShift,
    RightShift,

    LeftParen,
    RightParen,
    Comma,
    Semicolon,
    Dot,
    Colon,
    /// `::` cast.
    DoubleColon,
    /// `?` placeholder.
    Question,
    At,

    Eof,
    /// Text the lexer could not scan; carries the reason.
    Error(String),
}

impl TokenKind {
    /// Returns true for operator and delimiter tokens.
    #[must_use]
    pub const fn is_symbol(&self) -> bool {
        !matches!(
            self,
            Self::Integer(_)
                | Self::Float(_)
                | Self::String(_)
                | Self::Blob(_)
                | Self::Identifier(_)
                | Self::Keyword(_)
                | Self::Eof
                | Self::Error(_)
        )
    }
}

/// A scanned token and the bytes it was scanned from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword, if this token is one.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }
}
