//! Scanner from SQL text to spanned tokens.

use super::{Keyword, Span, Token, TokenKind};

/// Two-character operators, tried before single characters.
const DOUBLE_SYMBOLS: &[(&str, TokenKind)] = &[
    ("<=", TokenKind::LtEq),
    (">=", TokenKind::GtEq),
    ("<>", TokenKind::NotEq),
    ("!=", TokenKind::NotEq),
    ("<<", TokenKind::LeftShift),
    (">>", TokenKind::RightShift),
    ("||", TokenKind::Concat),
    ("::", TokenKind::DoubleColon),
];

const fn single_symbol(c: char) -> Option<TokenKind> {
    Some(match c {
        '(' => TokenKind::LeftParen,
        ')' => TokenKind::RightParen,
        ',' => TokenKind::Comma,
        ';' => TokenKind::Semicolon,
        '.' => TokenKind::Dot,
        ':' => TokenKind::Colon,
        '?' => TokenKind::Question,
        '@' => TokenKind::At,
        '+' => TokenKind::Plus,
        '-' => TokenKind::Minus,
        '*' => TokenKind::Star,
        '/' => TokenKind::Slash,
        '%' => TokenKind::Percent,
        '=' => TokenKind::Eq,
        '<' => TokenKind::Lt,
        '>' => TokenKind::Gt,
        '&' => TokenKind::BitAnd,
        '|' => TokenKind::BitOr,
        '~' => TokenKind::BitNot,
        _ => return None,
    })
}

/// Turns SQL text into tokens whose spans are byte ranges of the input.
///
/// Scanning never fails outright: bad input yields a [`TokenKind::Error`]
/// token and the caller decides what to do with it.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        self.input.get(self.pos..).unwrap_or_default()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn bump_while(&mut self, mut keep: impl FnMut(char) -> bool) {
        while self.peek().is_some_and(&mut keep) {
            self.bump();
        }
    }

    /// Skips whitespace, `-- line` and `/* block */` comments.
    fn skip_trivia(&mut self) {
        loop {
            self.bump_while(char::is_whitespace);
            let rest = self.rest();
            if rest.starts_with("--") {
                self.bump_while(|c| c != '\n');
            } else if rest.starts_with("/*") {
                self.pos += rest.find("*/").map_or(rest.len(), |end| end + 2);
            } else {
                return;
            }
        }
    }

    fn token(&self, start: usize, kind: TokenKind) -> Token {
        Token::new(kind, Span::new(start, self.pos))
    }

    fn word(&mut self, start: usize) -> TokenKind {
        self.bump_while(|c| c.is_alphanumeric() || c == '_' || c == '$');
        let text = &self.input[start..self.pos];
        Keyword::lookup(text).map_or_else(
            || TokenKind::Identifier(text.to_owned()),
            TokenKind::Keyword,
        )
    }

    fn number(&mut self, start: usize) -> TokenKind {
        self.bump_while(|c| c.is_ascii_digit());
        let mut chars = self.rest().chars();
        let fraction =
            chars.next() == Some('.') && chars.next().is_some_and(|c| c.is_ascii_digit());
        if fraction {
            self.bump();
            self.bump_while(|c| c.is_ascii_digit());
        }
        let mut chars = self.rest().chars();
        let exponent = matches!(chars.next(), Some('e' | 'E'))
            && chars
                .next()
                .is_some_and(|c| c.is_ascii_digit() || c == '+' || c == '-');
        if exponent {
            self.bump();
            if matches!(self.peek(), Some('+' | '-')) {
                self.bump();
            }
            self.bump_while(|c| c.is_ascii_digit());
        }

        let text = &self.input[start..self.pos];
        if fraction || exponent {
            text.parse().map_or_else(
                |e| TokenKind::Error(format!("Invalid float: {e}")),
                TokenKind::Float,
            )
        } else {
            text.parse().map_or_else(
                |e| TokenKind::Error(format!("Invalid integer: {e}")),
                TokenKind::Integer,
            )
        }
    }

    /// Reads up to `close`, the opening quote already consumed.
    ///
    /// A doubled `close` stands for itself, except for `]`.
    fn quoted(&mut self, close: char, what: &str) -> Result<String, TokenKind> {
        let mut value = String::new();
        loop {
            match self.bump() {
                Some(c) if c == close => {
                    if close != ']' && self.peek() == Some(close) {
                        self.bump();
                        value.push(close);
                    } else {
                        return Ok(value);
                    }
                }
                Some(c) => value.push(c),
                None => return Err(TokenKind::Error(format!("Unterminated {what}"))),
            }
        }
    }

    /// Reads the digits of `X'..'`, the `X'` already consumed.
    fn blob(&mut self) -> TokenKind {
        let digits_start = self.pos;
        self.bump_while(|c| c.is_ascii_hexdigit());
        let digits = &self.input[digits_start..self.pos];
        match self.bump() {
            Some('\'') => {}
            Some(_) => return TokenKind::Error(String::from("Invalid character in blob literal")),
            None => return TokenKind::Error(String::from("Unterminated blob literal")),
        }
        if digits.len() % 2 == 1 {
            return TokenKind::Error(String::from("Odd number of hex digits in blob literal"));
        }
        let bytes = (0..digits.len())
            .step_by(2)
            .filter_map(|i| u8::from_str_radix(&digits[i..i + 2], 16).ok())
            .collect();
        TokenKind::Blob(bytes)
    }

    /// Scans the next token, or [`TokenKind::Eof`] at the end of input.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();
        let start = self.pos;
        let rest = self.rest();

        if let Some((symbol, kind)) = DOUBLE_SYMBOLS
            .iter()
            .find(|(symbol, _)| rest.starts_with(symbol))
        {
            self.pos += symbol.len();
            return self.token(start, kind.clone());
        }

        let Some(c) = self.bump() else {
            return self.token(start, TokenKind::Eof);
        };
        let kind = match c {
            '\'' => self
                .quoted('\'', "string literal")
                .map_or_else(|e| e, TokenKind::String),
            '"' | '`' => self
                .quoted(c, "quoted identifier")
                .map_or_else(|e| e, TokenKind::Identifier),
            '[' => self
                .quoted(']', "quoted identifier")
                .map_or_else(|e| e, TokenKind::Identifier),
            'X' | 'x' if self.peek() == Some('\'') => {
                self.bump();
                self.blob()
            }
            c if c.is_ascii_digit() => self.number(start),
            c if c.is_alphabetic() || c == '_' => self.word(start),
            c => single_symbol(c)
                .unwrap_or_else(|| TokenKind::Error(format!("Unexpected character: {c}"))),
        };
        self.token(start, kind)
    }

    /// Scans the whole input. The last token is always [`TokenKind::Eof`].
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.is_eof();
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }
}
