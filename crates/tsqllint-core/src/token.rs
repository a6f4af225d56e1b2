//! Token model consumed by the lint pipeline.

use serde::{Deserialize, Serialize};

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    /// Bare word: keyword, identifier or function name.
    Word,
    /// Bracketed or double-quoted identifier.
    QuotedIdentifier,
    /// `@local` or `@@global` variable.
    Variable,
    /// Numeric literal.
    Number,
    /// String literal, including `N'...'` literals.
    StringLiteral,
    /// Operator or punctuation.
    Symbol,
    /// `-- ...` comment.
    LineComment,
    /// `/* ... */` comment.
    BlockComment,
    /// Spaces, tabs and newlines.
    Whitespace,
}

/// Channel a token is emitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Significant tokens.
    Default,
    /// Comments.
    Comment,
    /// Whitespace.
    Hidden,
}

/// A single token with its position in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Lexical category.
    pub kind: TokenKind,
    /// Exact source text of the token.
    pub text: String,
    /// Channel the token belongs to.
    pub channel: Channel,
    /// Character offset of the first character.
    pub start_char: usize,
    /// Character offset of the last character (inclusive).
    pub stop_char: usize,
    /// Line of the first character (1-indexed).
    pub line: usize,
    /// Column of the first character (0-indexed, in characters).
    pub column: usize,
}

impl Token {
    /// Creates a token, deriving the channel from its kind.
    #[must_use]
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        start_char: usize,
        line: usize,
        column: usize,
    ) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self {
            kind,
            channel: kind.channel(),
            stop_char: start_char + len.saturating_sub(1),
            text,
            start_char,
            line,
            column,
        }
    }

    /// Returns true for comment tokens.
    #[must_use]
    pub fn is_comment(&self) -> bool {
        self.channel == Channel::Comment
    }

    /// Returns true for tokens on the default channel.
    #[must_use]
    pub fn is_significant(&self) -> bool {
        self.channel == Channel::Default
    }

    /// Case-insensitive comparison of an unquoted word against `word`.
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Word && self.text.eq_ignore_ascii_case(word)
    }

    /// Returns true if the token is the symbol `symbol`.
    #[must_use]
    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Symbol && self.text == symbol
    }
}

impl TokenKind {
    /// Channel tokens of this kind are emitted on.
    #[must_use]
    pub fn channel(self) -> Channel {
        match self {
            Self::LineComment | Self::BlockComment => Channel::Comment,
            Self::Whitespace => Channel::Hidden,
            _ => Channel::Default,
        }
    }
}

/// Read-only view over the token stream of one file.
#[derive(Debug, Clone, Copy)]
pub struct TokenView<'a> {
    tokens: &'a [Token],
}

impl<'a> TokenView<'a> {
    /// Wraps a token slice.
    #[must_use]
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens }
    }

    /// All tokens, comments and whitespace included.
    #[must_use]
    pub fn all(&self) -> &'a [Token] {
        self.tokens
    }

    /// Number of tokens in the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the view holds no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Significant tokens only, in source order.
    pub fn significant(&self) -> impl Iterator<Item = &'a Token> + 'a {
        self.tokens.iter().filter(|t| t.is_significant())
    }

    /// Comment tokens only, in source order.
    pub fn comments(&self) -> impl Iterator<Item = &'a Token> + 'a {
        self.tokens.iter().filter(|t| t.is_comment())
    }

    /// Significant tokens collected into a vector, for rules that need
    /// look-behind or look-ahead.
    #[must_use]
    pub fn significant_tokens(&self) -> Vec<&'a Token> {
        self.significant().collect()
    }

    /// Offset of the last character of the file, if any tokens exist.
    #[must_use]
    pub fn last_char(&self) -> Option<usize> {
        self.tokens.iter().map(|t| t.stop_char).max()
    }
}
