//! Token source adapter over the `sqlparser` tokenizer.
//!
//! Converts the MS SQL dialect token stream into the pipeline's [`Token`]
//! model. Token text is sliced from the original source so that comments,
//! quoting and whitespace are preserved exactly.

use crate::token::{Token, TokenKind};
use sqlparser::dialect::MsSqlDialect;
use sqlparser::tokenizer::{Location, Token as SqlToken, Tokenizer, Whitespace};
use thiserror::Error;

/// Error raised when the source text cannot be tokenized.
#[derive(Debug, Clone, Error)]
#[error("failed to tokenize SQL: {message}")]
pub struct LexError {
    /// Tokenizer message, including its position.
    pub message: String,
}

/// Tokenizes T-SQL source text.
///
/// Whitespace and comments are kept on their own channels.
///
/// # Errors
///
/// Returns [`LexError`] if the tokenizer rejects the input (for example an
/// unterminated string literal).
pub fn tokenize(sql: &str) -> Result<Vec<Token>, LexError> {
    let dialect = MsSqlDialect {};
    let raw = Tokenizer::new(&dialect, sql)
        .tokenize_with_location()
        .map_err(|e| LexError {
            message: e.to_string(),
        })?;

    let chars: Vec<char> = sql.chars().collect();
    let index = LineIndex::new(&chars);
    let mut tokens = Vec::with_capacity(raw.len());

    for item in raw {
        if matches!(item.token, SqlToken::EOF) {
            continue;
        }

        let start = index.offset(item.span.start);
        let end = index.offset(item.span.end);
        if end <= start {
            continue;
        }

        let kind = classify(&item.token);
        tokens.push(Token {
            kind,
            text: chars[start..end].iter().collect(),
            channel: kind.channel(),
            start_char: start,
            stop_char: end - 1,
            line: to_usize(item.span.start.line),
            column: to_usize(item.span.start.column).saturating_sub(1),
        });
    }

    Ok(tokens)
}

fn classify(token: &SqlToken) -> TokenKind {
    match token {
        SqlToken::Word(word) if word.quote_style.is_some() => TokenKind::QuotedIdentifier,
        SqlToken::Word(word) if word.value.starts_with('@') => TokenKind::Variable,
        SqlToken::Word(_) => TokenKind::Word,
        SqlToken::Placeholder(p) if p.starts_with('@') => TokenKind::Variable,
        SqlToken::Number(..) => TokenKind::Number,
        SqlToken::SingleQuotedString(_)
        | SqlToken::NationalStringLiteral(_)
        | SqlToken::HexStringLiteral(_) => TokenKind::StringLiteral,
        SqlToken::Whitespace(Whitespace::SingleLineComment { .. }) => TokenKind::LineComment,
        SqlToken::Whitespace(Whitespace::MultiLineComment(_)) => TokenKind::BlockComment,
        SqlToken::Whitespace(_) => TokenKind::Whitespace,
        _ => TokenKind::Symbol,
    }
}

fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// Maps tokenizer line/column locations to character offsets.
struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    fn new(chars: &[char]) -> Self {
        let mut line_starts = vec![0];
        for (i, c) in chars.iter().enumerate() {
            if *c == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            line_starts,
            len: chars.len(),
        }
    }

    /// Locations are 1-indexed in both line and column.
    fn offset(&self, location: Location) -> usize {
        let line = to_usize(location.line);
        if line == 0 {
            return 0;
        }
        let Some(start) = self.line_starts.get(line - 1) else {
            return self.len;
        };
        (start + to_usize(location.column).saturating_sub(1)).min(self.len)
    }
}
