//! Token helpers shared by the built-in rules.

use tsqllint_core::{Token, TokenKind};

/// Returns true for tokens that can name an object: plain words and
/// bracketed or double-quoted identifiers.
pub(crate) fn is_name(token: &Token) -> bool {
    matches!(token.kind, TokenKind::Word | TokenKind::QuotedIdentifier)
}

/// Strips `[...]` or `"..."` quoting from an identifier.
pub(crate) fn unquote(text: &str) -> &str {
    text.strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .or_else(|| text.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .unwrap_or(text)
}

/// Whether the significant token at `i` is a member access (`x.<token>`) or
/// an object qualifier (`<token>.x`).
pub(crate) fn is_qualified(sig: &[&Token], i: usize) -> bool {
    let before = i.checked_sub(1).and_then(|j| sig.get(j));
    let after = sig.get(i + 1);
    before.is_some_and(|t| t.is_symbol(".")) || after.is_some_and(|t| t.is_symbol("."))
}

/// Whether the significant token at `i` is immediately followed by `(`.
pub(crate) fn is_call(sig: &[&Token], i: usize) -> bool {
    sig.get(i + 1).is_some_and(|t| t.is_symbol("("))
}
