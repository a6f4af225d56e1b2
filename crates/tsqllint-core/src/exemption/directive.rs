//! Parser for `tsqllint-disable` / `tsqllint-enable` comment directives.

use super::normalize_rule_name;

/// Common prefix of both directive keywords.
const DIRECTIVE_PREFIX: &str = "tsqllint-";

/// What a directive does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveAction {
    /// Starts an exemption range.
    Disable,
    /// Ends an exemption range.
    Enable,
}

/// A parsed directive comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExemptionDirective {
    /// Disable or enable.
    pub action: DirectiveAction,
    /// Upper-cased rule name, or `None` for every rule.
    pub rule_name: Option<String>,
}

/// Parses a directive from the full text of a comment token.
///
/// The keyword may be surrounded by arbitrary text and is matched
/// case-insensitively. An optional rule name made of letters, digits, `-` and
/// `_` may follow it after whitespace. Returns `None` when the comment holds
/// no directive.
#[must_use]
pub fn parse_directive(comment: &str) -> Option<ExemptionDirective> {
    let body = comment_body(comment);
    let lowered = body.to_ascii_lowercase();

    for (pos, _) in lowered.match_indices(DIRECTIVE_PREFIX) {
        let preceded_by_word = body[..pos]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || c == '_');
        if preceded_by_word {
            continue;
        }

        let rest = &body[pos + DIRECTIVE_PREFIX.len()..];
        if let Some((action, tail)) = split_action(rest) {
            return Some(ExemptionDirective {
                action,
                rule_name: parse_rule_name(tail),
            });
        }
    }

    None
}

/// Strips `/* */` or `--` delimiters.
fn comment_body(comment: &str) -> &str {
    if let Some(inner) = comment.strip_prefix("/*") {
        inner.strip_suffix("*/").unwrap_or(inner)
    } else if let Some(inner) = comment.strip_prefix("--") {
        inner
    } else {
        comment
    }
}

fn split_action(rest: &str) -> Option<(DirectiveAction, &str)> {
    [
        ("disable", DirectiveAction::Disable),
        ("enable", DirectiveAction::Enable),
    ]
    .into_iter()
    .find_map(|(keyword, action)| {
        let head = rest.get(..keyword.len())?;
        if !head.eq_ignore_ascii_case(keyword) {
            return None;
        }
        let tail = &rest[keyword.len()..];
        // `tsqllint-disabled` is not a directive
        if tail.chars().next().is_some_and(is_name_char) {
            return None;
        }
        Some((action, tail))
    })
}

fn parse_rule_name(tail: &str) -> Option<String> {
    let trimmed = tail.trim_start();
    let end = trimmed
        .char_indices()
        .find(|(_, c)| !is_name_char(*c))
        .map_or(trimmed.len(), |(i, _)| i);
    let name = &trimmed[..end];
    (!name.is_empty()).then(|| normalize_rule_name(name))
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}
