//! Converts directive comments into exemption ranges.

use super::directive::{parse_directive, DirectiveAction};
use super::ExemptionRange;
use crate::token::{Token, TokenView};
use std::collections::BTreeMap;
use tracing::trace;

/// Scans the comment tokens of one file and returns its exemption ranges.
///
/// Every rule key (`None` for "all rules", otherwise the upper-cased rule name)
/// is tracked independently:
///
/// - a disable opens a range at the comment's first character unless one is
///   already open for that key;
/// - an enable closes the open range at the comment's last character, and is
///   ignored when nothing is open;
/// - ranges still open at the end run to the last character of the file.
///
/// Closed ranges are returned in the order they were closed, followed by the
/// unterminated ones.
#[must_use]
pub fn scan_exemptions(tokens: &[Token]) -> Vec<ExemptionRange> {
    let mut open: BTreeMap<Option<String>, usize> = BTreeMap::new();
    let mut ranges = Vec::new();

    for token in tokens.iter().filter(|t| t.is_comment()) {
        let Some(directive) = parse_directive(&token.text) else {
            continue;
        };
        trace!(
            "directive {:?} for {:?} at {}",
            directive.action,
            directive.rule_name,
            token.start_char
        );

        match directive.action {
            DirectiveAction::Disable => {
                open.entry(directive.rule_name).or_insert(token.start_char);
            }
            DirectiveAction::Enable => {
                if let Some(start) = open.remove(&directive.rule_name) {
                    ranges.push(ExemptionRange {
                        rule_name: directive.rule_name,
                        start_char: start,
                        stop_char: token.stop_char,
                    });
                }
            }
        }
    }

    if !open.is_empty() {
        let end = TokenView::new(tokens).last_char().unwrap_or(0);
        ranges.extend(open.into_iter().map(|(rule_name, start)| ExemptionRange {
            rule_name,
            start_char: start,
            stop_char: end.max(start),
        }));
    }

    ranges
}
