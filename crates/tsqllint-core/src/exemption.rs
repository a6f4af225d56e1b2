//! Comment-driven exemption ranges.
//!
//! Directives look like:
//! ```text
//! /* tsqllint-disable keyword-casing */
//! select 1
//! /* tsqllint-enable keyword-casing */
//! ```
//!
//! A directive without a rule name applies to every rule.

pub mod directive;
pub mod filter;
pub mod scanner;

#[doc(inline)]
pub use directive::{parse_directive, DirectiveAction, ExemptionDirective};
#[doc(inline)]
pub use filter::ExemptionIndex;
#[doc(inline)]
pub use scanner::scan_exemptions;

use serde::{Deserialize, Serialize};

/// A character range inside which matching violations are suppressed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExemptionRange {
    /// Upper-cased rule name, or `None` for every rule.
    pub rule_name: Option<String>,
    /// First exempt character offset.
    pub start_char: usize,
    /// Last exempt character offset (inclusive).
    pub stop_char: usize,
}

impl ExemptionRange {
    /// Creates a range, normalizing the rule name.
    #[must_use]
    pub fn new(rule_name: Option<&str>, start_char: usize, stop_char: usize) -> Self {
        debug_assert!(start_char <= stop_char, "inverted exemption range");
        Self {
            rule_name: rule_name.map(normalize_rule_name),
            start_char,
            stop_char,
        }
    }

    /// Whether this range suppresses `rule_name` at `offset`.
    #[must_use]
    pub fn covers(&self, rule_name: &str, offset: usize) -> bool {
        (self.start_char..=self.stop_char).contains(&offset)
            && self
                .rule_name
                .as_deref()
                .map_or(true, |name| name.eq_ignore_ascii_case(rule_name))
    }
}

/// Canonical form of a rule name for exemption matching.
#[must_use]
pub fn normalize_rule_name(name: &str) -> String {
    name.to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_rule_name() {
        let range = ExemptionRange::new(Some("keyword-casing"), 0, 5);
        assert_eq!(range.rule_name.as_deref(), Some("KEYWORD-CASING"));
    }

    #[test]
    fn covers_is_inclusive_on_both_ends() {
        let range = ExemptionRange::new(None, 10, 20);
        assert!(range.covers("any-rule", 10));
        assert!(range.covers("any-rule", 20));
        assert!(!range.covers("any-rule", 9));
        assert!(!range.covers("any-rule", 21));
    }

    #[test]
    fn scoped_range_only_covers_its_rule() {
        let range = ExemptionRange::new(Some("select-star"), 0, 100);
        assert!(range.covers("SELECT-STAR", 50));
        assert!(range.covers("select-star", 50));
        assert!(!range.covers("keyword-casing", 50));
    }
}
