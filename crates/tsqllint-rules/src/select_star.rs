//! Rule to forbid `*` in select lists.
//!
//! `SELECT *` couples callers to the column order of the underlying tables.
//!
//! # Configuration
//!
//! - `allow_in_exists`: Allow `*` inside `EXISTS (...)` subqueries (default: true)

use tsqllint_core::{FileContext, RawViolation, Rule, RuleConfig, Severity, Token, TokenKind};

/// Rule name for select-star.
pub const NAME: &str = "select-star";

/// Forbids `SELECT *` and `SELECT alias.*`.
#[derive(Debug, Clone)]
pub struct SelectStar {
    /// Allow `*` inside `EXISTS (...)`.
    pub allow_in_exists: bool,
}

impl Default for SelectStar {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectStar {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allow_in_exists: true,
        }
    }

    /// Creates the rule from its `[rules.select-star]` table.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        Self::new().allow_in_exists(config.get_bool("allow_in_exists", true))
    }

    /// Sets whether `*` is allowed inside `EXISTS (...)`.
    #[must_use]
    pub fn allow_in_exists(mut self, allow: bool) -> Self {
        self.allow_in_exists = allow;
        self
    }
}

/// Whether a `*` preceded by `prev` (and `before_prev`) starts a select-list
/// item rather than multiplying or counting.
fn is_select_item(prev: &Token, before_prev: Option<&Token>) -> bool {
    if prev.is_word("SELECT") || prev.is_word("DISTINCT") || prev.is_word("ALL") {
        return true;
    }
    if prev.is_symbol(",") || prev.is_symbol(".") {
        return true;
    }
    // SELECT TOP 10 *
    prev.kind == TokenKind::Number && before_prev.is_some_and(|t| t.is_word("TOP"))
}

impl Rule for SelectStar {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids * in select lists"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &FileContext) -> Vec<RawViolation> {
        let sig = ctx.tokens.significant_tokens();
        let mut violations = Vec::new();

        let mut depth = 0usize;
        let mut exists_depths: Vec<usize> = Vec::new();

        for (i, &token) in sig.iter().enumerate() {
            let prev = i.checked_sub(1).map(|j| sig[j]);

            if token.is_symbol("(") {
                depth += 1;
                if prev.is_some_and(|p| p.is_word("EXISTS")) {
                    exists_depths.push(depth);
                }
                continue;
            }
            if token.is_symbol(")") {
                if exists_depths.last() == Some(&depth) {
                    exists_depths.pop();
                }
                depth = depth.saturating_sub(1);
                continue;
            }

            if !token.is_symbol("*") {
                continue;
            }
            let Some(prev) = prev else { continue };
            let before_prev = i.checked_sub(2).map(|j| sig[j]);
            if !is_select_item(prev, before_prev) {
                continue;
            }
            if self.allow_in_exists && !exists_depths.is_empty() {
                continue;
            }

            let violation = if prev.is_symbol(".") {
                before_prev
                    .filter(|t| crate::sql::is_name(t))
                    .and_then(|alias| {
                        RawViolation::spanning(
                            NAME,
                            "Expected column names instead of alias.*",
                            &[alias, prev, token],
                        )
                    })
            } else {
                Some(RawViolation::at_token(NAME, "Expected column names instead of *", token))
            };
            violations.extend(violation);
        }

        violations
    }
}
