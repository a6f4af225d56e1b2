//! Rule to discourage `UPPER()` / `LOWER()` calls.
//!
//! Case folding in predicates defeats index seeks; a case-insensitive
//! collation does the same comparison without it.

use crate::sql::{is_call, is_qualified};
use tsqllint_core::{FileContext, RawViolation, Rule, Severity};

/// Rule name for upper-lower.
pub const NAME: &str = "upper-lower";

/// Reports calls to the built-in `UPPER` and `LOWER` functions.
#[derive(Debug, Clone, Default)]
pub struct UpperLower;

impl UpperLower {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for UpperLower {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Discourages UPPER() and LOWER() in favour of case-insensitive collations"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &FileContext) -> Vec<RawViolation> {
        let sig = ctx.tokens.significant_tokens();
        sig.iter()
            .enumerate()
            .filter(|(i, t)| {
                (t.is_word("UPPER") || t.is_word("LOWER"))
                    && is_call(&sig, *i)
                    && !is_qualified(&sig, *i)
            })
            .map(|(_, t)| {
                RawViolation::at_token(
                    NAME,
                    "Use of the UPPER or LOWER functions is not allowed",
                    t,
                )
            })
            .collect()
    }
}
