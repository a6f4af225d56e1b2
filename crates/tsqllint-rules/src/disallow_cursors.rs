//! Rule to forbid cursors.

use crate::sql::is_qualified;
use tsqllint_core::{FileContext, RawViolation, Rule, Severity};

/// Rule name for disallow-cursors.
pub const NAME: &str = "disallow-cursors";

/// Forbids `CURSOR` declarations; set-based statements should be used instead.
#[derive(Debug, Clone, Default)]
pub struct DisallowCursors;

impl DisallowCursors {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for DisallowCursors {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids cursor declarations"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &FileContext) -> Vec<RawViolation> {
        let sig = ctx.tokens.significant_tokens();
        sig.iter()
            .enumerate()
            .filter(|(i, t)| t.is_word("CURSOR") && !is_qualified(&sig, *i))
            .map(|(_, t)| RawViolation::at_token(NAME, "Found cursor declaration", t))
            .collect()
    }
}
