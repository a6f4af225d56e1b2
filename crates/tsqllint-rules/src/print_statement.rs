//! Rule to forbid `PRINT` in production scripts.
//!
//! `PRINT` output is lost in most client drivers; errors should be raised
//! with `RAISERROR` or `THROW` instead.
//!
//! # Configuration
//!
//! - `allow_in_tests`: Allow in test scripts (default: true)

use crate::sql::is_qualified;
use tsqllint_core::{FileContext, RawViolation, Rule, RuleConfig, Severity};

/// Rule name for print-statement.
pub const NAME: &str = "print-statement";

/// Forbids `PRINT` statements.
#[derive(Debug, Clone)]
pub struct PrintStatement {
    /// Allow in test scripts.
    pub allow_in_tests: bool,
}

impl Default for PrintStatement {
    fn default() -> Self {
        Self::new()
    }
}

impl PrintStatement {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allow_in_tests: true,
        }
    }

    /// Creates the rule from its `[rules.print-statement]` table.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        Self::new().allow_in_tests(config.get_bool("allow_in_tests", true))
    }

    /// Sets whether to allow in test scripts.
    #[must_use]
    pub fn allow_in_tests(mut self, allow: bool) -> Self {
        self.allow_in_tests = allow;
        self
    }
}

impl Rule for PrintStatement {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids PRINT statements"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &FileContext) -> Vec<RawViolation> {
        if self.allow_in_tests && ctx.is_test() {
            return Vec::new();
        }

        let sig = ctx.tokens.significant_tokens();
        sig.iter()
            .enumerate()
            .filter(|(i, t)| t.is_word("PRINT") && !is_qualified(&sig, *i))
            .map(|(_, t)| {
                RawViolation::at_token(NAME, "Use RAISERROR or THROW instead of PRINT", t)
            })
            .collect()
    }
}
