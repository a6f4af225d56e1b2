//! Rule trait for defining lint rules.

use crate::context::FileContext;
use crate::types::{RawViolation, Severity};

/// A per-file lint rule over the token stream.
///
/// Rules are shared across files and threads, so they must not keep mutable
/// state between calls to [`Rule::check`].
///
/// # Example
///
/// ```ignore
/// use tsqllint_core::{FileContext, RawViolation, Rule};
///
/// pub struct NoGoto;
///
/// impl Rule for NoGoto {
///     fn name(&self) -> &'static str { "no-goto" }
///
///     fn check(&self, ctx: &FileContext) -> Vec<RawViolation> {
///         ctx.tokens
///             .significant()
///             .filter(|t| t.is_word("GOTO"))
///             .map(|t| RawViolation::at_token(self.name(), "GOTO is not allowed", t))
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "keyword-casing").
    ///
    /// The name selects the rule in configuration and in
    /// `tsqllint-disable <name>` directives.
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks a single file and returns any violations found.
    ///
    /// Every returned violation must carry this rule's name.
    fn check(&self, ctx: &FileContext) -> Vec<RawViolation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
