//! Rule execution with per-rule fault isolation.

use crate::context::FileContext;
use crate::rule::Rule;
use crate::types::{Diagnostic, DiagnosticKind, RawViolation, Severity};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

/// A rule that failed while checking a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFault {
    /// Name of the failing rule.
    pub rule_name: String,
    /// Panic message, if one could be recovered.
    pub message: String,
}

impl RuleFault {
    /// Converts the fault into a diagnostic anchored at the start of the file.
    #[must_use]
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic {
            rule_name: self.rule_name.clone(),
            message: format!("rule `{}` failed: {}", self.rule_name, self.message),
            trigger_text: String::new(),
            line: 1,
            column: 0,
            start_char: 0,
            stop_char: 0,
            severity: Severity::Error,
            kind: DiagnosticKind::RuleFault,
        }
    }
}

/// Outcome of running one rule against one file.
pub type RuleOutcome = Result<Vec<RawViolation>, RuleFault>;

/// Runs a single rule, converting a panic into a [`RuleFault`].
///
/// Every returned violation carries `rule.name()`, whatever name the rule
/// put on it.
pub fn run_rule(rule: &dyn Rule, ctx: &FileContext) -> RuleOutcome {
    debug!("Running rule {} on {}", rule.name(), ctx.path.display());

    match panic::catch_unwind(AssertUnwindSafe(|| rule.check(ctx))) {
        Ok(mut violations) => {
            for v in &mut violations {
                if v.rule_name != rule.name() {
                    v.rule_name = rule.name().to_string();
                }
            }
            Ok(violations)
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(
                "Rule {} failed on {}: {}",
                rule.name(),
                ctx.path.display(),
                message
            );
            Err(RuleFault {
                rule_name: rule.name().to_string(),
                message,
            })
        }
    }
}

/// Runs every rule once, in order, and returns one outcome per rule.
pub fn run_rules(ctx: &FileContext, rules: &[&dyn Rule]) -> Vec<RuleOutcome> {
    rules.iter().map(|rule| run_rule(*rule, ctx)).collect()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "rule panicked".to_string())
}
