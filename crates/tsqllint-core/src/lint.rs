//! Per-file lint pipeline: exemption scan, rule run, filter, aggregate.

use crate::context::FileContext;
use crate::exemption::{scan_exemptions, ExemptionIndex};
use crate::lexer::{tokenize, LexError};
use crate::rule::Rule;
use crate::runner::run_rules;
use crate::token::Token;
use crate::types::{Diagnostic, LintReport};
use tracing::debug;

/// Lints a token stream that has no backing file.
#[must_use]
pub fn lint(tokens: &[Token], rules: &[&dyn Rule]) -> LintReport {
    lint_file(&FileContext::anonymous(tokens), rules)
}

/// Tokenizes and lints SQL source text.
///
/// # Errors
///
/// Returns [`LexError`] if the source cannot be tokenized.
pub fn lint_source(sql: &str, rules: &[&dyn Rule]) -> Result<LintReport, LexError> {
    let tokens = tokenize(sql)?;
    Ok(lint(&tokens, rules))
}

/// Runs the full pipeline for one file.
///
/// Rules run in the given order. Violations inside an applicable exemption
/// range are dropped; rule faults are always reported.
#[must_use]
pub fn lint_file(ctx: &FileContext, rules: &[&dyn Rule]) -> LintReport {
    let ranges = scan_exemptions(ctx.tokens.all());
    let index = ExemptionIndex::new(&ranges);
    debug!(
        "{}: {} exemption range(s), {} rule(s)",
        ctx.path.display(),
        ranges.len(),
        rules.len()
    );

    let mut diagnostics = Vec::new();
    let mut suppressed = 0;

    for (rule, outcome) in rules.iter().zip(run_rules(ctx, rules)) {
        match outcome {
            Ok(violations) => {
                let (survivors, dropped) = index.filter(violations);
                suppressed += dropped;
                let severity = rule.default_severity();
                diagnostics.extend(
                    survivors
                        .into_iter()
                        .map(|v| Diagnostic::from_violation(v, severity)),
                );
            }
            Err(fault) => diagnostics.push(fault.to_diagnostic()),
        }
    }

    aggregate(diagnostics, suppressed)
}

/// Orders diagnostics by position and packages them into a report.
///
/// The sort is stable, so diagnostics sharing a line and column keep the
/// order in which their rules ran.
#[must_use]
pub fn aggregate(mut diagnostics: Vec<Diagnostic>, suppressed: usize) -> LintReport {
    diagnostics.sort_by_key(|d| (d.line, d.column));
    LintReport::new(diagnostics, suppressed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RawViolation, Severity};

    /// Flags every significant token whose text equals `word`.
    struct Flag {
        name: &'static str,
        word: &'static str,
    }

    impl Rule for Flag {
        fn name(&self) -> &'static str {
            self.name
        }

        fn default_severity(&self) -> Severity {
            Severity::Warning
        }

        fn check(&self, ctx: &FileContext) -> Vec<RawViolation> {
            ctx.tokens
                .significant()
                .filter(|t| t.text == self.word)
                .map(|t| RawViolation::at_token(self.name, format!("found {}", self.word), t))
                .collect()
        }
    }

    struct Panics;

    impl Rule for Panics {
        fn name(&self) -> &'static str {
            "panics"
        }

        fn check(&self, _ctx: &FileContext) -> Vec<RawViolation> {
            panic!("unreachable state")
        }
    }

    fn run(sql: &str, rules: &[&dyn Rule]) -> Vec<(String, String, usize, usize)> {
        lint_source(sql, rules)
            .unwrap()
            .diagnostics
            .into_iter()
            .map(|d| (d.rule_name, d.trigger_text, d.line, d.column))
            .collect()
    }

    const SELECT: Flag = Flag {
        name: "flag-select",
        word: "select",
    };
    const FROM: Flag = Flag {
        name: "flag-from",
        word: "from",
    };

    #[test]
    fn no_rules_no_diagnostics() {
        let report = lint_source("select 1 from t", &[]).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.count, 0);
    }

    #[test]
    fn applies_rule_default_severity() {
        let report = lint_source("select 1", &[&SELECT]).unwrap();
        assert_eq!(report.diagnostics[0].severity, Severity::Warning);
    }

    #[test]
    fn sorts_by_position_then_rule_order() {
        let diagnostics = run("from x\nselect 1", &[&SELECT, &FROM]);
        assert_eq!(
            diagnostics,
            vec![
                (String::from("flag-from"), String::from("from"), 1, 0),
                (String::from("flag-select"), String::from("select"), 2, 0),
            ]
        );

        let twice = Flag {
            name: "flag-select-again",
            word: "select",
        };
        let tied = run("select 1", &[&twice, &SELECT]);
        let names: Vec<_> = tied.iter().map(|d| d.0.as_str()).collect();
        assert_eq!(names, vec!["flag-select-again", "flag-select"]);
    }

    #[test]
    fn global_disable_suppresses_all_rules() {
        let sql = "/* tsqllint-disable */ select 1 from t /* tsqllint-enable */ select 2";
        let diagnostics = run(sql, &[&SELECT, &FROM]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].0, "flag-select");
        assert_eq!(diagnostics[0].3, 61);
    }

    #[test]
    fn scoped_disable_leaves_other_rules() {
        let sql = "/* tsqllint-disable flag-select */ select 1 from t";
        let diagnostics = run(sql, &[&SELECT, &FROM]);
        let names: Vec<_> = diagnostics.iter().map(|d| d.0.as_str()).collect();
        assert_eq!(names, vec!["flag-from"]);
    }

    #[test]
    fn reports_suppressed_count() {
        let sql = "/* tsqllint-disable */ select select";
        let report = lint_source(sql, &[&SELECT]).unwrap();
        assert_eq!(report.count, 0);
        assert_eq!(report.suppressed, 2);
    }

    #[test]
    fn fault_is_reported_and_others_unaffected() {
        let sql = "select 1\nfrom t";
        let baseline = lint_source(sql, &[&SELECT, &FROM]).unwrap();
        let with_fault = lint_source(sql, &[&SELECT, &Panics, &FROM]).unwrap();

        assert_eq!(with_fault.count, baseline.count + 1);
        assert_eq!(with_fault.fault_count(), 1);

        let others: Vec<_> = with_fault
            .diagnostics
            .iter()
            .filter(|d| !d.is_fault())
            .cloned()
            .collect();
        assert_eq!(others, baseline.diagnostics);
    }

    /// Flags `select` but labels the violation as another rule's.
    struct Mislabels;

    impl Rule for Mislabels {
        fn name(&self) -> &'static str {
            "mislabels"
        }

        fn check(&self, ctx: &FileContext) -> Vec<RawViolation> {
            SELECT.check(ctx)
        }
    }

    #[test]
    fn mislabeled_violations_follow_producing_rule() {
        let diagnostics = run("select 1 from t", &[&Mislabels, &FROM]);
        let names: Vec<_> = diagnostics.iter().map(|d| d.0.as_str()).collect();
        assert_eq!(names, vec!["mislabels", "flag-from"]);

        let sql = "/* tsqllint-disable mislabels */ select 1 from t";
        let diagnostics = run(sql, &[&Mislabels, &FROM]);
        let names: Vec<_> = diagnostics.iter().map(|d| d.0.as_str()).collect();
        assert_eq!(names, vec!["flag-from"]);
    }

    #[test]
    fn fault_survives_global_disable() {
        let sql = "/* tsqllint-disable */ select 1";
        let report = lint_source(sql, &[&Panics]).unwrap();
        assert_eq!(report.count, 1);
        assert!(report.diagnostics[0].is_fault());
    }

    #[test]
    fn repeated_runs_are_identical() {
        let sql = "select a from t /* tsqllint-disable flag-from */ from";
        let first = lint_source(sql, &[&SELECT, &FROM]).unwrap();
        let second = lint_source(sql, &[&SELECT, &FROM]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn aggregate_is_stable() {
        let make = |rule: &str, line, column| Diagnostic {
            rule_name: rule.to_string(),
            message: String::new(),
            trigger_text: String::new(),
            line,
            column,
            start_char: 0,
            stop_char: 0,
            severity: Severity::Error,
            kind: crate::types::DiagnosticKind::Violation,
        };
        let report = aggregate(
            vec![make("b", 2, 0), make("a", 1, 5), make("c", 1, 5), make("d", 1, 0)],
            0,
        );
        let order: Vec<_> = report.diagnostics.iter().map(|d| d.rule_name.as_str()).collect();
        assert_eq!(order, vec!["d", "a", "c", "b"]);
        assert_eq!(report.count, 4);
    }
}
