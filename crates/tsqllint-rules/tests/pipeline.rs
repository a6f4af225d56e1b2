//! End-to-end tests of the lint pipeline with the built-in rules.

use tsqllint_core::lint::lint_source;
use tsqllint_core::{FileContext, LintReport, RawViolation, Rule};
use tsqllint_rules::{all_rules, KeywordCasing, SelectStar};

fn run(sql: &str, rules: &[&dyn Rule]) -> LintReport {
    lint_source(sql, rules).expect("fixture should tokenize")
}

fn triggers(report: &LintReport) -> Vec<&str> {
    report
        .diagnostics
        .iter()
        .map(|d| d.trigger_text.as_str())
        .collect()
}

fn render(report: &LintReport) -> String {
    report
        .diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn scoped_disable_covers_only_the_enclosed_keyword() {
    let report = run(include_str!("fixtures/scoped_select.sql"), &[&KeywordCasing::new()]);

    assert_eq!(triggers(&report), vec!["from", "where"]);
    assert!(report.diagnostics.iter().all(|d| d.line == 4));
    assert_eq!(report.suppressed, 1);
}

#[test]
fn disable_for_unknown_rule_has_no_effect() {
    let report = run(include_str!("fixtures/disable_rule.sql"), &[&KeywordCasing::new()]);
    assert_eq!(triggers(&report), vec!["select", "and"]);
}

#[test]
fn stored_procedure_with_every_rule() {
    let rules = all_rules();
    let rules: Vec<&dyn Rule> = rules.iter().map(AsRef::as_ref).collect();
    let report = run(include_str!("fixtures/load_orders.sql"), &rules);

    assert_eq!(report.suppressed, 1);
    insta::assert_snapshot!(render(&report), @r"
    4:15: warning [disallow-cursors] Found cursor declaration
    4:33: warning [select-star] Expected column names instead of *
    4:40: error [linked-server] Unexpected linked server call through a four-part name
    8:5: warning [print-statement] Use RAISERROR or THROW instead of PRINT
    9:12: warning [upper-lower] Use of the UPPER or LOWER functions is not allowed
    9:29: error [information-schema] Expected sys catalog views rather than INFORMATION_SCHEMA views
    ");
}

#[test]
fn line_comment_directives() {
    let sql = "-- tsqllint-disable select-star\nselect * from t\n-- tsqllint-enable select-star\nSELECT * FROM t";
    let report = run(sql, &[&KeywordCasing::new(), &SelectStar::new()]);

    let found: Vec<_> = report
        .diagnostics
        .iter()
        .map(|d| (d.rule_name.as_str(), d.line))
        .collect();
    assert_eq!(
        found,
        vec![
            ("keyword-casing", 2),
            ("keyword-casing", 2),
            ("select-star", 4),
        ]
    );
}

#[test]
fn global_disable_spans_to_end_of_file_when_unterminated() {
    let sql = "select 1\n/* tsqllint-disable */\nselect * from t\nselect 2";
    let rules = all_rules();
    let rules: Vec<&dyn Rule> = rules.iter().map(AsRef::as_ref).collect();
    let report = run(sql, &rules);

    assert_eq!(triggers(&report), vec!["select"]);
    assert_eq!(report.diagnostics[0].line, 1);
}

struct Broken;

impl Rule for Broken {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn check(&self, _ctx: &FileContext) -> Vec<RawViolation> {
        panic!("index out of range")
    }
}

#[test]
fn failing_rule_does_not_hide_other_diagnostics() {
    let sql = "SELECT *\nfrom t";
    let keyword = KeywordCasing::new();
    let star = SelectStar::new();

    let healthy = run(sql, &[&keyword, &star]);
    let with_fault = run(sql, &[&keyword, &Broken, &star]);

    assert_eq!(with_fault.count, healthy.count + 1);
    assert_eq!(with_fault.fault_count(), 1);
    assert_eq!(with_fault.diagnostics[0].rule_name, "broken");
    assert_eq!(&with_fault.diagnostics[1..], &healthy.diagnostics[..]);
}
