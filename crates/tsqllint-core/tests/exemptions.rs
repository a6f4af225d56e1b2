//! Exemption scanning and filtering over real tokenizer output.

use tsqllint_core::exemption::scan_exemptions;
use tsqllint_core::{lint_source, tokenize, ExemptionRange, FileContext, RawViolation, Rule};

/// Flags every `x` identifier.
struct FlagX;

impl Rule for FlagX {
    fn name(&self) -> &'static str {
        "flag-x"
    }

    fn check(&self, ctx: &FileContext) -> Vec<RawViolation> {
        ctx.tokens
            .significant()
            .filter(|t| t.is_word("x"))
            .map(|t| RawViolation::at_token(self.name(), "found x", t))
            .collect()
    }
}

fn flagged_lines(sql: &str) -> Vec<usize> {
    lint_source(sql, &[&FlagX])
        .unwrap()
        .diagnostics
        .iter()
        .map(|d| d.line)
        .collect()
}

#[test]
fn back_to_back_directives_cover_whole_input() {
    let sql = "/*tsqllint-disable*//*tsqllint-enable*/";
    let ranges = scan_exemptions(&tokenize(sql).unwrap());
    assert_eq!(
        ranges,
        vec![ExemptionRange::new(None, 0, sql.chars().count() - 1)]
    );
}

#[test]
fn scoped_and_global_pairs_in_closing_order() {
    let sql = "
        /*tsqllint-disable    rule1*/
        /*  tsqllint-enable rule1*/
        /*tsqllint-disable  */
        /*tsqllint-enable*/
        ";
    let names: Vec<_> = scan_exemptions(&tokenize(sql).unwrap())
        .into_iter()
        .map(|r| r.rule_name)
        .collect();
    assert_eq!(names, vec![Some("RULE1".to_string()), None]);
}

#[test]
fn violations_outside_ranges_are_untouched() {
    let plain = "x\nx\nx\nx";
    let fenced = "x\n/* tsqllint-disable */ x\nx /* tsqllint-enable */\nx";
    assert_eq!(flagged_lines(plain), vec![1, 2, 3, 4]);
    assert_eq!(flagged_lines(fenced), vec![1, 4]);
}

#[test]
fn repeated_disable_is_idempotent() {
    let once = "/* tsqllint-disable */\nx\n/* tsqllint-enable */\nx";
    let twice = "/* tsqllint-disable */\n/* tsqllint-disable */\nx\n/* tsqllint-enable */\nx";
    assert_eq!(flagged_lines(once), vec![4]);
    assert_eq!(flagged_lines(twice), vec![5]);
}

#[test]
fn dangling_enable_changes_nothing() {
    assert_eq!(flagged_lines("x\n/* tsqllint-enable flag-x */\nx"), vec![1, 3]);
}

#[test]
fn scope_applies_to_named_rule_only() {
    assert!(flagged_lines("/* tsqllint-disable FLAG-X */ x").is_empty());
    assert_eq!(flagged_lines("/* tsqllint-disable other */ x"), vec![1]);
}
