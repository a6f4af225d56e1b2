//! List rules command implementation.

use tsqllint_rules::{all_rules, Preset};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<22} {:<9} Description", "Name", "Severity");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<22} {:<9} {}",
            rule.name(),
            rule.default_severity().to_string(),
            rule.description()
        );
    }

    println!("\nPresets:");
    for preset in [Preset::Recommended, Preset::Strict, Preset::Minimal] {
        println!("  {:<12} - {}", preset.to_string(), preset.rule_names().join(", "));
    }

    println!("\nUse --rules to run specific rules, e.g.:");
    println!("  tsqllint check --rules keyword-casing,select-star");
    println!("\nSuppress a rule inside a script with:");
    println!("  /* tsqllint-disable keyword-casing */ ... /* tsqllint-enable keyword-casing */");
}
