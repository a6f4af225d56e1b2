//! Name-based rule lookup and config-driven rule selection.

use crate::presets::{all_rules, Preset, UnknownPreset};
use crate::{
    disallow_cursors, information_schema, keyword_casing, linked_server, print_statement,
    select_star, upper_lower, DisallowCursors, InformationSchema, KeywordCasing, LinkedServer,
    PrintStatement, SelectStar, UpperLower,
};
use tsqllint_core::{Config, RuleBox, RuleConfig};
use tracing::{debug, warn};

/// Builds the rule called `name`, applying its options.
///
/// Returns `None` for an unknown name.
#[must_use]
pub fn rule_by_name(name: &str, config: &RuleConfig) -> Option<RuleBox> {
    let rule: RuleBox = match name {
        keyword_casing::NAME => Box::new(KeywordCasing::from_config(config)),
        select_star::NAME => Box::new(SelectStar::from_config(config)),
        print_statement::NAME => Box::new(PrintStatement::from_config(config)),
        information_schema::NAME => Box::new(InformationSchema::new()),
        disallow_cursors::NAME => Box::new(DisallowCursors::new()),
        linked_server::NAME => Box::new(LinkedServer::new()),
        upper_lower::NAME => Box::new(UpperLower::new()),
        _ => return None,
    };
    Some(rule)
}

/// Names of every built-in rule, sorted.
#[must_use]
pub fn all_rule_names() -> Vec<&'static str> {
    let mut names: Vec<_> = all_rules().iter().map(|r| r.name()).collect();
    names.sort_unstable();
    names
}

/// Resolves the active rule set from configuration.
///
/// Starts from the configured preset (recommended by default). Rules with a
/// `[rules.<name>]` table carrying options are rebuilt with those options, and
/// rules outside the preset are added when explicitly `enabled = true`.
///
/// # Errors
///
/// Returns [`UnknownPreset`] if the configured preset does not exist.
pub fn resolve_rules(config: &Config) -> Result<Vec<RuleBox>, UnknownPreset> {
    let preset = match config.preset.as_deref() {
        Some(name) => name.parse()?,
        None => Preset::default(),
    };
    debug!("Resolving rules from preset {preset}");

    let mut rules: Vec<RuleBox> = preset
        .rules()
        .into_iter()
        .map(|rule| match config.rules.get(rule.name()) {
            Some(rule_config) if !rule_config.options.is_empty() => {
                rule_by_name(rule.name(), rule_config).unwrap_or(rule)
            }
            _ => rule,
        })
        .collect();

    let mut extra: Vec<(&String, &RuleConfig)> = config
        .rules
        .iter()
        .filter(|(_, c)| c.enabled == Some(true))
        .filter(|(name, _)| !rules.iter().any(|r| r.name() == name.as_str()))
        .collect();
    extra.sort_by(|a, b| a.0.cmp(b.0));

    for (name, rule_config) in extra {
        match rule_by_name(name, rule_config) {
            Some(rule) => rules.push(rule),
            None => warn!("Unknown rule in config: {}", name),
        }
    }

    Ok(rules)
}

/// Builds the named rules in the given order, applying options from
/// `config`. Unknown names are logged and skipped.
#[must_use]
pub fn select_rules(names: &[&str], config: &Config) -> Vec<RuleBox> {
    let default = RuleConfig::default();
    names
        .iter()
        .filter_map(|name| {
            let rule = rule_by_name(name, config.rules.get(*name).unwrap_or(&default));
            if rule.is_none() {
                warn!("Unknown rule: {}", name);
            }
            rule
        })
        .collect()
}
