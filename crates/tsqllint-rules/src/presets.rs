//! Rule presets for common configurations.

use crate::{
    DisallowCursors, InformationSchema, KeywordCasing, LinkedServer, PrintStatement, SelectStar,
    UpperLower,
};
use std::fmt;
use std::str::FromStr;
use tsqllint_core::RuleBox;

/// Preset configurations for tsqllint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Recommended rules with sensible defaults.
    #[default]
    Recommended,
    /// Every built-in rule.
    Strict,
    /// Minimal rules for gradual adoption.
    Minimal,
}

impl Preset {
    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Strict => strict_rules(),
            Self::Minimal => minimal_rules(),
        }
    }

    /// Names of the rules in this preset, in execution order.
    #[must_use]
    pub fn rule_names(self) -> Vec<&'static str> {
        self.rules().iter().map(|r| r.name()).collect()
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recommended => write!(f, "recommended"),
            Self::Strict => write!(f, "strict"),
            Self::Minimal => write!(f, "minimal"),
        }
    }
}

/// Error returned for an unknown preset name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown preset `{0}` (expected recommended, strict or minimal)")]
pub struct UnknownPreset(pub String);

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "recommended" => Ok(Self::Recommended),
            "strict" => Ok(Self::Strict),
            "minimal" => Ok(Self::Minimal),
            _ => Err(UnknownPreset(s.to_string())),
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes every built-in rule except `upper-lower`.
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    vec![
        Box::new(KeywordCasing::new()),
        Box::new(SelectStar::new()),
        Box::new(PrintStatement::new()),
        Box::new(InformationSchema::new()),
        Box::new(DisallowCursors::new()),
        Box::new(LinkedServer::new()),
    ]
}

/// Returns the strict set of rules.
///
/// Includes all recommended rules plus:
/// - Stricter `select-star` (no exception for `EXISTS`)
/// - Stricter `print-statement` (no exception for test scripts)
/// - `upper-lower`
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    vec![
        Box::new(KeywordCasing::new()),
        Box::new(SelectStar::new().allow_in_exists(false)),
        Box::new(PrintStatement::new().allow_in_tests(false)),
        Box::new(InformationSchema::new()),
        Box::new(DisallowCursors::new()),
        Box::new(LinkedServer::new()),
        Box::new(UpperLower::new()),
    ]
}

/// Returns the minimal set of rules: only `keyword-casing`.
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![Box::new(KeywordCasing::new())]
}

/// Returns all available rules with default settings.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(KeywordCasing::new()),
        Box::new(SelectStar::new()),
        Box::new(PrintStatement::new()),
        Box::new(InformationSchema::new()),
        Box::new(DisallowCursors::new()),
        Box::new(LinkedServer::new()),
        Box::new(UpperLower::new()),
    ]
}
