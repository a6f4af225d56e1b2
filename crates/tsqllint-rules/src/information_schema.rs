//! Rule to forbid `INFORMATION_SCHEMA` views.
//!
//! The `INFORMATION_SCHEMA` views omit SQL Server specific metadata; the `sys`
//! catalog views should be queried instead.

use crate::sql::{is_name, unquote};
use tsqllint_core::{FileContext, RawViolation, Rule};

/// Rule name for information-schema.
pub const NAME: &str = "information-schema";

const MESSAGE: &str = "Expected sys catalog views rather than INFORMATION_SCHEMA views";

/// Forbids references to `INFORMATION_SCHEMA`.
#[derive(Debug, Clone, Default)]
pub struct InformationSchema;

impl InformationSchema {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for InformationSchema {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids INFORMATION_SCHEMA views in favour of sys catalog views"
    }

    fn check(&self, ctx: &FileContext) -> Vec<RawViolation> {
        let sig = ctx.tokens.significant_tokens();
        let mut violations = Vec::new();

        for (i, &token) in sig.iter().enumerate() {
            if !is_name(token) || !unquote(&token.text).eq_ignore_ascii_case("INFORMATION_SCHEMA") {
                continue;
            }

            // Report `INFORMATION_SCHEMA.<view>` as one span when the view is named.
            let span = match (sig.get(i + 1), sig.get(i + 2)) {
                (Some(&dot), Some(&view)) if dot.is_symbol(".") && is_name(view) => {
                    vec![token, dot, view]
                }
                _ => vec![token],
            };
            violations.extend(RawViolation::spanning(NAME, MESSAGE, &span));
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsqllint_core::tokenize;

    fn triggers(sql: &str) -> Vec<String> {
        let tokens = tokenize(sql).unwrap();
        InformationSchema::new()
            .check(&FileContext::anonymous(&tokens))
            .into_iter()
            .map(|v| v.trigger_text)
            .collect()
    }

    #[test]
    fn flags_view_references() {
        assert_eq!(
            triggers("SELECT * FROM INFORMATION_SCHEMA.TABLES"),
            vec!["INFORMATION_SCHEMA.TABLES"]
        );
        assert_eq!(
            triggers("SELECT * FROM [information_schema].[columns]"),
            vec!["[information_schema].[columns]"]
        );
    }

    #[test]
    fn ignores_strings_and_sys_views() {
        assert!(triggers("SELECT 'INFORMATION_SCHEMA' FROM sys.tables").is_empty());
    }
}
