//! Rule to forbid linked server queries.
//!
//! A four-part name (`server.database.schema.object`) runs the statement
//! through a linked server. Omitted parts still count, so
//! `server.database..object` is reported too.

use crate::sql::is_name;
use tsqllint_core::{FileContext, RawViolation, Rule, Severity};

/// Rule name for linked-server.
pub const NAME: &str = "linked-server";

/// Forbids four-part object names.
#[derive(Debug, Clone, Default)]
pub struct LinkedServer;

impl LinkedServer {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for LinkedServer {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids linked server calls through four-part names"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &FileContext) -> Vec<RawViolation> {
        let sig = ctx.tokens.significant_tokens();
        let mut violations = Vec::new();

        let mut i = 0;
        while i < sig.len() {
            if !is_name(sig[i]) {
                i += 1;
                continue;
            }

            let mut dots = 0;
            let mut last = i;
            let mut j = i + 1;
            while let Some(&next) = sig.get(j) {
                if next.is_symbol(".") {
                    dots += 1;
                } else if !(sig[j - 1].is_symbol(".") && is_name(next)) {
                    break;
                }
                last = j;
                j += 1;
            }

            if dots >= 3 && is_name(sig[last]) {
                violations.extend(RawViolation::spanning(
                    NAME,
                    "Unexpected linked server call through a four-part name",
                    &sig[i..=last],
                ));
            }
            i = last + 1;
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
        LinkedServer::new()
            .check(&FileContext::anonymous(&tokens))
            .into_iter()
            .map(|v| v.trigger_text)
            .collect()
    }

    #[test]
    fn flags_four_part_names() {
        assert_eq!(
            triggers("SELECT id FROM remote.Sales.dbo.Orders o"),
            vec!["remote.Sales.dbo.Orders"]
        );
        assert_eq!(
            triggers("SELECT id FROM [remote].[Sales]..[Orders]"),
            vec!["[remote].[Sales]..[Orders]"]
        );
    }

    #[test]
    fn allows_three_part_names() {
        assert!(triggers("SELECT o.id FROM Sales.dbo.Orders o").is_empty());
        assert!(triggers("SELECT id FROM Sales..Orders").is_empty());
    }
}
