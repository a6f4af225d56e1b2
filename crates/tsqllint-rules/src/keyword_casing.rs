//! Rule to enforce a consistent casing for reserved T-SQL keywords.
//!
//! # Configuration
//!
//! - `casing`: `"upper"` (default) or `"lower"`
//!
//! # Example
//!
//! ```sql
//! select name from Products   -- `select` and `from` are reported
//! SELECT name FROM Products   -- ok
//! ```

use crate::sql::is_qualified;
use std::str::FromStr;
use tsqllint_core::{FileContext, RawViolation, Rule, RuleConfig, Severity, TokenKind};

/// Rule name for keyword-casing.
pub const NAME: &str = "keyword-casing";

/// Reserved words of T-SQL, upper-cased.
const KEYWORDS: &[&str] = &[
    "ADD", "ALL", "ALTER", "AND", "ANY", "AS", "ASC", "AUTHORIZATION", "BACKUP", "BEGIN",
    "BETWEEN", "BREAK", "BROWSE", "BULK", "BY", "CASCADE", "CASE", "CHECK", "CHECKPOINT", "CLOSE",
    "CLUSTERED", "COALESCE", "COLLATE", "COLUMN", "COMMIT", "COMPUTE", "CONSTRAINT", "CONTAINS",
    "CONTAINSTABLE", "CONTINUE", "CONVERT", "CREATE", "CROSS", "CURRENT", "CURRENT_DATE",
    "CURRENT_TIME", "CURRENT_TIMESTAMP", "CURRENT_USER", "CURSOR", "DATABASE", "DBCC",
    "DEALLOCATE", "DECLARE", "DEFAULT", "DELETE", "DENY", "DESC", "DISK", "DISTINCT",
    "DISTRIBUTED", "DOUBLE", "DROP", "DUMP", "ELSE", "END", "ERRLVL", "ESCAPE", "EXCEPT", "EXEC",
    "EXECUTE", "EXISTS", "EXIT", "EXTERNAL", "FETCH", "FILE", "FILLFACTOR", "FOR", "FOREIGN",
    "FREETEXT", "FREETEXTTABLE", "FROM", "FULL", "FUNCTION", "GOTO", "GRANT", "GROUP", "HAVING",
    "HOLDLOCK", "IDENTITY", "IDENTITYCOL", "IDENTITY_INSERT", "IF", "IN", "INDEX", "INNER",
    "INSERT", "INTERSECT", "INTO", "IS", "JOIN", "KEY", "KILL", "LEFT", "LIKE", "LINENO", "LOAD",
    "MERGE", "NATIONAL", "NOCHECK", "NONCLUSTERED", "NOT", "NULL", "NULLIF", "OF", "OFF",
    "OFFSETS", "ON", "OPEN", "OPENDATASOURCE", "OPENQUERY", "OPENROWSET", "OPENXML", "OPTION",
    "OR", "ORDER", "OUTER", "OVER", "PERCENT", "PIVOT", "PLAN", "PRECISION", "PRIMARY", "PRINT",
    "PROC", "PROCEDURE", "PUBLIC", "RAISERROR", "READ", "READTEXT", "RECONFIGURE", "REFERENCES",
    "REPLICATION", "RESTORE", "RESTRICT", "RETURN", "REVERT", "REVOKE", "RIGHT", "ROLLBACK",
    "ROWCOUNT", "ROWGUIDCOL", "RULE", "SAVE", "SCHEMA", "SECURITYAUDIT", "SELECT",
    "SESSION_USER", "SET", "SETUSER", "SHUTDOWN", "SOME", "STATISTICS", "SYSTEM_USER", "TABLE",
    "TABLESAMPLE", "TEXTSIZE", "THEN", "TO", "TOP", "TRAN", "TRANSACTION", "TRIGGER", "TRUNCATE",
    "TRY_CONVERT", "TSEQUAL", "UNION", "UNIQUE", "UNPIVOT", "UPDATE", "UPDATETEXT", "USE", "USER",
    "VALUES", "VARYING", "VIEW", "WAITFOR", "WHEN", "WHERE", "WHILE", "WITH", "WITHIN",
    "WRITETEXT",
];

/// Returns true if `word` is a reserved T-SQL keyword, in any casing.
#[must_use]
pub fn is_reserved_keyword(word: &str) -> bool {
    KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(word))
}

/// Expected keyword casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Casing {
    /// `SELECT`
    #[default]
    Upper,
    /// `select`
    Lower,
}

impl Casing {
    fn matches(self, word: &str) -> bool {
        match self {
            Self::Upper => !word.chars().any(char::is_lowercase),
            Self::Lower => !word.chars().any(char::is_uppercase),
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::Upper => "Expected TSQL keywords to be capitalized",
            Self::Lower => "Expected TSQL keywords to be lower case",
        }
    }
}

impl FromStr for Casing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "upper" => Ok(Self::Upper),
            "lower" => Ok(Self::Lower),
            other => Err(format!("unknown casing `{other}` (expected upper or lower)")),
        }
    }
}

/// Reports reserved keywords that do not use the expected casing.
#[derive(Debug, Clone)]
pub struct KeywordCasing {
    /// Expected casing.
    pub casing: Casing,
}

impl Default for KeywordCasing {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordCasing {
    /// Creates a new rule expecting upper-case keywords.
    #[must_use]
    pub fn new() -> Self {
        Self {
            casing: Casing::Upper,
        }
    }

    /// Creates the rule from its `[rules.keyword-casing]` table.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        let casing = config
            .get_str("casing", "upper")
            .parse()
            .unwrap_or_else(|e: String| {
                tracing::warn!("{NAME}: {e}, using upper");
                Casing::Upper
            });
        Self::new().casing(casing)
    }

    /// Sets the expected casing.
    #[must_use]
    pub fn casing(mut self, casing: Casing) -> Self {
        self.casing = casing;
        self
    }
}

impl Rule for KeywordCasing {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Reserved T-SQL keywords must use a consistent casing"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &FileContext) -> Vec<RawViolation> {
        let sig = ctx.tokens.significant_tokens();

        sig.iter()
            .enumerate()
            .filter(|(i, t)| {
                t.kind == TokenKind::Word
                    && is_reserved_keyword(&t.text)
                    && !self.casing.matches(&t.text)
                    && !is_qualified(&sig, *i)
            })
            .map(|(_, t)| RawViolation::at_token(NAME, self.casing.message(), t))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsqllint_core::{tokenize, Config};

    fn triggers(rule: &KeywordCasing, sql: &str) -> Vec<String> {
        let tokens = tokenize(sql).unwrap();
        rule.check(&FileContext::anonymous(&tokens))
            .into_iter()
            .map(|v| v.trigger_text)
            .collect()
    }

    #[test]
    fn flags_lower_case_keywords() {
        let sql = "select name from Products where id = 1 AND true";
        assert_eq!(
            triggers(&KeywordCasing::new(), sql),
            vec!["select", "from", "where"]
        );
    }

    #[test]
    fn mixed_case_is_flagged_in_both_modes() {
        let lower = KeywordCasing::new().casing(Casing::Lower);
        assert_eq!(triggers(&lower, "Select 1 from t"), vec!["Select"]);
        assert_eq!(triggers(&KeywordCasing::new(), "Select 1 FROM t"), vec!["Select"]);
    }

    #[test]
    fn ignores_identifiers_strings_and_comments() {
        let sql = "SELECT [select], @from, t.key, 'where' -- select\nFROM t";
        assert!(triggers(&KeywordCasing::new(), sql).is_empty());
    }

    #[test]
    fn reports_position_of_keyword() {
        let tokens = tokenize("SELECT 1\n  from t").unwrap();
        let violations = KeywordCasing::new().check(&FileContext::anonymous(&tokens));
        assert_eq!(violations.len(), 1);
        assert_eq!((violations[0].line, violations[0].column), (2, 2));
        assert_eq!(violations[0].message, "Expected TSQL keywords to be capitalized");
    }

    #[test]
    fn from_config_reads_casing() {
        let config = Config::parse(
            "[rules.keyword-casing]\ncasing = \"lower\"\n[rules.other]\ncasing = \"title\"\n",
        )
        .unwrap();
        let lower = KeywordCasing::from_config(&config.rules["keyword-casing"]);
        assert_eq!(lower.casing, Casing::Lower);
        let fallback = KeywordCasing::from_config(&config.rules["other"]);
        assert_eq!(fallback.casing, Casing::Upper);
    }

    #[test]
    fn keyword_lookup_is_case_insensitive() {
        assert!(is_reserved_keyword("Select"));
        assert!(is_reserved_keyword("raiserror"));
        assert!(!is_reserved_keyword("name"));
        assert!(!is_reserved_keyword("true"));
    }
}
