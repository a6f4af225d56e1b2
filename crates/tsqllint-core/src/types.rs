//! Core types for violations, diagnostics and results.

use crate::token::Token;
use miette::{Diagnostic as MietteDiagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown severity `{other}`")),
        }
    }
}

/// A violation reported by a single rule, before exemption filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawViolation {
    /// Name of the rule that produced this violation.
    pub rule_name: String,
    /// Short human-readable message.
    pub message: String,
    /// Exact source text that triggered the violation.
    pub trigger_text: String,
    /// Character offset of the first character.
    pub start_char: usize,
    /// Character offset of the last character (inclusive).
    pub stop_char: usize,
    /// Line (1-indexed).
    pub line: usize,
    /// Column (0-indexed).
    pub column: usize,
}

impl RawViolation {
    /// Creates a violation anchored to a single token.
    #[must_use]
    pub fn at_token(rule_name: impl Into<String>, message: impl Into<String>, token: &Token) -> Self {
        Self {
            rule_name: rule_name.into(),
            message: message.into(),
            trigger_text: token.text.clone(),
            start_char: token.start_char,
            stop_char: token.stop_char,
            line: token.line,
            column: token.column,
        }
    }

    /// Creates a violation spanning from the start of `first` to the end of
    /// `last`. The trigger text is the concatenation of `tokens`.
    #[must_use]
    pub fn spanning(
        rule_name: impl Into<String>,
        message: impl Into<String>,
        tokens: &[&Token],
    ) -> Option<Self> {
        let (first, last) = (tokens.first()?, tokens.last()?);
        Some(Self {
            rule_name: rule_name.into(),
            message: message.into(),
            trigger_text: tokens.iter().map(|t| t.text.as_str()).collect(),
            start_char: first.start_char,
            stop_char: last.stop_char,
            line: first.line,
            column: first.column,
        })
    }
}

/// What produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// A style violation reported by a rule.
    Violation,
    /// A rule that failed while checking the file.
    RuleFault,
}

/// A diagnostic that survived exemption filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Name of the rule that produced this diagnostic.
    pub rule_name: String,
    /// Human-readable message.
    pub message: String,
    /// Exact source text that triggered the diagnostic.
    pub trigger_text: String,
    /// Line (1-indexed).
    pub line: usize,
    /// Column (0-indexed).
    pub column: usize,
    /// Character offset of the first character.
    pub start_char: usize,
    /// Character offset of the last character (inclusive).
    pub stop_char: usize,
    /// Effective severity.
    pub severity: Severity,
    /// Violation or rule fault.
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Converts a surviving violation into a diagnostic.
    #[must_use]
    pub fn from_violation(violation: RawViolation, severity: Severity) -> Self {
        Self {
            rule_name: violation.rule_name,
            message: violation.message,
            trigger_text: violation.trigger_text,
            line: violation.line,
            column: violation.column,
            start_char: violation.start_char,
            stop_char: violation.stop_char,
            severity,
            kind: DiagnosticKind::Violation,
        }
    }

    /// Returns true if this diagnostic marks a failed rule.
    #[must_use]
    pub fn is_fault(&self) -> bool {
        self.kind == DiagnosticKind::RuleFault
    }

    /// Formats the diagnostic for terminal output.
    #[must_use]
    pub fn format(&self, file: &Path) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} at {}:{}:{}\n",
            self.rule_name,
            file.display(),
            self.line,
            self.column + 1,
        );
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if !self.trigger_text.is_empty() {
            let _ = writeln!(output, "  = found: {}", self.trigger_text);
        }
        output
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {} [{}] {}",
            self.line,
            self.column + 1,
            self.severity,
            self.rule_name,
            self.message
        )
    }
}

/// Renders a diagnostic with a source snippet through `miette`.
#[derive(Debug, thiserror::Error, MietteDiagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl ViolationDiagnostic {
    /// Builds a renderable diagnostic against the file's source text.
    ///
    /// Character offsets are converted to the byte offsets `miette` expects.
    #[must_use]
    pub fn new(diagnostic: &Diagnostic, source: &str) -> Self {
        let (span, help) = if diagnostic.is_fault() {
            (SourceSpan::from((0, 0)), None)
        } else {
            let start = byte_offset(source, diagnostic.start_char);
            let end = byte_offset(source, diagnostic.stop_char + 1);
            (
                SourceSpan::from((start, end.saturating_sub(start))),
                Some(format!(
                    "suppress with /* tsqllint-disable {} */",
                    diagnostic.rule_name
                )),
            )
        };
        Self {
            message: format!("[{}] {}", diagnostic.severity, diagnostic.message),
            help,
            span,
            label_message: diagnostic.rule_name.clone(),
        }
    }
}

fn byte_offset(source: &str, char_offset: usize) -> usize {
    source
        .char_indices()
        .nth(char_offset)
        .map_or(source.len(), |(i, _)| i)
}

/// Result of linting a single file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintReport {
    /// Diagnostics in document order.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of diagnostics; always equals `diagnostics.len()`.
    pub count: usize,
    /// Number of violations removed by exemption ranges.
    pub suppressed: usize,
}

impl LintReport {
    /// Creates a report, deriving `count` from the diagnostics.
    #[must_use]
    pub fn new(diagnostics: Vec<Diagnostic>, suppressed: usize) -> Self {
        Self {
            count: diagnostics.len(),
            diagnostics,
            suppressed,
        }
    }

    /// Returns true if no diagnostics were reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of rule-fault diagnostics.
    #[must_use]
    pub fn fault_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_fault()).count()
    }
}

/// Diagnostics for one analyzed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// File path relative to the analyzed root.
    pub path: PathBuf,
    /// Lint report for the file.
    pub report: LintReport,
}

/// A file the token source could not handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexFailure {
    /// File path relative to the analyzed root.
    pub path: PathBuf,
    /// Tokenizer message.
    pub message: String,
}

/// Result of running lint analysis over a project.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// Per-file reports, sorted by path. Files without diagnostics are kept.
    pub files: Vec<FileReport>,
    /// Number of files checked.
    pub files_checked: usize,
    /// Files that could not be tokenized.
    pub lex_failures: Vec<LexFailure>,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates over every diagnostic together with its file.
    pub fn diagnostics(&self) -> impl Iterator<Item = (&Path, &Diagnostic)> {
        self.files.iter().flat_map(|f| {
            f.report
                .diagnostics
                .iter()
                .map(move |d| (f.path.as_path(), d))
        })
    }

    /// Total number of diagnostics across all files.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.files.iter().map(|f| f.report.count).sum()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_violations_at(Severity::Error)
    }

    /// Checks if any diagnostic meets or exceeds the given severity.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.diagnostics().any(|(_, d)| d.severity >= severity)
    }

    /// Counts diagnostics by severity as `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |severity: Severity| {
            self.diagnostics()
                .filter(|(_, d)| d.severity == severity)
                .count()
        };
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }
}
