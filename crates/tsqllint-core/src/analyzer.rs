//! Project analyzer: file discovery and per-file pipeline orchestration.

use crate::config::Config;
use crate::context::FileContext;
use crate::lexer::{tokenize, LexError};
use crate::lint::lint_file;
use crate::rule::{Rule, RuleBox};
use crate::types::{FileReport, LexFailure, LintReport, LintResult};

use glob::Pattern;
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The token source rejected a file.
    #[error("Tokenizer error in {path}: {source}")]
    Lex {
        /// Path to the file that failed to tokenize.
        path: PathBuf,
        /// Underlying tokenizer error.
        source: LexError,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Directory walk error.
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Worker pool could not be created.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_lex_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file or directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer. Rules run in the order they are added.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds an include glob pattern.
    #[must_use]
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether a file the tokenizer rejects aborts the run (default: false).
    #[must_use]
    pub fn fail_on_lex_error(mut self, fail: bool) -> Self {
        self.fail_on_lex_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be resolved or a glob
    /// pattern is invalid.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let root = self.root.unwrap_or_else(|| PathBuf::from("."));
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let config = self.config.unwrap_or_default();

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.linter.exclude.iter().cloned());
        let mut include_patterns = self.include_patterns;
        include_patterns.extend(config.linter.include.iter().cloned());

        Ok(Analyzer {
            root,
            rules: self.rules,
            exclude: compile_patterns(&exclude_patterns)?,
            include: compile_patterns(&include_patterns)?,
            config,
            fail_on_lex_error: self.fail_on_lex_error,
        })
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>, AnalyzerError> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).map_err(AnalyzerError::from))
        .collect()
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    exclude: Vec<Pattern>,
    include: Vec<Pattern>,
    config: Config,
    fail_on_lex_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the file or directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the configuration in effect.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyzes all files and returns the results.
    ///
    /// Files are linted in parallel; the result lists them in path order.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails, or if a file
    /// cannot be tokenized and `fail_on_lex_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let files = self.discover_files()?;
        info!("Found {} files to analyze", files.len());

        let active = self.active_rules();
        let outcomes = self.run_files(&files, &active)?;

        let mut result = LintResult::new();
        for (path, outcome) in files.iter().zip(outcomes) {
            match outcome {
                Ok(report) => {
                    result.files.push(FileReport {
                        path: self.relative_path(path),
                        report,
                    });
                    result.files_checked += 1;
                }
                Err(AnalyzerError::Lex { path, source }) => {
                    warn!("Failed to tokenize {}: {}", path.display(), source);
                    if self.fail_on_lex_error {
                        return Err(AnalyzerError::Lex { path, source });
                    }
                    result.lex_failures.push(LexFailure {
                        path: self.relative_path(&path),
                        message: source.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Analysis complete: {} diagnostics in {} files",
            result.total_count(),
            result.files_checked
        );

        Ok(result)
    }

    /// Lints source text as if it were the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Lex`] if the text cannot be tokenized.
    pub fn analyze_source(&self, path: &Path, content: &str) -> Result<LintReport, AnalyzerError> {
        self.lint_content(path, content, &self.active_rules())
    }

    fn run_files(
        &self,
        files: &[PathBuf],
        active: &[&dyn Rule],
    ) -> Result<Vec<Result<LintReport, AnalyzerError>>, AnalyzerError> {
        let lint_all = || {
            files
                .par_iter()
                .map(|path| self.analyze_file(path, active))
                .collect()
        };

        match self.config.linter.parallelism {
            Some(1) => Ok(files
                .iter()
                .map(|path| self.analyze_file(path, active))
                .collect()),
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()?;
                Ok(pool.install(lint_all))
            }
            None => Ok(lint_all()),
        }
    }

    fn active_rules(&self) -> Vec<&dyn Rule> {
        self.rules
            .iter()
            .filter(|rule| {
                let enabled = self.config.is_rule_enabled(rule.name());
                if !enabled {
                    debug!("Skipping disabled rule: {}", rule.name());
                }
                enabled
            })
            .map(AsRef::as_ref)
            .collect()
    }

    /// Analyzes a single file and returns its report.
    fn analyze_file(&self, path: &Path, active: &[&dyn Rule]) -> Result<LintReport, AnalyzerError> {
        debug!("Analyzing: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        self.lint_content(path, &content, active)
    }

    fn lint_content(
        &self,
        path: &Path,
        content: &str,
        active: &[&dyn Rule],
    ) -> Result<LintReport, AnalyzerError> {
        let tokens = tokenize(content).map_err(|source| AnalyzerError::Lex {
            path: path.to_path_buf(),
            source,
        })?;
        let ctx = FileContext::new(path, self.base_dir(), &tokens);
        let report = lint_file(&ctx, active);
        Ok(self.apply_severity_override(report))
    }

    /// Applies severity overrides from configuration. Rule faults keep
    /// their severity.
    fn apply_severity_override(&self, mut report: LintReport) -> LintReport {
        for d in report.diagnostics.iter_mut().filter(|d| !d.is_fault()) {
            if let Some(severity) = self.config.rule_severity(&d.rule_name) {
                d.severity = severity;
            }
        }
        report
    }

    /// Discovers all SQL files to analyze, sorted by path.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let walker = WalkBuilder::new(&self.root)
            .standard_filters(self.config.linter.respect_gitignore)
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_some_and(|t| t.is_file()) || !is_sql_file(path) {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path should be skipped by the include/exclude patterns.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = self.relative_path(path);
        let matches = |pattern: &Pattern| pattern.matches_path(&relative) || pattern.matches_path(path);

        if self.exclude.iter().any(matches) {
            return true;
        }

        !self.include.is_empty() && !self.include.iter().any(matches)
    }

    fn base_dir(&self) -> &Path {
        if self.root.is_file() {
            self.root.parent().unwrap_or(&self.root)
        } else {
            &self.root
        }
    }

    fn relative_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(self.base_dir())
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
    }
}

fn is_sql_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("sql"))
}
