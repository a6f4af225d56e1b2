//! # tsqllint-core
//!
//! Core lint pipeline for T-SQL source files.
//!
//! A file is linted in four stages:
//!
//! - [`exemption::scan_exemptions`] turns `tsqllint-disable` / `tsqllint-enable`
//!   comments into character ranges
//! - [`runner::run_rules`] runs each [`Rule`] once, isolating panics as
//!   [`RuleFault`]s
//! - [`exemption::ExemptionIndex`] drops violations whose start offset lies in
//!   an applicable range
//! - [`lint::aggregate`] orders the survivors by position into a [`LintReport`]
//!
//! [`Analyzer`] drives the pipeline over a directory tree.
//!
//! ## Example
//!
//! ```ignore
//! use tsqllint_core::{Analyzer, Config};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./sql")
//!     .rule(MyRule)
//!     .config(Config::from_file("tsqllint.toml".as_ref())?)
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! println!("{} diagnostics", result.total_count());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod rule;
mod token;
mod types;

pub mod exemption;
pub mod lexer;
pub mod lint;
pub mod runner;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{Config, ConfigError, LinterConfig, RuleConfig};
pub use context::FileContext;
pub use exemption::{ExemptionIndex, ExemptionRange};
pub use lexer::{tokenize, LexError};
pub use lint::{lint, lint_file, lint_source};
pub use rule::{Rule, RuleBox};
pub use runner::RuleFault;
pub use token::{Channel, Token, TokenKind, TokenView};
pub use types::{
    Diagnostic, DiagnosticKind, FileReport, LexFailure, LintReport, LintResult, RawViolation,
    Severity, ViolationDiagnostic,
};
