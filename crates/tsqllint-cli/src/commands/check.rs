//! Check command implementation.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use tsqllint_core::{Analyzer, Config};
use tsqllint_rules::{resolve_rules, select_rules};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Exit status when diagnostics at or above `fail_on` were reported.
const EXIT_DIAGNOSTICS: u8 = 2;

/// Arguments of the check command.
pub struct CheckArgs {
    /// File or directory to lint.
    pub path: PathBuf,
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names, replacing the configured rule set.
    pub rules: Option<String>,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
    /// Preset overriding the config file.
    pub preset: Option<String>,
}

/// Loads the configuration named by `source`.
pub fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    }
    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

/// Runs the check command.
pub fn run(args: &CheckArgs, source: &ConfigSource) -> Result<ExitCode> {
    if check(args, source)? {
        return Ok(ExitCode::from(EXIT_DIAGNOSTICS));
    }
    Ok(ExitCode::SUCCESS)
}

/// Lints and prints the results. Returns true if any diagnostic reaches the
/// configured `fail_on` severity.
fn check(args: &CheckArgs, source: &ConfigSource) -> Result<bool> {
    let mut config = load_config(source)?;
    if let Some(preset) = &args.preset {
        config.preset = Some(preset.clone());
    }

    let rules = match &args.rules {
        Some(filter) => {
            let names: Vec<&str> = filter.split(',').map(str::trim).collect();
            select_rules(&names, &config)
        }
        None => resolve_rules(&config)?,
    };

    let fail_on = config.fail_on();
    let mut builder = Analyzer::builder().root(args.path.clone()).config(config);
    for pattern in &args.exclude {
        builder = builder.exclude(pattern.clone());
    }
    for rule in rules {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Linting {} with {} rules",
        args.path.display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, args.format, analyzer.root())?;

    Ok(result.has_violations_at(fail_on))
}
