//! Output formatting for lint results.

use anyhow::{Context, Result};
use miette::{NamedSource, Report};
use std::path::Path;
use tsqllint_core::{Diagnostic, FileReport, LintResult, Severity, ViolationDiagnostic};

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `root` is the analyzed file or directory; the pretty format reads sources
/// relative to it.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Pretty => return print_pretty(result, root),
    }
    Ok(())
}

fn severity_indicator(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31merror\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
        Severity::Info => "\x1b[34minfo\x1b[0m",
    }
}

fn print_text(result: &LintResult) {
    for file in &result.files {
        for d in &file.report.diagnostics {
            println!("{}", d.format(&file.path));
        }
        if let Some(line) = file_count_line(file) {
            println!("{line}");
        }
    }

    for failure in &result.lex_failures {
        println!(
            "{}: could not tokenize {}: {}",
            severity_indicator(Severity::Error),
            failure.path.display(),
            failure.message
        );
    }

    print_summary(result);
}

/// Per-file tally printed after a file's diagnostics; `None` for clean files.
fn file_count_line(file: &FileReport) -> Option<String> {
    (file.report.count > 0).then(|| {
        format!(
            "{} errors detected in {}",
            file.report.count,
            file.path.display()
        )
    })
}

fn print_summary(result: &LintResult) {
    let (errors, warnings, infos) = result.count_by_severity();
    let suppressed: usize = result.files.iter().map(|f| f.report.suppressed).sum();

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s) ({} suppressed)\x1b[0m",
        summary_color, errors, warnings, infos, result.files_checked, suppressed
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn compact_line(path: &Path, d: &Diagnostic) -> String {
    format!(
        "{}:{}:{}: {} [{}] {}",
        path.display(),
        d.line,
        d.column + 1,
        d.severity,
        d.rule_name,
        d.message,
    )
}

fn print_compact(result: &LintResult) {
    for (path, d) in result.diagnostics() {
        println!("{}", compact_line(path, d));
    }
}

fn print_pretty(result: &LintResult, root: &Path) -> Result<()> {
    let base = if root.is_file() {
        root.parent().unwrap_or(root)
    } else {
        root
    };

    for file in result.files.iter().filter(|f| !f.report.is_empty()) {
        let full_path = base.join(&file.path);
        let source = std::fs::read_to_string(&full_path)
            .with_context(|| format!("Failed to read {}", full_path.display()))?;
        let name = file.path.display().to_string();

        for d in &file.report.diagnostics {
            let report = Report::new(ViolationDiagnostic::new(d, &source))
                .with_source_code(NamedSource::new(name.clone(), source.clone()));
            println!("{report:?}");
        }
    }

    print_summary(result);
    Ok(())
}
