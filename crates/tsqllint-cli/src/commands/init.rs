//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "tsqllint.toml";

const DEFAULT_CONFIG: &str = r#"# tsqllint configuration

# Rule preset: recommended | strict | minimal
preset = "recommended"

# Lowest severity that makes `tsqllint check` exit with status 2
fail_on = "info"

[linter]
# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/bin/**",
]

# Respect .gitignore files
respect_gitignore = true

# Worker threads (default: one per CPU)
# parallelism = 4

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.keyword-casing]
enabled = true
# severity = "warning"
casing = "upper"

[rules.select-star]
allow_in_exists = true

[rules.print-statement]
allow_in_tests = true

# [rules.upper-lower]
# enabled = true
"#;

/// Runs the init command in the current directory.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("."), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: tsqllint check");

    Ok(())
}

fn write_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}
