//! Configuration file resolution with global fallback.
//!
//! Resolves the configuration file path using a deterministic priority order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `{project}/tsqllint.toml` or `{project}/.tsqllintrc`
//! 3. `$TSQLLINT_CONFIG_DIR/config.toml` or `~/.tsqllint/config.toml`
//! 4. No config found → defaults

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Loaded from the global config directory.
    Global(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config was loaded from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["tsqllint.toml", ".tsqllintrc"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Environment variable overriding the global config directory.
const CONFIG_DIR_ENV: &str = "TSQLLINT_CONFIG_DIR";

/// Resolves the configuration file path.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_with_global(project_dir, explicit, global_config_dir())
}

fn resolve_with_global(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(candidate) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!("Found project config: {}", candidate.display());
        return ConfigSource::Project(candidate);
    }

    match global_dir.map(|dir| dir.join(GLOBAL_CONFIG_NAME)) {
        Some(candidate) if candidate.is_file() => {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        }
        _ => ConfigSource::Default,
    }
}

/// Returns the global config directory: `$TSQLLINT_CONFIG_DIR`, else
/// `~/.tsqllint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".tsqllint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_wins_and_is_not_checked() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("tsqllint.toml"), "").unwrap();

        let result = resolve_with_global(
            project.path(),
            Some(Path::new("/nonexistent.toml")),
            None,
        );
        assert_eq!(
            result,
            ConfigSource::Explicit(PathBuf::from("/nonexistent.toml"))
        );
    }

    #[test]
    fn project_names_in_priority_order() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".tsqllintrc"), "").unwrap();
        assert_eq!(
            resolve_with_global(tmp.path(), None, None),
            ConfigSource::Project(tmp.path().join(".tsqllintrc"))
        );

        fs::write(tmp.path().join("tsqllint.toml"), "").unwrap();
        assert_eq!(
            resolve_with_global(tmp.path(), None, None),
            ConfigSource::Project(tmp.path().join("tsqllint.toml"))
        );
    }

    #[test]
    fn global_fallback_when_no_project_config() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let result =
            resolve_with_global(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(
            result,
            ConfigSource::Global(global.path().join("config.toml"))
        );
        assert!(result.is_global());
    }

    #[test]
    fn project_config_shadows_global() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("tsqllint.toml"), "").unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let result =
            resolve_with_global(project.path(), None, Some(global.path().to_path_buf()));
        assert!(matches!(result, ConfigSource::Project(_)));
    }

    #[test]
    fn defaults_when_nothing_found() {
        let project = TempDir::new().unwrap();
        let empty_global = TempDir::new().unwrap();

        let result = resolve_with_global(
            project.path(),
            None,
            Some(empty_global.path().to_path_buf()),
        );
        assert_eq!(result, ConfigSource::Default);
        assert!(result.path().is_none());
        assert!(!result.is_global());
    }
}
