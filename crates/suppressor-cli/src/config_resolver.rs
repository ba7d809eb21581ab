//! Locating the suppressor configuration file.
//!
//! Candidates are tried in this order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `suppressor.toml` or `.suppressor.toml` in the working directory
//! 3. `config.toml` in the user config directory (`~/.suppressor/`)
//! 4. No config found → defaults

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the working directory.
    Project(PathBuf),
    /// Found in the user config directory.
    User(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::User(p) => Some(p),
            Self::Default => None,
        }
    }
}

/// Config file names looked up in the working directory, in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["suppressor.toml", ".suppressor.toml"];

/// Config file name within the user config directory.
const USER_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file path.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(project_dir, explicit, user_config_dir())
}

fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    user_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    for name in PROJECT_CONFIG_NAMES {
        let candidate = project_dir.join(name);
        if candidate.exists() {
            tracing::debug!("Found project config: {}", candidate.display());
            return ConfigSource::Project(candidate);
        }
    }

    if let Some(dir) = user_dir {
        let candidate = dir.join(USER_CONFIG_NAME);
        if candidate.exists() {
            tracing::debug!("Found user config: {}", candidate.display());
            return ConfigSource::User(candidate);
        }
    }

    ConfigSource::Default
}

/// Returns the user config directory: `$SUPPRESSOR_CONFIG_DIR`, else
/// `~/.suppressor/`.
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("SUPPRESSOR_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".suppressor"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_takes_priority_over_project() {
        let tmp = TempDir::new().unwrap();
        let explicit = tmp.path().join("custom.toml");
        fs::write(&explicit, "").unwrap();
        fs::write(tmp.path().join("suppressor.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), Some(&explicit), None);
        assert_eq!(result, ConfigSource::Explicit(explicit));
    }

    #[test]
    fn project_config_found() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".suppressor.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(tmp.path().join(".suppressor.toml"))
        );
    }

    #[test]
    fn plain_name_preferred_over_dot_prefix() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("suppressor.toml"), "").unwrap();
        fs::write(tmp.path().join(".suppressor.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(tmp.path().join("suppressor.toml"))
        );
    }

    #[test]
    fn user_fallback_when_no_project_config() {
        let project = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        fs::write(user.path().join("config.toml"), "").unwrap();

        let result = resolve_inner(project.path(), None, Some(user.path().to_path_buf()));
        assert_eq!(result, ConfigSource::User(user.path().join("config.toml")));
    }

    #[test]
    fn no_config_anywhere_returns_default() {
        let project = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();

        let result = resolve_inner(project.path(), None, Some(user.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Default);
        assert!(result.path().is_none());
    }
}
