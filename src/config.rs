use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{BumpError, Result};

/// Name of the configuration file looked up in the project and user config directory
pub const CONFIG_FILE: &str = "bump-version.toml";

/// Setting this environment variable to any value disables the final push.
pub const SKIP_PUSH_ENV: &str = "BUMP_VERSION_SKIP_PUSH";

/// Represents the complete configuration for bump-version.
///
/// Controls which branches may release, where releases are pushed, and
/// whether lockfiles are refreshed after a bump.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Branches on which releasing does not require extra confirmation
    #[serde(default = "default_release_branches")]
    pub release_branches: Vec<String>,

    /// Remote that receives the release commit and tag
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Push the commit and tag after creating them
    #[serde(default = "default_true")]
    pub push: bool,

    /// Run `uv sync` when a `uv.lock` sits next to pyproject.toml
    #[serde(default = "default_true")]
    pub sync_lockfile: bool,
}

/// Returns the default list of release branches.
fn default_release_branches() -> Vec<String> {
    vec!["main".to_string(), "master".to_string()]
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            release_branches: default_release_branches(),
            remote: default_remote(),
            push: true,
            sync_lockfile: true,
        }
    }
}

impl Config {
    /// Whether `branch` is one of the configured release branches
    pub fn is_release_branch(&self, branch: &str) -> bool {
        self.release_branches.iter().any(|b| b == branch)
    }

    /// Apply environment overrides (`BUMP_VERSION_SKIP_PUSH`).
    pub fn with_env_overrides(mut self) -> Self {
        if std::env::var_os(SKIP_PUSH_ENV).is_some() {
            tracing::debug!("{} set, push disabled", SKIP_PUSH_ENV);
            self.push = false;
        }
        self
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `bump-version.toml` in the project directory
/// 3. `bump-version.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// Environment overrides are applied on top of whichever source was used.
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `project_root` - Directory searched for a project-local config file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>, project_root: &Path) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        Some(fs::read_to_string(path).map_err(|e| {
            BumpError::config(format!("cannot read config file '{}': {}", path, e))
        })?)
    } else if project_root.join(CONFIG_FILE).is_file() {
        Some(fs::read_to_string(project_root.join(CONFIG_FILE))?)
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join(CONFIG_FILE);
        if user_config.is_file() {
            Some(fs::read_to_string(user_config)?)
        } else {
            None
        }
    } else {
        None
    };

    let config = match config_str {
        Some(content) => toml::from_str(&content)
            .map_err(|e| BumpError::config(format!("invalid {}: {}", CONFIG_FILE, e)))?,
        None => Config::default(),
    };

    Ok(config.with_env_overrides())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.is_release_branch("main"));
        assert!(config.is_release_branch("master"));
        assert!(!config.is_release_branch("develop"));
        assert_eq!(config.remote, "origin");
        assert!(config.push);
        assert!(config.sync_lockfile);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("remote = \"upstream\"\n").unwrap();
        assert_eq!(config.remote, "upstream");
        assert_eq!(config.release_branches, vec!["main", "master"]);
        assert!(config.push);
    }
}
