//! Configuration loading and management

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the config file looked up in the working directory
const LOCAL_CONFIG: &str = "glbulk.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the GitLab instance, e.g. `https://gitlab.example.com`
    pub gitlab_url: String,

    /// Private token sent with every API request
    pub gitlab_token: String,

    /// Branch policies applied by `set-protected`
    #[serde(default)]
    pub default_protected_branches: Vec<ProtectedBranchConfig>,
}

/// One protected-branch policy entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtectedBranchConfig {
    /// Branch name or wildcard, e.g. `main` or `release/*`
    pub name: String,

    /// Who may push to the branch
    pub push: AccessLevel,

    /// Who may merge into the branch
    pub merge: AccessLevel,
}

/// GitLab access level, configured by its descriptive name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessLevel {
    #[serde(rename = "No One")]
    NoOne,

    #[serde(rename = "Developers + Maintainers")]
    DevelopersMaintainers,

    #[serde(rename = "Maintainers")]
    Maintainers,
}

impl AccessLevel {
    /// Numeric access level used by the REST API
    pub fn api_level(self) -> u32 {
        match self {
            AccessLevel::NoOne => 0,
            AccessLevel::DevelopersMaintainers => 30,
            AccessLevel::Maintainers => 40,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from the standard locations.
    ///
    /// An explicit `--config` path wins; otherwise `glbulk.toml` in the
    /// working directory, then the global config file.
    pub fn load(config_override: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_override {
            return Self::from_file(path);
        }

        let local = PathBuf::from(LOCAL_CONFIG);
        if local.exists() {
            return Self::from_file(&local);
        }

        let global = Self::global_config_path();
        if global.exists() {
            return Self::from_file(&global);
        }

        anyhow::bail!(
            "No config file found: looked for ./{} and {}",
            LOCAL_CONFIG,
            global.display()
        )
    }

    /// Default global config location: `~/.config/glbulk/config.toml`
    pub fn global_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("glbulk")
            .join("config.toml")
    }

    /// Render the configuration as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}
