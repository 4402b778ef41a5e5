use semver::Version;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseError, Result};

/// Represents the complete configuration for git-release.
///
/// Everything is optional; defaults reproduce the standard release format
/// (tag `v1.2.3`, commit `chore: bump version to 1.2.3`).
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,

    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    #[serde(default = "default_tag_message")]
    pub tag_message: String,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_tag_pattern() -> String {
    "v{version}".to_string()
}

fn default_commit_message() -> String {
    "chore: bump version to {version}".to_string()
}

fn default_tag_message() -> String {
    "Release {tag}".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            tag_pattern: default_tag_pattern(),
            commit_message: default_commit_message(),
            tag_message: default_tag_message(),
        }
    }
}

impl Config {
    /// Format the tag name for a version (e.g. "v{version}" -> "v1.2.3").
    pub fn format_tag(&self, version: &Version) -> String {
        self.tag_pattern.replace("{version}", &version.to_string())
    }

    /// Format the release commit message for a version.
    pub fn format_commit_message(&self, version: &Version) -> String {
        self.commit_message
            .replace("{version}", &version.to_string())
    }

    /// Format the annotated tag message for a tag name.
    pub fn format_tag_message(&self, tag: &str) -> String {
        self.tag_message.replace("{tag}", tag)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitrelease.toml` in current directory
/// 3. `.gitrelease.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./gitrelease.toml").exists() {
        fs::read_to_string("./gitrelease.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".gitrelease.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| ReleaseError::config(format!("cannot parse configuration: {}", e)))?;
    Ok(config)
}
