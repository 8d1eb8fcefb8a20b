//! Configuration Management
//!
//! Persistent settings for the `hcloud` command: API token and endpoint.

use crate::http::DEFAULT_BASE_URL;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "HCLOUD_TOKEN";

/// Environment variable overriding the API root
pub const ENDPOINT_ENV: &str = "HCLOUD_ENDPOINT";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Project API token
    #[serde(default)]
    pub token: Option<String>,
    /// API root, production when unset
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hcloud").join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from `path`, falling back to defaults when the
    /// file is missing or unreadable
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("Failed to read config {}: {}", path.display(), e);
                Self::default()
            },
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    /// Save configuration to `path`, creating parent directories.
    /// On Unix the file is readable by its owner only.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to encode config")?;

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options
            .open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        // `mode` only applies on creation
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("Failed to restrict {}", path.display()))?;
        }

        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }

    /// Get effective token (CLI/env > config)
    pub fn effective_token(&self, cli: Option<&str>) -> Option<String> {
        non_empty(cli)
            .or_else(|| non_empty(self.token.as_deref()))
            .map(str::to_string)
    }

    /// Get effective endpoint (CLI/env > config > production)
    pub fn effective_endpoint(&self, cli: Option<&str>) -> String {
        non_empty(cli)
            .or_else(|| non_empty(self.endpoint.as_deref()))
            .unwrap_or(DEFAULT_BASE_URL)
            .to_string()
    }

    /// Token as shown by `config show`
    pub fn masked_token(&self) -> String {
        match &self.token {
            Some(token) if token.chars().count() > 8 => {
                let tail = token
                    .char_indices()
                    .rev()
                    .nth(3)
                    .map(|(i, _)| &token[i..])
                    .unwrap_or_default();
                format!("****{}", tail)
            },
            Some(_) => "****".to_string(),
            None => "(not set)".to_string(),
        }
    }
}

/// Empty flags and variables count as unset
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
