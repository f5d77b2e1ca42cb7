//! Configuration management for Lifeguide.
//!
//! Loads configuration from ${LIFEGUIDE_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::storage;

/// Environment variable overriding `api_base_url`.
pub const API_URL_ENV: &str = "LIFEGUIDE_API_URL";

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
/// To update, edit default_config.toml directly or run `cargo xtask update-default-config`.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for Lifeguide configuration and data directories.
    //!
    //! LIFEGUIDE_HOME resolution order:
    //! 1. LIFEGUIDE_HOME environment variable (if set)
    //! 2. ~/.config/lifeguide (default)
    //! 3. ./.lifeguide when no home directory can be determined

    use std::path::PathBuf;

    pub fn lifeguide_home() -> PathBuf {
        if let Ok(home) = std::env::var("LIFEGUIDE_HOME")
            && !home.trim().is_empty()
        {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".lifeguide"),
            |h| h.join(".config").join("lifeguide"),
        )
    }

    pub fn config_path() -> PathBuf {
        lifeguide_home().join("config.toml")
    }

    /// Token record written by the session exchange.
    pub fn session_path() -> PathBuf {
        lifeguide_home().join("session.json")
    }

    pub fn cache_dir() -> PathBuf {
        lifeguide_home().join("cache")
    }

    pub fn preferences_path() -> PathBuf {
        lifeguide_home().join("preferences.json")
    }

    pub fn logs_dir() -> PathBuf {
        lifeguide_home().join("logs")
    }
}

/// Login flow configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginConfig {
    /// Delay before the session identifier is read from a redirect URL.
    pub extract_delay_ms: u64,
}

/// Search input configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub min_query_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_query_len: 2,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the API server, without the `/api` prefix
    pub api_base_url: String,

    /// Request timeout in seconds (0 uses the client default)
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub login: LoginConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

impl Config {
    const DEFAULT_API_BASE_URL: &str = "http://localhost:8001";

    /// Loads configuration from the default config path, then applies env overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            let trimmed = url.trim();
            if !trimmed.is_empty() {
                self.api_base_url = trimmed.to_string();
            }
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.request_timeout_secs))
        }
    }

    pub fn extract_delay(&self) -> Duration {
        Duration::from_millis(self.login.extract_delay_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        storage::write_atomic(path, default_config_template().as_bytes())
    }

    /// Generates a fresh config TOML from Rust defaults.
    ///
    /// Uses the embedded template for structure/comments and merges
    /// generated values from `Config::default()` into it.
    pub fn generate() -> Result<String> {
        use toml_edit::DocumentMut;

        let generated_toml = toml::to_string(&Config::default())
            .context("Failed to serialize default config to TOML")?;

        let mut doc: DocumentMut = default_config_template()
            .parse()
            .context("Failed to parse default config template")?;
        let generated_doc: DocumentMut = generated_toml
            .parse()
            .context("Failed to parse generated config")?;

        merge_items(doc.as_table_mut(), generated_doc.as_table());

        Ok(doc.to_string())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Self::DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 0,
            login: LoginConfig::default(),
            search: SearchConfig::default(),
        }
    }
}
