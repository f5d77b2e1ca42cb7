//! Local UI preferences (theme mode).

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::config::paths;
use crate::storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    /// Follow the platform setting.
    #[default]
    System,
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Light => write!(f, "light"),
            ThemeMode::Dark => write!(f, "dark"),
            ThemeMode::System => write!(f, "system"),
        }
    }
}

impl FromStr for ThemeMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            other => bail!("Unknown theme mode '{other}' (expected light, dark or system)"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme_mode: ThemeMode,
}

/// Preferences persisted as JSON.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open_default() -> Self {
        Self::new(paths::preferences_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads preferences; a missing file yields defaults.
    pub fn load(&self) -> Result<Preferences> {
        let Some(contents) = storage::read_optional(&self.path)? else {
            return Ok(Preferences::default());
        };
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse preferences from {}", self.path.display()))
    }

    pub fn save(&self, prefs: &Preferences) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(prefs).context("Failed to serialize preferences")?;
        storage::write_atomic(&self.path, contents.as_bytes())
    }

    pub fn theme_mode(&self) -> Result<ThemeMode> {
        Ok(self.load()?.theme_mode)
    }

    pub fn set_theme_mode(&self, mode: ThemeMode) -> Result<()> {
        let mut prefs = self.load()?;
        prefs.theme_mode = mode;
        self.save(&prefs)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_theme_defaults_to_system() {
        let dir = tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("preferences.json"));
        assert_eq!(store.theme_mode().unwrap(), ThemeMode::System);
    }

    #[test]
    fn test_set_theme_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        PreferenceStore::new(&path).set_theme_mode(ThemeMode::Dark).unwrap();

        assert_eq!(
            PreferenceStore::new(&path).theme_mode().unwrap(),
            ThemeMode::Dark
        );
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"dark\""));
    }

    #[test]
    fn test_parse_theme_mode() {
        assert_eq!("Light".parse::<ThemeMode>().unwrap(), ThemeMode::Light);
        assert_eq!(" system ".parse::<ThemeMode>().unwrap(), ThemeMode::System);
        assert!("sepia".parse::<ThemeMode>().is_err());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, r#"{"theme_mode": "light", "font": "large"}"#).unwrap();

        assert_eq!(PreferenceStore::new(path).theme_mode().unwrap(), ThemeMode::Light);
    }
}
