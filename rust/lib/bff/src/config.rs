//! Client configuration.
//!
//! Reads/writes `~/.clover/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BffError, Result};

/// Client configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend base URL (e.g. "http://localhost:8080").
    pub api_url: String,

    /// Quiet period before a search keystroke hits the network.
    pub search_debounce_ms: u64,

    /// Viewport widths at or below this are mobile.
    pub mobile_breakpoint: u32,

    /// Session file. Empty means `~/.clover/session.json`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub session_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            search_debounce_ms: 500,
            mobile_breakpoint: 640,
            session_path: String::new(),
        }
    }
}

impl ClientConfig {
    /// Default config file path: ~/.clover/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| BffError::Config(format!("read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| BffError::Config(format!("parse {}: {}", path.display(), e)))
    }

    /// Save config to disk.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| BffError::Config(format!("create {}: {}", parent.display(), e)))?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| BffError::Config(e.to_string()))?;
        std::fs::write(path, content)
            .map_err(|e| BffError::Config(format!("write {}: {}", path.display(), e)))
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn session_file(&self) -> PathBuf {
        if self.session_path.is_empty() {
            dirs_path().join("session.json")
        } else {
            PathBuf::from(&self.session_path)
        }
    }
}

/// Return the Clover config directory (~/.clover).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".clover")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.search_debounce(), Duration::from_millis(500));
        assert_eq!(config.mobile_breakpoint, 640);
        assert!(config.session_file().ends_with(".clover/session.json"));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::load(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_url = \"https://api.clover.social\"\n").unwrap();

        let config = ClientConfig::load(&path).unwrap();
        assert_eq!(config.api_url, "https://api.clover.social");
        assert_eq!(config.search_debounce_ms, 500);
    }

    #[test]
    fn test_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = ClientConfig {
            search_debounce_ms: 250,
            session_path: "/tmp/clover-session.json".to_string(),
            ..ClientConfig::default()
        };
        config.save(&path).unwrap();

        let back = ClientConfig::load(&path).unwrap();
        assert_eq!(back, config);
        assert_eq!(back.session_file(), PathBuf::from("/tmp/clover-session.json"));
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "search_debounce_ms = \"soon\"").unwrap();

        let err = ClientConfig::load(&path).unwrap_err();
        assert!(matches!(err, BffError::Config(_)));
    }
}
