//! Configuration for article-ledger

use crate::ledger::LedgerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config directory
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("article-ledger")
}

fn default_ledger_url() -> String {
    "http://localhost:8336".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_lang() -> String {
    "en".to_string()
}

/// Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the ledger node API
    #[serde(default = "default_ledger_url")]
    pub ledger_url: String,

    /// Bearer token for authenticated sessions
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Default article language
    #[serde(default = "default_lang")]
    pub lang: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger_url: default_ledger_url(),
            api_key: None,
            timeout_secs: default_timeout(),
            lang: default_lang(),
        }
    }
}

impl Config {
    /// Load config from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Save config to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), std::io::Error> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        default_config_dir().join("config.toml")
    }

    /// Ledger client settings derived from this config
    pub fn ledger(&self) -> LedgerConfig {
        LedgerConfig {
            base_url: self.ledger_url.clone(),
            api_key: self.api_key.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: Config = toml::from_str("ledger_url = \"http://node:9000\"").unwrap();
        assert_eq!(config.ledger_url, "http://node:9000");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.lang, "en");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.ledger_url = "http://example:1234".into();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.ledger_url, "http://example:1234");
        assert_eq!(loaded.timeout_secs, config.timeout_secs);
    }
}
