//! Client configuration
//!
//! Persisted as JSON under the user config directory, with environment
//! overrides for the API bases and the auth token.

use std::path::PathBuf;

use anyhow::Context;
use protocol::{DEFAULT_AUTH_API_BASE, DEFAULT_CHESS_API_BASE};
use serde::{Deserialize, Serialize};

/// Client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Room coordinator base URL
    pub chess_api_base: String,
    /// Auth service base URL
    pub auth_api_base: String,
    /// Bearer token presented to the auth service
    pub auth_token: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            chess_api_base: DEFAULT_CHESS_API_BASE.to_string(),
            auth_api_base: DEFAULT_AUTH_API_BASE.to_string(),
            auth_token: String::new(),
        }
    }
}

impl ClientConfig {
    /// Path of the persisted config file
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("portfolio-chess");
            path.push("client.json");
            path
        })
    }

    /// Load from disk, then apply environment overrides
    pub fn load() -> Self {
        let mut config = Self::load_file();
        config.apply_env();
        config
    }

    fn load_file() -> Self {
        let Some(path) = Self::config_path() else {
            tracing::warn!("Config directory unavailable, using defaults");
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config: {:?}", path);
                    config
                }
                Err(e) => {
                    tracing::warn!("Invalid config file: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Unreadable config file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    fn apply_env(&mut self) {
        if let Ok(base) = std::env::var("CHESS_API_BASE") {
            if !base.is_empty() {
                self.chess_api_base = base;
            }
        }
        if let Ok(base) = std::env::var("AUTH_API_BASE") {
            if !base.is_empty() {
                self.auth_api_base = base;
            }
        }
        if let Ok(token) = std::env::var("PORTFOLIO_AUTH_TOKEN") {
            if !token.is_empty() {
                self.auth_token = token;
            }
        }
    }

    /// Save to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(path) = Self::config_path() else {
            anyhow::bail!("Config directory unavailable");
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::info!("Saved config: {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.chess_api_base, "http://localhost:4010");
        assert_eq!(config.auth_api_base, "http://localhost:4001/api");
        assert!(config.auth_token.is_empty());
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.json");

        let config = ClientConfig {
            chess_api_base: "http://127.0.0.1:9010".to_string(),
            auth_api_base: "http://127.0.0.1:9001/api".to_string(),
            auth_token: "secret".to_string(),
        };
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded: ClientConfig =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.chess_api_base, "http://127.0.0.1:9010");
        assert_eq!(loaded.auth_token, "secret");
    }
}
