//! Configuration for satwatch.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Bitcoin network to query and to generate keys for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Bitcoin testnet (testnet3).
    #[default]
    Test,
    /// Bitcoin mainnet.
    Production,
}

impl Network {
    /// Chain segment used in BlockCypher paths (`/v1/btc/{segment}/...`).
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Test => "test3",
            Self::Production => "main",
        }
    }

    /// The matching `bitcoin` crate network.
    #[must_use]
    pub const fn bitcoin_network(self) -> bitcoin::Network {
        match self {
            Self::Test => bitcoin::Network::Testnet,
            Self::Production => bitcoin::Network::Bitcoin,
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Test => f.write_str("test"),
            Self::Production => f.write_str("production"),
        }
    }
}

/// Transaction-history provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the BlockCypher-compatible API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Network to query.
    #[serde(default)]
    pub network: Network,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of transactions the provider should return.
    #[serde(default)]
    pub limit: Option<u32>,

    /// API token, sent as the `token` query parameter.
    #[serde(default)]
    pub token: Option<String>,
}

impl ProviderConfig {
    /// Request timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            network: Network::default(),
            timeout_secs: default_timeout_secs(),
            limit: None,
            token: None,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Provider configuration.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            log_level: default_log_level(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.blockcypher.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Default location of the configuration file, if the platform has one.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "satwatch")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn to_file(&self, path: &Path) -> crate::Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
