use crate::constants::{
    DEFAULT_EXPORT_PATH, DEFAULT_PRICE_DB, DEFAULT_PRODUCT_URL, DEFAULT_SCANNER_URL,
    DEFAULT_USER_AGENT,
};
use crate::error::{Result, ScreenerError};
use crate::types::NormalizeMode;
use serde::Deserialize;
use std::env::VarError;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

pub const CONFIG_PATH_ENV: &str = "TV_SCREENER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub screener: ScreenerConfig,
    pub normalizer: NormalizerConfig,
    pub export: ExportConfig,
    pub price: PriceConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub metrics_port: Option<u16>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            metrics_port: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScreenerConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SCANNER_URL.to_string(),
            timeout_seconds: 30,
        }
    }
}

impl ScreenerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    pub mode: NormalizeMode,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub path: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_EXPORT_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PriceConfig {
    pub product_url: String,
    pub database_path: String,
    pub timeout_seconds: u64,
    pub accept_invalid_certs: bool,
    pub user_agent: String,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            product_url: DEFAULT_PRODUCT_URL.to_string(),
            database_path: DEFAULT_PRICE_DB.to_string(),
            timeout_seconds: 10,
            accept_invalid_certs: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl PriceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    /// Loads the file named by `TV_SCREENER_CONFIG`, or `config.toml`.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path(std::env::var(CONFIG_PATH_ENV))?)
    }

    /// A missing file means defaults; an unreadable or invalid one is an error.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            ScreenerError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

/// Unset falls back to `config.toml`; a value that is not UTF-8 is an error.
fn config_path(var: std::result::Result<String, VarError>) -> Result<String> {
    match var {
        Ok(path) => Ok(path),
        Err(VarError::NotPresent) => Ok(DEFAULT_CONFIG_PATH.to_string()),
        Err(e) => Err(e.into()),
    }
}
