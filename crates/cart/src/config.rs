//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ROCKETSHOES_API_URL` - Inventory API base URL (default: `http://localhost:3333`)
//! - `ROCKETSHOES_STORAGE_PATH` - Local-storage file (default: `.rocketshoes/local-storage.json`)
//! - `ROCKETSHOES_API_TIMEOUT_SECS` - Request timeout in seconds (default: 10)
//! - `ROCKETSHOES_PRODUCT_CACHE_TTL_SECS` - Product cache TTL in seconds (default: 300)

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:3333";
const DEFAULT_STORAGE_PATH: &str = ".rocketshoes/local-storage.json";
const DEFAULT_TIMEOUT_SECS: &str = "10";
const DEFAULT_PRODUCT_CACHE_TTL_SECS: &str = "300";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Inventory API configuration
    pub inventory: InventoryConfig,
    /// File backing local storage
    pub storage_path: PathBuf,
}

/// Inventory API configuration.
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// Base URL of the inventory API
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
    /// How long product details stay cached
    pub product_cache_ttl: Duration,
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Build configuration from an explicit variable map.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let inventory = InventoryConfig::from_vars(vars)?;
        let storage_path = PathBuf::from(get_or_default(
            vars,
            "ROCKETSHOES_STORAGE_PATH",
            DEFAULT_STORAGE_PATH,
        ));

        Ok(Self {
            inventory,
            storage_path,
        })
    }
}

impl InventoryConfig {
    fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let base_url = get_or_default(vars, "ROCKETSHOES_API_URL", DEFAULT_API_URL)
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("ROCKETSHOES_API_URL".to_string(), e.to_string())
            })?;
        let timeout = get_secs(vars, "ROCKETSHOES_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let product_cache_ttl = get_secs(
            vars,
            "ROCKETSHOES_PRODUCT_CACHE_TTL_SECS",
            DEFAULT_PRODUCT_CACHE_TTL_SECS,
        )?;

        Ok(Self {
            base_url,
            timeout,
            product_cache_ttl,
        })
    }
}

fn get_or_default<'a>(vars: &'a HashMap<String, String>, key: &str, default: &'a str) -> &'a str {
    vars.get(key)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}

fn get_secs(
    vars: &HashMap<String, String>,
    key: &str,
    default: &str,
) -> Result<Duration, ConfigError> {
    get_or_default(vars, key, default)
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
