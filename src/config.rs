//! Configuration Module
//!
//! Handles loading client configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default PokeAPI root
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Upper bound for the cache interval in seconds (one week)
pub const MAX_CACHE_INTERVAL: u64 = 7 * 24 * 60 * 60;

/// Upper bound for the HTTP request timeout in seconds
pub const MAX_REQUEST_TIMEOUT: u64 = 300;

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache interval in seconds, both max entry age and sweep period
    pub cache_interval: u64,
    /// Root URL of the REST catalog
    pub api_base_url: String,
    /// HTTP request timeout in seconds
    pub request_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEDEX_CACHE_INTERVAL_SECS` - Cache interval in seconds (default: 5,
    ///   capped at [`MAX_CACHE_INTERVAL`])
    /// - `POKEDEX_API_BASE_URL` - REST catalog root (default: https://pokeapi.co/api/v2)
    /// - `POKEDEX_REQUEST_TIMEOUT_SECS` - HTTP timeout in seconds (default: 10,
    ///   capped at [`MAX_REQUEST_TIMEOUT`])
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_interval: env::var("POKEDEX_CACHE_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .map(|v| v.min(MAX_CACHE_INTERVAL))
                .unwrap_or(defaults.cache_interval),
            api_base_url: env::var("POKEDEX_API_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.api_base_url),
            request_timeout: env::var("POKEDEX_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .map(|v| v.min(MAX_REQUEST_TIMEOUT))
                .unwrap_or(defaults.request_timeout),
        }
    }

    /// Cache interval as a Duration.
    pub fn cache_interval(&self) -> Duration {
        Duration::from_secs(self.cache_interval)
    }

    /// Request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_interval: 5,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: 10,
        }
    }
}
