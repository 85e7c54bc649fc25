//! Configuration for the pinger service
//!
//! Endpoints come from the `API_URL_1` / `API_URL_2` environment slots. An
//! optional JSON config file supplies the list used when neither slot is set.

use serde::Deserialize;
use std::path::Path;

/// Environment variables consulted for endpoint URLs, in order
pub const ENDPOINT_ENV_VARS: [&str; 2] = ["API_URL_1", "API_URL_2"];

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoints: Vec<String>,
}

impl Config {
    /// Build a config from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// Unset and blank slots are dropped. Order follows [`ENDPOINT_ENV_VARS`]
    /// and duplicates are kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoints = ENDPOINT_ENV_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect();
        Self { endpoints }
    }

    /// Resolve the effective endpoint list.
    ///
    /// Environment endpoints win when any slot is set; otherwise the file
    /// list is used; otherwise the list is empty.
    pub fn resolve(env: Config, file: Option<Config>) -> Self {
        if !env.endpoints.is_empty() {
            return env;
        }
        file.unwrap_or_default()
    }
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::PingerError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
