//! Configuration schema for apicli.
//!
//! This module defines the configuration structure and validation logic for
//! the user-configurable settings: transport behaviour, the query processor
//! and where the default catalog lives.

use crate::variables::EnvLookup;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Overrides the directory holding the default catalog files.
pub const ENV_CATALOG_DIR: &str = "APICLI_HOME";

/// Overrides the query processor executable.
pub const ENV_JQ_PATH: &str = "APICLI_JQ";

/// Overrides the request timeout, in milliseconds.
pub const ENV_TIMEOUT: &str = "APICLI_TIMEOUT";

/// Main configuration structure.
///
/// Missing settings fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCliConfig {
    /// Request timeout in milliseconds.
    ///
    /// Covers connection, headers and body download. Defaults to 30000ms.
    /// Must be greater than 0.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Whether to follow HTTP redirects. Defaults to true.
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,

    /// Maximum number of redirects to follow when `follow_redirects` is set.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,

    /// Whether to validate TLS certificates. Defaults to true.
    #[serde(default = "default_validate_ssl")]
    pub validate_ssl: bool,

    /// Executable used for response queries. Defaults to `jq` on the PATH.
    #[serde(default = "default_jq_path")]
    pub jq_path: String,

    /// Largest query output accepted, in bytes. Defaults to 50 MiB.
    #[serde(default = "default_max_query_output")]
    pub max_query_output: usize,

    /// Directory holding `apicli.toml` / `apis.txt`.
    ///
    /// When unset, `~/.apicli` is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_dir: Option<PathBuf>,
}

impl Default for ApiCliConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            follow_redirects: default_follow_redirects(),
            max_redirects: default_max_redirects(),
            validate_ssl: default_validate_ssl(),
            jq_path: default_jq_path(),
            max_query_output: default_max_query_output(),
            catalog_dir: None,
        }
    }
}

impl ApiCliConfig {
    /// Builds a configuration from defaults overlaid with `APICLI_*` variables.
    ///
    /// An unparseable `APICLI_TIMEOUT` is ignored with a warning.
    pub fn from_env(env: &impl EnvLookup) -> Self {
        let mut config = Self::default();

        if let Some(dir) = env.get(ENV_CATALOG_DIR).filter(|d| !d.is_empty()) {
            config.catalog_dir = Some(PathBuf::from(dir));
        }
        if let Some(jq) = env.get(ENV_JQ_PATH).filter(|j| !j.is_empty()) {
            config.jq_path = jq;
        }
        if let Some(raw) = env.get(ENV_TIMEOUT) {
            match raw.trim().parse::<u64>() {
                Ok(timeout) if timeout > 0 => config.timeout = timeout,
                _ => warn!("Ignoring invalid {}={:?}", ENV_TIMEOUT, raw),
            }
        }

        config
    }

    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are valid, or `Err` with a descriptive error message.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout == 0 {
            return Err("timeout must be greater than 0".to_string());
        }
        if self.jq_path.trim().is_empty() {
            return Err("jqPath must not be empty".to_string());
        }
        if self.max_query_output == 0 {
            return Err("maxQueryOutput must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Returns the timeout as a `std::time::Duration`.
    pub fn timeout_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout)
    }

    /// Merges this configuration with another, using values from `other` where present.
    ///
    /// `catalog_dir` is only replaced when `other` sets one.
    pub fn merge(&self, other: &ApiCliConfig) -> Self {
        Self {
            timeout: other.timeout,
            follow_redirects: other.follow_redirects,
            max_redirects: other.max_redirects,
            validate_ssl: other.validate_ssl,
            jq_path: other.jq_path.clone(),
            max_query_output: other.max_query_output,
            catalog_dir: other.catalog_dir.clone().or_else(|| self.catalog_dir.clone()),
        }
    }
}

// Default value functions for serde

fn default_timeout() -> u64 {
    30000
}

fn default_follow_redirects() -> bool {
    true
}

fn default_max_redirects() -> u32 {
    10
}

fn default_validate_ssl() -> bool {
    true
}

fn default_jq_path() -> String {
    "jq".to_string()
}

fn default_max_query_output() -> usize {
    50 * 1024 * 1024
}
