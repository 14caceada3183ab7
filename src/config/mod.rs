//! Configuration management for apicli.
//!
//! Configuration comes from two places: a settings JSON document holding an
//! `"apicli"` object, and `APICLI_*` environment variables. There is no global
//! instance; callers build an [`ApiCliConfig`] and pass it along.

pub mod schema;

pub use schema::{ApiCliConfig, ENV_CATALOG_DIR, ENV_JQ_PATH, ENV_TIMEOUT};

use log::warn;
use serde_json::Value;

/// Key of the apicli section inside a settings document.
pub const SETTINGS_KEY: &str = "apicli";

/// Loads configuration from a settings JSON value.
///
/// Reads the `"apicli"` section, merges it over the defaults and validates
/// the result. A section that fails to deserialize is ignored with a warning.
///
/// # Example
///
/// ```
/// use apicli::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "apicli": {
///         "timeout": 60000,
///         "validateSsl": false
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.timeout, 60000);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<ApiCliConfig, String> {
    let mut config = ApiCliConfig::default();

    if let Some(section) = settings_json.as_ref().and_then(|s| s.get(SETTINGS_KEY)) {
        match serde_json::from_value::<ApiCliConfig>(section.clone()) {
            Ok(user_config) => config = config.merge(&user_config),
            Err(e) => warn!("Failed to parse apicli settings: {}. Using defaults.", e),
        }
    }

    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}", e))?;

    Ok(config)
}
