//! apicli: run catalogued HTTP APIs from parameterized templates.
//!
//! A catalog file describes named APIs (`service.name`) with URL, header and
//! body templates. This crate loads the catalog, substitutes variables into
//! the templates, applies a couple of provider conventions and hands the
//! resulting request to an HTTP transport.
//!
//! # Architecture
//!
//! - **catalog**: locates and parses the catalog (TOML or tabular text)
//! - **variables**: `$NAME` / `$!NAME` / `$$` substitution with an injected
//!   environment and an alias table
//! - **request**: resolves one catalog entry into a [`RequestDescriptor`]
//! - **executor**: sends requests over HTTP (reqwest)
//! - **query**: jq-based extraction from response bodies
//! - **client**: the facade tying the above together
//! - **config**: timeouts, TLS, query processor and catalog directory
//!
//! # Catalog locations
//!
//! Without an explicit path the catalog is read from the first existing of
//! `~/.apicli/apicli.toml` and `~/.apicli/apis.txt`. `APICLI_HOME` replaces
//! `~/.apicli`. A missing catalog is empty, not an error.
//!
//! # Usage
//!
//! ```no_run
//! use apicli::FetchOptions;
//!
//! # async fn example() -> apicli::Result<()> {
//! let request = apicli::get_request("openai", "chat", &Default::default(), None)?;
//! println!("{} {}", request.method, request.url);
//!
//! let handle = apicli::get("httpbin.get", &FetchOptions::new()).await?;
//! println!("{}", handle.json()?["url"]);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod models;
pub mod query;
pub mod request;
pub mod variables;

pub use catalog::{CatalogError, CatalogLoader};
pub use client::{ApiClient, FetchOptions, ResponseHandle};
pub use config::ApiCliConfig;
pub use error::{ApiCliError, Result};
pub use executor::{ReqwestTransport, Transport, TransportError};
pub use models::{ApiDescriptor, ApiResponse, RequestDescriptor, VariableMap};
pub use query::{QueryEngine, QueryError};
pub use request::{RequestBuilder, RequestError};
pub use variables::{AliasTable, EnvLookup, MapEnv, ProcessEnv, VarError, VariableResolver};

use std::path::Path;

/// Loads the catalog. See [`CatalogLoader::get_apis`].
pub fn get_apis(config_path: Option<&Path>) -> Result<Vec<ApiDescriptor>> {
    Ok(catalog::get_apis(config_path)?)
}

/// Returns the first catalog entry for `(service, name)`, if any.
pub fn get_api(service: &str, name: &str, config_path: Option<&Path>) -> Result<Option<ApiDescriptor>> {
    Ok(catalog::get_api(service, name, config_path)?)
}

/// Resolves `(service, name)` into a request using the process environment.
pub fn get_request(
    service: &str,
    name: &str,
    overrides: &VariableMap,
    config_path: Option<&Path>,
) -> Result<RequestDescriptor> {
    Ok(request::get_request(service, name, overrides, config_path)?)
}

/// Resolves and sends `(service, name)`. See [`ApiClient::fetch_api`].
pub async fn fetch_api(service: &str, name: &str, options: &FetchOptions) -> Result<ApiResponse> {
    ApiClient::from_process_env()?
        .fetch_api(service, name, options)
        .await
}

/// Fetches `service.name` and returns its body. See [`ApiClient::get`].
pub async fn get(id: &str, options: &FetchOptions) -> Result<ResponseHandle> {
    ApiClient::from_process_env()?.get(id, options).await
}
