//! Client facade.
//!
//! [`ApiClient`] ties the pieces together: it loads the catalog, resolves a
//! request, sends it through a [`Transport`] and wraps the response text in a
//! [`ResponseHandle`] that can be parsed or queried.
//!
//! # Example
//!
//! ```no_run
//! use apicli::client::{ApiClient, FetchOptions};
//!
//! # async fn example() -> apicli::Result<()> {
//! let client = ApiClient::from_process_env()?;
//! let options = FetchOptions::new().var("PROMPT", "hello");
//! let response = client.get("openai.chat", &options).await?;
//! println!("{}", response.query("choices[0].message.content")?);
//! # Ok(())
//! # }
//! ```

use crate::catalog::CatalogLoader;
use crate::config::ApiCliConfig;
use crate::error::{ApiCliError, Result};
use crate::executor::{
    format_request_diagnostics, format_response_diagnostics, ReqwestTransport, Transport,
};
use crate::models::{ApiDescriptor, ApiResponse, RequestDescriptor, VariableMap};
use crate::query::QueryEngine;
use crate::request::RequestBuilder;
use crate::variables::{AliasTable, EnvLookup, ProcessEnv, VariableResolver};
use log::debug;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Per-call options for [`ApiClient::fetch_api`] and [`ApiClient::get`].
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Variable overrides; these win over the environment.
    pub vars: VariableMap,

    /// Explicit catalog file, bypassing the default locations.
    pub config_path: Option<PathBuf>,

    /// Print request and response diagnostics to stderr.
    pub debug: bool,
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one variable override.
    pub fn var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Splits a `service.name` id. Further segments are ignored.
pub fn split_api_id(id: &str) -> (&str, &str) {
    let mut segments = id.split('.');
    let service = segments.next().unwrap_or_default();
    let name = segments.next().unwrap_or_default();
    (service, name)
}

/// Loads, resolves and executes catalogued API calls.
#[derive(Debug, Clone)]
pub struct ApiClient<E, T> {
    builder: RequestBuilder<E>,
    transport: T,
    query: QueryEngine,
}

impl ApiClient<ProcessEnv, ReqwestTransport> {
    /// A client configured from the process environment.
    pub fn from_process_env() -> Result<Self> {
        Self::from_config(ApiCliConfig::from_env(&ProcessEnv))
    }

    /// A client over the process environment with explicit configuration.
    pub fn from_config(config: ApiCliConfig) -> Result<Self> {
        config.validate().map_err(ApiCliError::Config)?;
        let builder = RequestBuilder::new(
            VariableResolver::new(ProcessEnv, AliasTable::default()),
            CatalogLoader::from_config(&config),
        );
        Ok(Self::new(
            builder,
            ReqwestTransport::new(&config)?,
            QueryEngine::from_config(&config),
        ))
    }
}

impl<E: EnvLookup, T: Transport> ApiClient<E, T> {
    pub fn new(builder: RequestBuilder<E>, transport: T, query: QueryEngine) -> Self {
        Self {
            builder,
            transport,
            query,
        }
    }

    pub fn builder(&self) -> &RequestBuilder<E> {
        &self.builder
    }

    /// Loads the full catalog.
    pub fn get_apis(&self, config_path: Option<&Path>) -> Result<Vec<ApiDescriptor>> {
        Ok(self.builder.loader().get_apis(config_path)?)
    }

    /// Returns the first catalog entry for `(service, name)`, if any.
    pub fn get_api(
        &self,
        service: &str,
        name: &str,
        config_path: Option<&Path>,
    ) -> Result<Option<ApiDescriptor>> {
        Ok(self.builder.loader().get_api(service, name, config_path)?)
    }

    /// Resolves `(service, name)` into a request without sending it.
    pub fn get_request(
        &self,
        service: &str,
        name: &str,
        overrides: &VariableMap,
        config_path: Option<&Path>,
    ) -> Result<RequestDescriptor> {
        Ok(self
            .builder
            .get_request(service, name, overrides, config_path)?)
    }

    /// Resolves `(service, name)` and sends it, returning the response as-is.
    ///
    /// Non-2xx statuses are not errors.
    pub async fn fetch_api(
        &self,
        service: &str,
        name: &str,
        options: &FetchOptions,
    ) -> Result<ApiResponse> {
        let request = self.get_request(
            service,
            name,
            &options.vars,
            options.config_path.as_deref(),
        )?;

        if options.debug {
            eprintln!("{}", format_request_diagnostics(&request));
        }

        let response = self.transport.send(&request).await?;

        if options.debug {
            eprintln!("\n{}", format_response_diagnostics(&response));
        }

        Ok(response)
    }

    /// Fetches the API identified by `id` (`service.name`) and reads its body.
    pub async fn get(&self, id: &str, options: &FetchOptions) -> Result<ResponseHandle> {
        let (service, name) = split_api_id(id);
        let response = self.fetch_api(service, name, options).await?;
        debug!("{} returned {} bytes", id, response.body.len());
        Ok(ResponseHandle::new(response.text(), self.query.clone()))
    }
}

/// The body of a fetched response, ready to parse or query.
#[derive(Debug, Clone)]
pub struct ResponseHandle {
    text: String,
    query: QueryEngine,
}

impl ResponseHandle {
    pub fn new(text: String, query: QueryEngine) -> Self {
        Self { text, query }
    }

    /// The raw response text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parses the whole body as JSON.
    ///
    /// # Errors
    ///
    /// [`ApiCliError::ResponseParse`] if the body is not valid JSON.
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Runs `query` over the body with the configured query processor.
    pub fn query(&self, query: &str) -> Result<String> {
        Ok(self.query.run_jq(query, &self.text)?)
    }

    /// Consumes the handle, returning the response text.
    pub fn into_text(self) -> String {
        self.text
    }
}
