//! Request building.
//!
//! Turns one catalog entry into a [`RequestDescriptor`]: the URL, headers and
//! body templates are resolved against caller overrides and the environment,
//! and two provider conventions are applied.
//!
//! # Bearer shorthand
//!
//! A header template written as the string `"BEARER <expr>"` expands to
//! `Authorization: Bearer <resolved expr>` plus `Content-Type: application/json`.
//!
//! # Provider ordering
//!
//! A body containing the exact text of [`PROVIDER_ORDER_SNIPPET`] gets the
//! snippet's `$PROVIDER` replaced by the `PROVIDER` variable's literal text.
//! When no provider is set the snippet is removed.

use crate::catalog::{find_api, CatalogError, CatalogLoader};
use crate::config::ApiCliConfig;
use crate::models::{ApiDescriptor, RequestDescriptor, VariableMap, DEFAULT_METHOD};
use crate::variables::{EnvLookup, ProcessEnv, VarError, VariableResolver};
use log::debug;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Variable that selects the provider for ordering injection.
pub const PROVIDER_VAR: &str = "PROVIDER";

/// Body fragment rewritten (or removed) according to the provider.
pub const PROVIDER_ORDER_SNIPPET: &str = r#", "provider": {"order": ["$PROVIDER"]}"#;

/// Token inside [`PROVIDER_ORDER_SNIPPET`] replaced by the provider name.
const PROVIDER_TOKEN: &str = "$PROVIDER";

const CONTENT_TYPE_JSON: &str = "application/json";

/// Errors that can occur while building a request.
#[derive(Debug, Error)]
pub enum RequestError {
    /// No catalog entry is identified by `(service, name)`.
    #[error("Unknown API: {service}.{name}")]
    UnknownApi { service: String, name: String },

    /// A required variable did not resolve.
    #[error(transparent)]
    Variable(#[from] VarError),

    /// The catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The resolved headers are not a map.
    #[error("Headers of {api} must be a map or a BEARER string, got: {found}")]
    InvalidHeaders { api: String, found: String },
}

/// Resolves catalog entries into requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder<E> {
    resolver: VariableResolver<E>,
    loader: CatalogLoader,
}

impl RequestBuilder<ProcessEnv> {
    /// A builder over the process environment, configured from `APICLI_*`.
    pub fn from_process_env() -> Self {
        let config = ApiCliConfig::from_env(&ProcessEnv);
        Self::new(
            VariableResolver::from_process_env(),
            CatalogLoader::from_config(&config),
        )
    }
}

impl<E: EnvLookup> RequestBuilder<E> {
    pub fn new(resolver: VariableResolver<E>, loader: CatalogLoader) -> Self {
        Self { resolver, loader }
    }

    pub fn resolver(&self) -> &VariableResolver<E> {
        &self.resolver
    }

    pub fn loader(&self) -> &CatalogLoader {
        &self.loader
    }

    /// Loads the catalog, finds `(service, name)` and resolves it.
    ///
    /// # Errors
    ///
    /// - [`RequestError::UnknownApi`] when the pair is not in the catalog
    /// - [`RequestError::Variable`] when a `$!NAME` placeholder is unresolved
    /// - [`RequestError::Catalog`] when the catalog file cannot be loaded
    pub fn get_request(
        &self,
        service: &str,
        name: &str,
        overrides: &VariableMap,
        config_path: Option<&Path>,
    ) -> Result<RequestDescriptor, RequestError> {
        let api = find_api(self.loader.get_apis(config_path)?, service, name).ok_or_else(|| {
            RequestError::UnknownApi {
                service: service.to_string(),
                name: name.to_string(),
            }
        })?;
        self.resolve(&api, overrides)
    }

    /// Resolves one entry. Does no I/O.
    pub fn resolve(
        &self,
        api: &ApiDescriptor,
        overrides: &VariableMap,
    ) -> Result<RequestDescriptor, RequestError> {
        let provider = self.provider(overrides);

        let url = self.resolver.sub(api.url.as_deref().unwrap_or_default(), overrides)?;
        let headers = self.resolve_headers(api, overrides)?;
        let body = api
            .body
            .as_deref()
            .map(|body| {
                let body = inject_provider(body.trim(), provider.as_deref());
                self.resolver.sub(&body, overrides)
            })
            .transpose()?;

        let request = RequestDescriptor {
            url,
            method: api
                .method
                .clone()
                .unwrap_or_else(|| DEFAULT_METHOD.to_string()),
            headers,
            body,
        };
        debug!("Resolved {} to {}", api.id(), request);
        Ok(request)
    }

    /// The provider from the overrides, else the environment.
    fn provider(&self, overrides: &VariableMap) -> Option<String> {
        self.resolver.lookup_direct(PROVIDER_VAR, overrides)
    }

    fn resolve_headers(
        &self,
        api: &ApiDescriptor,
        overrides: &VariableMap,
    ) -> Result<BTreeMap<String, String>, RequestError> {
        if let Some(expression) = api.bearer_expression() {
            let token = self.resolver.sub(expression, overrides)?;
            return Ok(BTreeMap::from([
                ("Authorization".to_string(), format!("Bearer {}", token)),
                ("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string()),
            ]));
        }

        match self.resolver.walk(&api.headers, overrides)? {
            Value::Null => Ok(BTreeMap::new()),
            Value::Object(entries) => Ok(entries
                .into_iter()
                .map(|(name, value)| (name, header_text(value)))
                .collect()),
            other => Err(RequestError::InvalidHeaders {
                api: api.id(),
                found: other.to_string(),
            }),
        }
    }
}

fn header_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Applies the provider-ordering convention to a body.
///
/// Only the first occurrence of [`PROVIDER_ORDER_SNIPPET`] is touched. An
/// empty provider counts as no provider.
pub fn inject_provider(body: &str, provider: Option<&str>) -> String {
    match provider.filter(|p| !p.is_empty()) {
        Some(provider) => {
            let injected = PROVIDER_ORDER_SNIPPET.replacen(PROVIDER_TOKEN, provider, 1);
            body.replacen(PROVIDER_ORDER_SNIPPET, &injected, 1)
        }
        None => body.replacen(PROVIDER_ORDER_SNIPPET, "", 1),
    }
}

/// Builds a request using the process environment.
///
/// See [`RequestBuilder::get_request`].
pub fn get_request(
    service: &str,
    name: &str,
    overrides: &VariableMap,
    config_path: Option<&Path>,
) -> Result<RequestDescriptor, RequestError> {
    RequestBuilder::from_process_env().get_request(service, name, overrides, config_path)
}
