//! Top-level error type for the client facade.
//!
//! Each subsystem keeps its own error enum; [`ApiCliError`] wraps them so the
//! facade operations return a single type.

use crate::catalog::CatalogError;
use crate::executor::TransportError;
use crate::query::QueryError;
use crate::request::RequestError;
use crate::variables::VarError;
use thiserror::Error;

/// Errors returned by [`ApiClient`](crate::client::ApiClient) operations.
#[derive(Debug, Error)]
pub enum ApiCliError {
    /// The catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The request could not be built.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// The request could not be sent.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A response query failed.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The response body is not valid JSON.
    #[error("Failed to parse response as JSON: {0}")]
    ResponseParse(#[from] serde_json::Error),

    /// The configuration is invalid.
    #[error("{0}")]
    Config(String),
}

impl From<VarError> for ApiCliError {
    fn from(err: VarError) -> Self {
        ApiCliError::Request(RequestError::Variable(err))
    }
}

impl ApiCliError {
    /// Returns true if the error is an unknown `(service, name)` pair.
    pub fn is_unknown_api(&self) -> bool {
        matches!(self, ApiCliError::Request(RequestError::UnknownApi { .. }))
    }
}

/// Result type alias for facade operations.
pub type Result<T> = std::result::Result<T, ApiCliError>;
