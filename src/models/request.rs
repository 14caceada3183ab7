//! Resolved HTTP request data model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Method used when a catalog entry does not name one.
pub const DEFAULT_METHOD: &str = "GET";

/// A fully resolved request, ready to hand to a transport.
///
/// Produced once per `get_request` call and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// The request URL with all placeholders substituted.
    pub url: String,

    /// HTTP verb as written in the catalog (e.g. "GET", "POST").
    pub method: String,

    /// Header names and values.
    pub headers: BTreeMap<String, String>,

    /// Optional request body.
    pub body: Option<String>,
}

impl RequestDescriptor {
    /// Creates a request with no headers and no body.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    /// Gets a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the body if present and non-empty.
    pub fn non_empty_body(&self) -> Option<&str> {
        self.body.as_deref().filter(|b| !b.is_empty())
    }
}

impl fmt::Display for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}
