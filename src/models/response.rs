//! HTTP response data model.
//!
//! The transport's answer to a [`RequestDescriptor`](super::RequestDescriptor):
//! status information, headers in the order the server sent them, and the raw
//! body bytes.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Represents an HTTP response received from a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// HTTP status code (e.g., 200, 404, 500).
    pub status: u16,

    /// HTTP status text (e.g., "OK", "Not Found").
    pub status_text: String,

    /// The final URL after redirects.
    pub url: String,

    /// Response headers as received.
    pub headers: Vec<(String, String)>,

    /// Response body as raw bytes.
    pub body: Vec<u8>,

    /// Time from sending the request to reading the whole body.
    pub duration: Duration,
}

impl ApiResponse {
    /// Creates a response with the given status and no headers or body.
    pub fn new(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            url: String::new(),
            headers: Vec::new(),
            body: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    /// Returns the body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Gets the first header with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns true for 2xx status codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
