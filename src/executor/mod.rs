//! HTTP request execution.
//!
//! The network side of the crate: a [`Transport`] takes a resolved
//! [`RequestDescriptor`] and returns the server's [`ApiResponse`] unchanged.
//! [`ReqwestTransport`] is the production implementation; tests can supply
//! their own.

pub mod error;
pub mod native;

pub use error::TransportError;
pub use native::ReqwestTransport;

use crate::models::{ApiResponse, RequestDescriptor};
use std::fmt::Write;
use std::future::Future;

/// Maximum number of body characters echoed in request diagnostics.
const DIAGNOSTIC_BODY_CHARS: usize = 200;

/// Sends resolved requests.
pub trait Transport {
    /// Sends `request` and returns the response, whatever its status.
    fn send(
        &self,
        request: &RequestDescriptor,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send;
}

/// Formats the outgoing request for debug output.
///
/// ```text
/// > POST https://api.example.com/chat
/// > Authorization: Bearer abc
/// > body: {"model": "m"}
/// ```
///
/// Bodies longer than 200 characters are cut and suffixed with `...`.
pub fn format_request_diagnostics(request: &RequestDescriptor) -> String {
    let mut out = format!("> {} {}", request.method, request.url);
    for (name, value) in &request.headers {
        let _ = write!(out, "\n> {}: {}", name, value);
    }
    if let Some(body) = request.non_empty_body() {
        let mut preview: String = body.chars().take(DIAGNOSTIC_BODY_CHARS).collect();
        if body.chars().count() > DIAGNOSTIC_BODY_CHARS {
            preview.push_str("...");
        }
        let _ = write!(out, "\n> body: {}", preview);
    }
    out
}

/// Formats the response status line and headers for debug output.
pub fn format_response_diagnostics(response: &ApiResponse) -> String {
    let mut out = format!("< {} {}", response.status, response.status_text);
    for (name, value) in &response.headers {
        let _ = write!(out, "\n< {}: {}", name, value);
    }
    out
}
