//! Native HTTP transport using reqwest.

use super::{Transport, TransportError};
use crate::config::ApiCliConfig;
use crate::models::{ApiResponse, RequestDescriptor};
use log::debug;
use reqwest::redirect::Policy;
use std::time::Instant;

/// Sends requests with a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a client honouring the configured timeout, redirect and TLS settings.
    pub fn new(config: &ApiCliConfig) -> Result<Self, TransportError> {
        let redirect = if config.follow_redirects {
            Policy::limited(config.max_redirects as usize)
        } else {
            Policy::none()
        };

        let client = reqwest::Client::builder()
            .timeout(config.timeout_duration())
            .redirect(redirect)
            .danger_accept_invalid_certs(!config.validate_ssl)
            .build()
            .map_err(|e| TransportError::BuildError(e.to_string()))?;

        Ok(Self { client })
    }

    /// Wraps an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<ApiResponse, TransportError> {
        let url = url::Url::parse(&request.url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(TransportError::UnsupportedProtocol(url.scheme().to_string()));
        }

        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|_| TransportError::InvalidMethod(request.method.clone()))?;

        let mut req_builder = self.client.request(method, url);
        for (name, value) in &request.headers {
            req_builder = req_builder.header(name, value);
        }
        // An empty body is sent as no body
        if let Some(body) = request.non_empty_body() {
            req_builder = req_builder.body(body.to_string());
        }

        let start_time = Instant::now();
        let response = req_builder.send().await?;

        let status = response.status();
        let final_url = response.url().to_string();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response.bytes().await?.to_vec();
        let duration = start_time.elapsed();
        debug!("{} answered {} in {:?}", request, status.as_u16(), duration);

        Ok(ApiResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            url: final_url,
            headers,
            body,
            duration,
        })
    }
}
