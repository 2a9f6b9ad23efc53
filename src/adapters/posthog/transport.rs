// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blocking `reqwest` implementation of the HTTP transport port.

use crate::domain::{FeatureGateError, Result};
use crate::ports::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
use reqwest::blocking::Client;
use reqwest::Method;
use std::time::Duration;

/// HTTP transport backed by a blocking `reqwest` client.
///
/// The timeout covers the whole request and is always bounded.
///
/// # Examples
///
/// ```rust,no_run
/// use feature_gate::adapters::posthog::ReqwestTransport;
/// use std::time::Duration;
///
/// let transport = ReqwestTransport::new(Duration::from_secs(10)).unwrap();
/// assert_eq!(transport.timeout(), Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Creates a transport with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("feature-gate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FeatureGateError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
                source: Some(Box::new(e)),
            })?;

        Ok(Self { client, timeout })
    }

    /// Returns the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Patch => Method::PATCH,
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.to_string());
        }

        let response = builder.send().map_err(|e| TransportError {
            message: e.to_string(),
            source: Some(Box::new(e)),
        })?;

        let status = response.status().as_u16();
        let body = response.text().map_err(|e| TransportError {
            message: e.to_string(),
            source: Some(Box::new(e)),
        })?;

        Ok(HttpResponse { status, body })
    }
}
