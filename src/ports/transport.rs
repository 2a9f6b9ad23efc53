// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP transport port.
//!
//! The Posthog client builds [`HttpRequest`] values and hands them to an
//! [`HttpTransport`]. Connection-level failures come back as [`TransportError`];
//! any response that arrives, whatever its status, is an [`HttpResponse`].

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// The HTTP methods used by the remote flag API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PATCH
    Patch,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Returns `true` for methods that change remote state.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing request.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The request method
    pub method: HttpMethod,
    /// The absolute URL
    pub url: String,
    /// Header name/value pairs
    pub headers: Vec<(String, String)>,
    /// JSON body, if any
    pub body: Option<Value>,
}

impl HttpRequest {
    /// Returns the value of the first header with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A received response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The status code
    pub status: u16,
    /// The raw body text
    pub body: String,
}

impl HttpResponse {
    /// Creates a response from a status and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// A connection-level failure: the request never produced a response.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    /// The raw error text
    pub message: String,
    /// The underlying error, if any
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    /// Creates a transport error with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }
}

/// A blocking HTTP transport.
///
/// Implementations must be `Send + Sync`. The client issues the requests of one
/// operation sequentially and holds no locks around them.
pub trait HttpTransport: Send + Sync {
    /// Performs the request and returns the response, whatever its status.
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for std::sync::Arc<T> {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}
