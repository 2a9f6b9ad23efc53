// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the feature gate crate.
//!
//! This module defines the error types that can occur when working with feature
//! adapters. All errors use `thiserror` for proper error handling and conversion.
//!
//! Domain outcomes (`FeatureNotFound`, `RemoteError`, `RateLimited`) are kept apart
//! from transport faults (`ConnectionError`) so callers can pattern-match on the
//! kind instead of inspecting messages.

use crate::domain::response::ApiError;
use thiserror::Error;

/// The main error type for feature gate operations.
///
/// This enum is marked as `#[non_exhaustive]` to allow for future additions
/// without breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use feature_gate::domain::errors::FeatureGateError;
///
/// fn lookup() -> Result<bool, FeatureGateError> {
///     Err(FeatureGateError::FeatureNotFound {
///         key: "funnel_test".to_string(),
///     })
/// }
///
/// assert!(lookup().unwrap_err().is_not_found());
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FeatureGateError {
    /// The key does not resolve to a record in the backend.
    #[error("Feature {key} not found")]
    FeatureNotFound {
        /// The key that was not found
        key: String,
    },

    /// The remote service could not be reached (refused, DNS, timeout, ...).
    #[error("Posthog connection error - {message}")]
    ConnectionError {
        /// The raw transport error text
        message: String,
        /// The underlying transport error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The remote service answered with a non-ok status and an error payload.
    #[error("Remote service returned status {status}: {}", describe_api_errors(.errors))]
    RemoteError {
        /// The HTTP status code
        status: u16,
        /// The normalized error entries
        errors: Vec<ApiError>,
    },

    /// The remote service throttled the request.
    #[error("{}", .detail.as_deref().unwrap_or("Request was throttled."))]
    RateLimited {
        /// The remote `detail` message, if one was provided
        detail: Option<String>,
    },

    /// The adapter does not provide this optional operation.
    #[error("Operation '{operation}' is not supported by this adapter")]
    UnsupportedOperation {
        /// The name of the unsupported operation
        operation: String,
    },

    /// A rollout percentage was outside `0..=100`.
    #[error("Invalid percentage {value}: must be between 0 and 100")]
    InvalidPercentage {
        /// The rejected value
        value: u32,
    },

    /// A successful response body could not be decoded.
    #[error("Failed to decode response: {message}")]
    DecodeError {
        /// The error message
        message: String,
        /// The underlying decoding error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Settings were missing or invalid.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A storage adapter failed.
    #[error("Adapter '{adapter_name}' error: {message}")]
    AdapterError {
        /// The name of the adapter that encountered the error
        adapter_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FeatureGateError {
    /// Creates a `FeatureNotFound` error for the given key.
    pub fn not_found(key: impl Into<String>) -> Self {
        FeatureGateError::FeatureNotFound { key: key.into() }
    }

    /// Creates an `UnsupportedOperation` error for the given operation name.
    pub fn unsupported(operation: impl Into<String>) -> Self {
        FeatureGateError::UnsupportedOperation {
            operation: operation.into(),
        }
    }

    /// Creates a `ConfigError` without an underlying source.
    pub fn config(message: impl Into<String>) -> Self {
        FeatureGateError::ConfigError {
            message: message.into(),
            source: None,
        }
    }

    /// Returns `true` if this is a `FeatureNotFound` error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FeatureGateError::FeatureNotFound { .. })
    }

    /// Returns `true` if this is a transport-level `ConnectionError`.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, FeatureGateError::ConnectionError { .. })
    }
}

fn describe_api_errors(errors: &[ApiError]) -> String {
    let details: Vec<&str> = errors.iter().filter_map(|e| e.detail.as_deref()).collect();
    if details.is_empty() {
        "no detail".to_string()
    } else {
        details.join("; ")
    }
}

/// A specialized Result type for feature gate operations.
pub type Result<T> = std::result::Result<T, FeatureGateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_not_found_error() {
        let error = FeatureGateError::not_found("funnel_test");
        assert_eq!(error.to_string(), "Feature funnel_test not found");
        assert!(error.is_not_found());
        assert!(!error.is_connection_error());
    }

    #[test]
    fn test_connection_error() {
        let error = FeatureGateError::ConnectionError {
            message: "connection refused".to_string(),
            source: None,
        };
        assert_eq!(
            error.to_string(),
            "Posthog connection error - connection refused"
        );
        assert!(error.is_connection_error());
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_remote_error_joins_details() {
        let error = FeatureGateError::RemoteError {
            status: 400,
            errors: vec![ApiError {
                status: 400,
                detail: Some("Key already exists".to_string()),
                code: Some("unique".to_string()),
                error_type: Some("validation_error".to_string()),
            }],
        };
        assert_eq!(
            error.to_string(),
            "Remote service returned status 400: Key already exists"
        );
    }

    #[test]
    fn test_remote_error_without_detail() {
        let error = FeatureGateError::RemoteError {
            status: 500,
            errors: vec![],
        };
        assert!(error.to_string().contains("no detail"));
    }

    #[test]
    fn test_rate_limited_uses_remote_detail() {
        let error = FeatureGateError::RateLimited {
            detail: Some("Request was throttled. Expected available in 5 seconds.".to_string()),
        };
        assert_eq!(
            error.to_string(),
            "Request was throttled. Expected available in 5 seconds."
        );
    }

    #[test]
    fn test_unsupported_operation() {
        let error = FeatureGateError::unsupported("enable_actor");
        assert!(matches!(
            error,
            FeatureGateError::UnsupportedOperation { .. }
        ));
        assert!(!error.is_not_found());
        assert!(error.to_string().contains("enable_actor"));
    }

    #[test]
    fn test_config_error() {
        let error = FeatureGateError::config("POSTHOG_API_KEY is not set");
        assert_eq!(
            error.to_string(),
            "Configuration error: POSTHOG_API_KEY is not set"
        );
    }

    #[test]
    fn test_adapter_error() {
        let error = FeatureGateError::AdapterError {
            adapter_name: "redis".to_string(),
            message: "Failed to connect".to_string(),
            source: None,
        };
        assert_eq!(error.to_string(), "Adapter 'redis' error: Failed to connect");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = FeatureGateError::from(io_error);
        assert!(matches!(error, FeatureGateError::IoError(_)));
    }
}
