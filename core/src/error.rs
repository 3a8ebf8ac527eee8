//! Error types for the TabNews client.
//!
//! # Design
//! Callers only ever see two kinds of failure: the API's own error body
//! (`ApiError`, or whatever domain type the call site picked) and a
//! `TransportError`. The other types here are internal stages that collapse
//! into a `TransportError` before a result is returned:
//!
//! - `BuildError` becomes `TransportError::internal()`.
//! - `TransportFailure::NoConnectivity` becomes `TransportError::no_connectivity()`.
//! - `TransportFailure::Other` becomes `TransportError::internal()`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message key for the internal error constant.
pub const INTERNAL_ERROR_MESSAGE: &str = "network.internalError";

/// Message key for the no-connectivity constant.
pub const NO_CONNECTIVITY_MESSAGE: &str = "network.noInternetConnection";

/// The request could not be assembled. No network call was made.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("request body serialization failed: {0}")]
    Serialization(String),
}

/// A failed network attempt, as reported by a `Transport`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportFailure {
    /// No route to the server.
    #[error("no network connectivity: {0}")]
    NoConnectivity(String),

    /// Everything else, timeouts included.
    #[error("transport failure: {0}")]
    Other(String),
}

/// Generic failure handed to callers. Never appears on the wire.
#[derive(Debug, Clone, Error, PartialEq, Eq, Hash)]
#[error("HTTP {status_code}: {error_message}")]
pub struct TransportError {
    pub status_code: u16,
    pub error_message: String,
}

impl TransportError {
    pub fn new(status_code: u16, error_message: impl Into<String>) -> Self {
        Self {
            status_code,
            error_message: error_message.into(),
        }
    }

    /// Building or decoding failed on our side.
    pub fn internal() -> Self {
        Self::new(400, INTERNAL_ERROR_MESSAGE)
    }

    /// The device has no network path to the API.
    pub fn no_connectivity() -> Self {
        Self::new(503, NO_CONNECTIVITY_MESSAGE)
    }

    pub fn is_no_connectivity(&self) -> bool {
        *self == Self::no_connectivity()
    }
}

impl From<BuildError> for TransportError {
    fn from(_: BuildError) -> Self {
        TransportError::internal()
    }
}

impl From<TransportFailure> for TransportError {
    fn from(failure: TransportFailure) -> Self {
        match failure {
            TransportFailure::NoConnectivity(_) => TransportError::no_connectivity(),
            TransportFailure::Other(_) => TransportError::internal(),
        }
    }
}

/// Error body returned by the TabNews API.
///
/// ```json
/// {"name":"NotFoundError","message":"...","action":"...","status_code":404,"error_id":"..."}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub name: String,
    pub message: String,
    pub action: String,
    pub status_code: u16,
    pub error_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_location_code: Option<String>,
    /// Offending field for validation errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.status_code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Invalid client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_constants() {
        assert_eq!(TransportError::internal().status_code, 400);
        assert_eq!(TransportError::internal().error_message, "network.internalError");
        assert_eq!(TransportError::no_connectivity().status_code, 503);
        assert_eq!(
            TransportError::no_connectivity().error_message,
            "network.noInternetConnection"
        );
    }

    #[test]
    fn build_error_collapses_to_internal() {
        let err: TransportError = BuildError::InvalidUrl("nope".to_string()).into();
        assert_eq!(err, TransportError::internal());
    }

    #[test]
    fn connectivity_failure_maps_to_503() {
        let err: TransportError = TransportFailure::NoConnectivity("dns".to_string()).into();
        assert!(err.is_no_connectivity());
    }

    #[test]
    fn other_failure_collapses_to_internal() {
        let err: TransportError = TransportFailure::Other("timed out".to_string()).into();
        assert_eq!(err, TransportError::internal());
    }

    #[test]
    fn api_error_parses_minimal_shape() {
        let body = r#"{"name":"NotFoundError","message":"O conteúdo informado não foi encontrado no sistema.","action":"Verifique se o \"slug\" está digitado corretamente.","status_code":404,"error_id":"e5f1a1b2"}"#;
        let err: ApiError = serde_json::from_str(body).unwrap();
        assert_eq!(err.name, "NotFoundError");
        assert_eq!(err.status_code, 404);
        assert!(err.request_id.is_none());
    }

    #[test]
    fn api_error_rejects_missing_fields() {
        let result: Result<ApiError, _> = serde_json::from_str(r#"{"name":"X","message":"y"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn display_formats() {
        assert_eq!(
            TransportError::no_connectivity().to_string(),
            "HTTP 503: network.noInternetConnection"
        );
    }
}
