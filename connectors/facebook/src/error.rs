//! Facebook-specific error types.

use std::fmt;

use thiserror::Error;

use crate::requestor::TransportError;

/// Which error shape the API used to report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorSource {
    /// Graph API shape: `{"error": {"type": ..., "message": ...}}`
    Graph,
    /// Legacy REST shape: `{"error_code": N, "error_msg": ...}`
    Legacy,
}

impl fmt::Display for ApiErrorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Graph => f.write_str("graph"),
            Self::Legacy => f.write_str("legacy"),
        }
    }
}

/// Facebook-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FacebookError {
    /// Caller supplied a reserved, blank, or missing argument
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Non-200 response or transport failure
    #[error("Network error{}: {message}", status_suffix(.status_code))]
    Network {
        status_code: Option<u16>,
        message: String,
    },

    /// HTTP 200 whose body encodes a remote-side error
    #[error("Facebook API error {code} ({origin}): {message}")]
    ApiResponse {
        code: String,
        message: String,
        origin: ApiErrorSource,
    },

    /// Response JSON did not have the expected structure, or decoding failed
    #[error("JSON mapping error: {0}")]
    Mapping(String),

    /// Operation is part of the client surface but not supported yet
    #[error("Operation not implemented: {0}")]
    NotImplemented(&'static str),
}

fn status_suffix(status_code: &Option<u16>) -> String {
    status_code.map_or_else(String::new, |status| format!(" (HTTP {status})"))
}

impl FacebookError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    pub(crate) fn mapping(message: impl Into<String>) -> Self {
        Self::Mapping(message.into())
    }

    /// Check whether the caller misused the API.
    #[must_use]
    pub const fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter(_))
    }

    /// HTTP status code attached to a network failure, if any.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Network { status_code, .. } => *status_code,
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FacebookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Mapping(err.to_string())
    }
}

impl From<TransportError> for FacebookError {
    fn from(err: TransportError) -> Self {
        Self::Network {
            status_code: None,
            message: err.to_string(),
        }
    }
}

/// Result type for Facebook operations.
pub type FacebookResult<T> = Result<T, FacebookError>;
