//! Error types for the request layer.
//!
//! # Design
//! Every failed call ends in one `RequestError`. The kinds a user can see
//! (`Status`, `Transport`, `Body`) display as their fixed human-readable
//! message, so callers render any failure the same way. The status table is
//! the pure function `status_message`.

use thiserror::Error;

pub const SERVER_CONNECTION_FAILED: &str = "server connection failed";
pub const LOGIN_EXPIRED: &str = "login expired, please log in again";
pub const UNKNOWN_ERROR: &str = "unknown error, please log in again";
pub const NETWORK_ERROR: &str = "network error, please check your connection";
pub const RESPONSE_INCOMPLETE: &str = "response could not be read, please try again";

/// Map an error status to the message shown to the user.
pub fn status_message(status: u16) -> &'static str {
    match status {
        500 => SERVER_CONNECTION_FAILED,
        401 => LOGIN_EXPIRED,
        _ => UNKNOWN_ERROR,
    }
}

/// Errors returned by `Http` and the API functions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: &'static str },

    /// No response was received (DNS, refused connection, timeout, bad URL).
    #[error("{message}")]
    Transport { message: &'static str, detail: String },

    /// A response arrived but its body could not be read (connection cut,
    /// body over the configured size limit).
    #[error("{message}")]
    Body {
        status: u16,
        message: &'static str,
        detail: String,
    },

    /// A 2xx body did not decode into the expected type.
    #[error("failed to decode response body: {0}")]
    Decode(String),

    /// The request body could not be encoded as JSON.
    #[error("failed to encode request body: {0}")]
    Encode(String),
}

impl RequestError {
    pub fn from_status(status: u16) -> Self {
        RequestError::Status {
            status,
            message: status_message(status),
        }
    }

    pub fn transport(detail: impl Into<String>) -> Self {
        RequestError::Transport {
            message: NETWORK_ERROR,
            detail: detail.into(),
        }
    }

    pub fn body(status: u16, detail: impl Into<String>) -> Self {
        RequestError::Body {
            status,
            message: RESPONSE_INCOMPLETE,
            detail: detail.into(),
        }
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } | RequestError::Body { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this failure is one the user is told about.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            RequestError::Status { .. } | RequestError::Transport { .. } | RequestError::Body { .. }
        )
    }
}
