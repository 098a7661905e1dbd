//! Unified error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::network::ERROR_KEY;

/// Top-level error.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Missing or unusable configuration: credentials, endpoint list.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Returned by the typed sub-client helpers only. `RelayClient::send`
    /// hands error-shaped bodies back verbatim.
    #[error("API error: {0}")]
    Api(ApiErrorBody),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl RelayError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Transport-layer errors. One of these on a non-final host triggers failover.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Response from {url} is not JSON (status {status}): {body}")]
    InvalidBody {
        url: String,
        status: u16,
        body: String,
    },

    /// For [`Transport`](crate::dispatch::Transport) implementations other
    /// than `RelayHttp` to report a failed round trip. Fails over like any
    /// other transport error.
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("No endpoints configured")]
    NoEndpoints,
}

/// Storage helper errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[cfg(feature = "sqlite")]
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("{0} requires at least one field")]
    Empty(&'static str),

    #[error("{0}")]
    Backend(String),
}

/// Error body the exchange sends for rejected calls, e.g.
/// `{"code": -1121, "msg": "Invalid symbol."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
}

impl ApiErrorBody {
    /// Extract the error body from a response, if it carries the error key.
    pub fn from_response(value: &serde_json::Value) -> Option<Self> {
        let object = value.as_object()?;
        let code = object.get(ERROR_KEY)?.as_i64()?;
        let msg = object
            .get("msg")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string();
        Some(Self { code, msg })
    }
}

impl std::fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "code {}: {}", self.code, self.msg)
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RelayError>;
