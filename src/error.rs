//! Error types for Forge API operations.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur during Forge API operations.
#[derive(Debug, Error)]
pub enum ForgeError {
    /// No bearer token is attached to the client.
    #[error("no authorization token configured; attach one with `with_token` or `set_token`")]
    MissingToken,

    /// A required path parameter is missing or empty.
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// A filter value is malformed or too long.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// The bearer token was rejected with HTTP 401. Obtain a fresh token
    /// and retry; the client never renews tokens on its own.
    #[error("authorization token expired or rejected, renew the token")]
    TokenExpired,

    /// A transient upstream failure (429 or 5xx) that survived the retry
    /// budget, or a transient auth-server response.
    #[error("transient upstream failure (HTTP {status}): {body}")]
    Transient { status: u16, body: String },

    /// Any other non-2xx response from the API.
    #[error("request to {endpoint} failed with HTTP {status}: {body}")]
    Api {
        status: u16,
        body: String,
        endpoint: String,
    },

    /// The server kept answering 202 past the configured polling bound.
    #[error("{endpoint} still processing after {waited:?}")]
    ProcessingTimeout { endpoint: String, waited: Duration },

    /// The payload parsed, but not into the shape the endpoint promises.
    #[error("unexpected payload shape: {0}")]
    UnexpectedPayload(String),

    /// The requested flow is not supported by this crate.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type alias for Forge operations.
pub type Result<T> = core::result::Result<T, ForgeError>;
