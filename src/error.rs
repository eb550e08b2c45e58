//! Error types for comment-expander
//!
//! Errors fall into two groups:
//! - API errors: the remote service answered, but its response signals a failure
//!   (populated `errors` channel or an envelope that does not have the expected shape)
//! - Transport errors: network failures and non-success HTTP statuses, produced by the
//!   HTTP client and propagated without inspection
//!
//! Expansion never recovers locally. The first error aborts the whole expansion.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for comment-expander operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for comment-expander
#[derive(Debug, Error)]
pub enum Error {
    /// The remote API reported an error or returned a malformed envelope
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success HTTP status
    #[error("HTTP {status} from {url}")]
    Http {
        /// HTTP status code returned by the server
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A request URL could not be built
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "limits.bulk_lookup")
        key: Option<String>,
    },
}

impl Error {
    /// Machine-readable error code
    pub fn error_code(&self) -> &str {
        match self {
            Error::Api(ApiError::Rejected(_)) => "api_rejected",
            Error::Api(ApiError::MalformedEnvelope(_)) => "api_malformed_envelope",
            Error::Network(_) => "network_error",
            Error::Http { .. } => "http_error",
            Error::Serialization(_) => "serialization_error",
            Error::InvalidUrl(_) => "invalid_url",
            Error::Config { .. } => "config_error",
        }
    }

    /// Whether this error was produced by the transport rather than the API itself
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Http { .. })
    }
}

/// Failures signalled by the API's own error channel
#[derive(Debug, Error)]
pub enum ApiError {
    /// The `errors` array of the response was not empty
    #[error("{}", format_details(.0))]
    Rejected(Vec<ApiErrorDetail>),

    /// The response did not have the `{ json: { data, errors } }` shape
    #[error("malformed response envelope: {0}")]
    MalformedEnvelope(String),
}

/// One entry of the API `errors` array.
///
/// The wire format is a positional triple: `["CODE", "message", "field"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error code (e.g. "TOO_MUCH_FLOOD")
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Request field the error refers to, if any
    pub field: Option<String>,
}

impl ApiErrorDetail {
    /// Decode a single entry of the `errors` array.
    ///
    /// Returns `None` when the entry is not an array starting with a string code.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let parts = value.as_array()?;
        let code = parts.first()?.as_str()?.to_string();
        let message = parts
            .get(1)
            .and_then(|m| m.as_str())
            .unwrap_or_default()
            .to_string();
        let field = parts.get(2).and_then(|f| f.as_str()).map(str::to_string);
        Some(Self {
            code,
            message,
            field,
        })
    }
}

impl std::fmt::Display for ApiErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}: {} (field: {})", self.code, self.message, field),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

fn format_details(details: &[ApiErrorDetail]) -> String {
    details
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
