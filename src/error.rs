// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system. Usage
//! errors (`InvalidArgument`, `AuthenticationRequired`) are raised before any
//! request leaves the process; `ApiCall` carries everything the platform told
//! us about a failed request; `SchemaMismatch` means the platform changed the
//! shape of a record we depend on.

use reqwest::StatusCode;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

use crate::constants::RATE_LIMIT_DOCUMENTATION_URL;

/// A non-success response from the GitHub API.
///
/// The payload is the decoded error body, typically carrying a `message` and
/// a `documentation_url`. Classification helpers mirror the statuses callers
/// actually branch on.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiCallError {
    status: StatusCode,
    payload: Map<String, Value>,
    rate_limit_url: String,
}

impl ApiCallError {
    /// Creates an error using the default rate-limit documentation URL.
    pub fn new(status: StatusCode, payload: Map<String, Value>) -> Self {
        Self::with_rate_limit_url(status, payload, RATE_LIMIT_DOCUMENTATION_URL)
    }

    /// Creates an error that recognizes rate limiting by the given URL.
    pub fn with_rate_limit_url(
        status: StatusCode,
        payload: Map<String, Value>,
        rate_limit_url: impl Into<String>,
    ) -> Self {
        Self {
            status,
            payload,
            rate_limit_url: rate_limit_url.into(),
        }
    }

    /// Builds an error from a raw response body.
    ///
    /// Bodies that are not JSON objects are kept as `{"message": <body>}` so the
    /// payload is always a mapping.
    pub fn from_body(status: StatusCode, body: &str, rate_limit_url: &str) -> Self {
        let payload = match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => map,
            _ => {
                let mut map = Map::new();
                map.insert("message".to_string(), Value::String(body.trim().to_string()));
                map
            }
        };
        Self::with_rate_limit_url(status, payload, rate_limit_url)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// The human message supplied by the platform, if any.
    pub fn message(&self) -> Option<&str> {
        self.payload.get("message").and_then(Value::as_str)
    }

    pub fn documentation_url(&self) -> Option<&str> {
        self.payload.get("documentation_url").and_then(Value::as_str)
    }

    /// The documentation URL that identifies rate limiting.
    pub fn rate_limit_url(&self) -> &str {
        &self.rate_limit_url
    }

    pub fn bad_request(&self) -> bool {
        self.status == StatusCode::BAD_REQUEST
    }

    pub fn unprocessable_entity(&self) -> bool {
        self.status == StatusCode::UNPROCESSABLE_ENTITY
    }

    pub fn forbidden(&self) -> bool {
        self.status == StatusCode::FORBIDDEN
    }

    pub fn unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }

    /// The resource exists but cannot be computed yet (e.g. an empty repository).
    pub fn conflict(&self) -> bool {
        self.status == StatusCode::CONFLICT
    }

    pub fn not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND
    }

    /// Forbidden and pointing at the rate-limiting documentation.
    pub fn rate_limited(&self) -> bool {
        self.forbidden() && self.documentation_url() == Some(self.rate_limit_url.as_str())
    }
}

impl fmt::Display for ApiCallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let payload = serde_json::to_string(&self.payload).map_err(|_| fmt::Error)?;
        write!(f, "{}: {}", self.status.as_u16(), payload)
    }
}

impl std::error::Error for ApiCallError {}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid value {value:?} for {parameter}: must be one of {}", allowed.join(", "))]
    InvalidArgument {
        parameter: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("{endpoint} requires authentication. Please include an OAuth2 token.")]
    AuthenticationRequired { endpoint: &'static str },

    #[error("GitHub API call failed with {0}")]
    ApiCall(#[from] ApiCallError),

    #[error("Record '{record}' does not match its schema at '{field}': {reason}")]
    SchemaMismatch {
        record: &'static str,
        field: &'static str,
        reason: String,
    },

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {message}")]
    InternalError { message: String },

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

impl AppError {
    /// Returns the API failure when this error came from a non-success response.
    pub fn as_api_call(&self) -> Option<&ApiCallError> {
        match self {
            AppError::ApiCall(error) => Some(error),
            _ => None,
        }
    }

    /// Whether the platform reported the resource as not computable yet.
    pub fn is_conflict(&self) -> bool {
        self.as_api_call().is_some_and(ApiCallError::conflict)
    }

    pub fn is_not_found(&self) -> bool {
        self.as_api_call().is_some_and(ApiCallError::not_found)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.as_api_call().is_some_and(ApiCallError::rate_limited)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::InvalidUrl {
            url: String::new(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
