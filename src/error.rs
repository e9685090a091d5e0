//! Error types for the Reyah SDK.

use crate::request::Request;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Result type for Reyah operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Prefix of every [`RequestError`] message.
pub const REQUEST_FAILED_MESSAGE: &str = "An error occurred during the execution of the request";

const NO_RESPONSE_MESSAGE: &str = "The request was made but no response was received";
const SETUP_FAILED_MESSAGE: &str =
    "Something happened in setting up the request that triggered an Error";

/// Error types for the Reyah SDK.
#[derive(Error, Debug)]
pub enum Error {
    /// The API rejected the request as malformed (400).
    #[error("Invalid request: {0}")]
    InvalidRequest(RequestError),

    /// Missing or invalid credentials (401).
    #[error("Unauthorized: {0}")]
    Unauthorized(RequestError),

    /// Credentials are valid but lack access (403).
    #[error("Forbidden: {0}")]
    Forbidden(RequestError),

    /// Resource not found (404).
    #[error("Not found: {0}")]
    NotFound(RequestError),

    /// Rate limit or quota exceeded (429).
    #[error("Too many requests: {0}")]
    TooManyRequests(RequestError),

    /// The API failed with an internal error (500).
    #[error("Unknown server error: {0}")]
    Unknown(RequestError),

    /// The API is temporarily unavailable (502, 503).
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(RequestError),

    /// Any other API failure.
    #[error("API error ({code}): {0}", code = .0.code)]
    Api(RequestError),

    /// A transport failure that has not been classified yet.
    #[error("Request failed ({code}): {0}", code = .0.code)]
    Request(RequestError),

    /// An authenticated call was made before an auth provider was registered.
    #[error("No auth provided")]
    NoAuthProvided,

    /// The retry loop ended without a recorded failure.
    #[error("Could not request API, too many attempts")]
    TooManyAttempts,

    /// The auth provider could not authenticate the request.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The HTTP client could not be built.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// The transport failure behind this error, if any.
    pub fn request_error(&self) -> Option<&RequestError> {
        match self {
            Error::InvalidRequest(e)
            | Error::Unauthorized(e)
            | Error::Forbidden(e)
            | Error::NotFound(e)
            | Error::TooManyRequests(e)
            | Error::Unknown(e)
            | Error::ServiceUnavailable(e)
            | Error::Api(e)
            | Error::Request(e) => Some(e),
            _ => None,
        }
    }

    /// HTTP status of the underlying failure. `Some(0)` means no response was received.
    pub fn status(&self) -> Option<u16> {
        self.request_error().map(|e| e.code)
    }
}

/// Structured error body returned by the API.
///
/// Every field falls back to a default when the API omits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: i64,
    /// Machine-readable error tag.
    #[serde(rename = "reyah_err")]
    pub kind: String,
    /// Status name.
    pub status: String,
    /// Human-readable message.
    pub message: String,
    /// Additional details.
    #[serde(deserialize_with = "crate::types::null_as_default")]
    pub details: Vec<Value>,
}

impl Default for ErrorBody {
    fn default() -> Self {
        Self {
            code: 0,
            kind: "UnknownErr".into(),
            status: String::new(),
            message: "An unexpected error happened".into(),
            details: Vec::new(),
        }
    }
}

impl ErrorBody {
    /// Read an `error` object field by field, defaulting each field that is
    /// missing or has an unexpected type.
    pub fn from_value(value: &Value) -> Self {
        let defaults = Self::default();
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            code: value
                .get("code")
                .and_then(|c| c.as_i64().or_else(|| c.as_str()?.trim().parse().ok()))
                .unwrap_or(defaults.code),
            kind: text("reyah_err").unwrap_or(defaults.kind),
            status: text("status").unwrap_or(defaults.status),
            message: text("message").unwrap_or(defaults.message),
            details: match value.get("details") {
                Some(Value::Array(items)) => items.clone(),
                _ => defaults.details,
            },
        }
    }
}

/// What kind of failure a [`RequestError`] is, as far as retrying goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// No response was received at all (code 0).
    NoResponse,
    /// The request itself is wrong (300..=499). Never retried.
    Client,
    /// The server failed (5xx or anything else). Retried.
    Transient,
}

impl FailureClass {
    /// Classify an HTTP status, where 0 means "no response".
    pub fn from_status(code: u16) -> Self {
        match code {
            0 => FailureClass::NoResponse,
            300..=499 => FailureClass::Client,
            _ => FailureClass::Transient,
        }
    }

    /// Whether another attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, FailureClass::Client)
    }
}

/// Snapshot of a non-2xx response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Canonical reason phrase.
    pub status_text: String,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body, as JSON when it parses, as a string otherwise.
    pub data: Value,
}

/// A failed exchange with the API, normalized from whatever the transport reported.
#[derive(Debug, Clone)]
pub struct RequestError {
    /// HTTP status, or 0 when no response was received.
    pub code: u16,
    /// Human-readable message.
    pub message: String,
    /// The request that failed.
    pub request: Request,
    /// The response, when one was received.
    pub response: Option<RawResponse>,
    /// Structured error body, when the response carried one.
    pub body: Option<ErrorBody>,
}

impl RequestError {
    /// Build an error from a non-2xx response.
    pub fn from_response(
        request: Request,
        code: u16,
        status_text: impl Into<String>,
        headers: HeaderMap,
        data: Value,
    ) -> Self {
        let top_message = data
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        let body = data
            .get("error")
            .filter(|e| e.is_object())
            .map(ErrorBody::from_value);

        let mut message = REQUEST_FAILED_MESSAGE.to_string();
        if let Some(detail) = top_message.or_else(|| body.as_ref().map(|b| b.message.clone())) {
            message.push('\n');
            message.push_str(&detail);
        }

        Self {
            code,
            message,
            request,
            response: Some(RawResponse {
                status_text: status_text.into(),
                headers,
                data,
            }),
            body,
        }
    }

    /// The request was sent but nothing came back.
    pub fn no_response(request: Request, cause: impl fmt::Display) -> Self {
        Self::without_response(request, NO_RESPONSE_MESSAGE, cause)
    }

    /// The request could not even be sent.
    pub fn setup(request: Request, cause: impl fmt::Display) -> Self {
        Self::without_response(request, SETUP_FAILED_MESSAGE, cause)
    }

    fn without_response(request: Request, reason: &str, cause: impl fmt::Display) -> Self {
        Self {
            code: 0,
            message: format!("{}\n{}: {}", REQUEST_FAILED_MESSAGE, reason, cause),
            request,
            response: None,
            body: None,
        }
    }

    /// Retry classification of this failure.
    pub fn class(&self) -> FailureClass {
        FailureClass::from_status(self.code)
    }

    /// The API error tag, `"UnknownErr"` when the body carried none.
    pub fn kind(&self) -> &str {
        self.body
            .as_ref()
            .map(|b| b.kind.as_str())
            .unwrap_or("UnknownErr")
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RequestError {}

/// Custom mapping from a transport failure to a domain error.
///
/// Returning `None` falls back to the default status mapping.
pub type ErrorHandler<'a> = &'a (dyn Fn(&RequestError) -> Option<Error> + Send + Sync);

/// Map a transport failure to its domain error.
///
/// Errors that did not come from the transport are returned unchanged.
/// A custom handler returning `Some` takes precedence over the default mapping.
pub fn dispatch(error: Error, handler: Option<ErrorHandler<'_>>) -> Error {
    let Error::Request(err) = error else {
        return error;
    };

    if let Some(custom) = handler.and_then(|h| h(&err)) {
        return custom;
    }

    classify(err)
}

/// Default status-to-domain mapping.
pub fn classify(err: RequestError) -> Error {
    match err.code {
        400 => Error::InvalidRequest(err),
        401 => Error::Unauthorized(err),
        403 => Error::Forbidden(err),
        404 => Error::NotFound(err),
        429 => Error::TooManyRequests(err),
        500 => Error::Unknown(err),
        502 | 503 => Error::ServiceUnavailable(err),
        _ => Error::Api(err),
    }
}
