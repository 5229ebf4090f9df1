//! Error types returned by the Alibaba API client.
//!
//! Every failure surfaced by [`AlibabaClient`](crate::clients::AlibabaClient)
//! or the business services is an [`AlibabaError`]:
//!
//! - [`ValidationError`]: the request was rejected before anything was sent
//! - [`NetworkError`]: transport failure, timeout, or an HTTP status >= 400
//! - [`ApiError`]: the platform answered with a non-zero `code`
//! - [`AuthError`]: authentication preconditions were not met
//!
//! # Example
//!
//! ```rust,ignore
//! use alibaba_api::{AlibabaError, HttpMethod};
//!
//! match client.execute("/alibaba/order/get", &params, HttpMethod::Get, None).await {
//!     Ok(body) => println!("{body:?}"),
//!     Err(AlibabaError::Api(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(AlibabaError::Network(e)) => println!("HTTP {:?}: {}", e.status_code, e.message),
//!     Err(other) => println!("{other}"),
//! }
//! ```

use std::fmt;

use thiserror::Error;

/// A request failed local validation and was never sent.
///
/// ```rust
/// use alibaba_api::ValidationError;
///
/// let error = ValidationError::new("api_path must start with '/', got: orders");
/// assert_eq!(error.to_string(), "api_path must start with '/', got: orders");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    /// Human-readable description.
    pub message: String,
    /// Correlation id, if one was available.
    pub request_id: Option<String>,
}

impl ValidationError {
    /// Creates a validation error with no request id.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            request_id: None,
        }
    }
}

/// A transport failure or an HTTP-level error response.
///
/// `status_code` is set only when a response was received.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct NetworkError {
    /// Human-readable description.
    pub message: String,
    /// HTTP status code of the response, if any.
    pub status_code: Option<u16>,
    /// Value of the `x-request-id` response header, if any.
    pub request_id: Option<String>,
}

impl NetworkError {
    /// Creates a network error without a response.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
            request_id: None,
        }
    }
}

/// The platform returned a non-zero `code`.
///
/// # Example
///
/// ```rust
/// use alibaba_api::ApiError;
///
/// let error = ApiError {
///     code: "130106".to_string(),
///     message: "Product invalid".to_string(),
///     sub_code: None,
///     request_id: Some("abc".to_string()),
/// };
/// assert_eq!(error.to_string(), "[130106] Product invalid");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The top-level `code` field, as a string.
    pub code: String,
    /// Resolved error message.
    pub message: String,
    /// The `sub_code` field, if present.
    pub sub_code: Option<String>,
    /// The `request_id` field of the body, if present.
    pub request_id: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sub_code {
            Some(sub_code) => write!(f, "[{}:{}] {}", self.code, sub_code, self.message),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

/// Authentication preconditions were not met, e.g. no refresh token is
/// configured.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AuthError {
    /// Human-readable description.
    pub message: String,
    /// Optional error code.
    pub code: Option<String>,
    /// Correlation id, if one was available.
    pub request_id: Option<String>,
}

impl AuthError {
    /// Creates an auth error with no code or request id.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            request_id: None,
        }
    }
}

/// Unified error type for all client operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlibabaError {
    /// Local validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Transport or HTTP-level failure.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Platform-level error response.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Authentication failure.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl AlibabaError {
    /// Returns the bare message, without any code prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(e) => &e.message,
            Self::Network(e) => &e.message,
            Self::Api(e) => &e.message,
            Self::Auth(e) => &e.message,
        }
    }

    /// Returns the error code, when the variant carries one.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api(e) => Some(&e.code),
            Self::Auth(e) => e.code.as_deref(),
            Self::Validation(_) | Self::Network(_) => None,
        }
    }

    /// Returns the correlation id, if any.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Validation(e) => e.request_id.as_deref(),
            Self::Network(e) => e.request_id.as_deref(),
            Self::Api(e) => e.request_id.as_deref(),
            Self::Auth(e) => e.request_id.as_deref(),
        }
    }

    /// Returns the HTTP status code for HTTP-level failures.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Network(e) => e.status_code,
            _ => None,
        }
    }

    /// Short label for the error category, used in CLI output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Network(_) => "network",
            Self::Api(_) => "api",
            Self::Auth(_) => "auth",
        }
    }
}
