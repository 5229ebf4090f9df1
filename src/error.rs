//! Configuration error types for the Alibaba API client.
//!
//! Request-time failures live in [`crate::clients::AlibabaError`]; this module
//! only covers problems detected while assembling an [`crate::AlibabaConfig`].
//!
//! # Example
//!
//! ```rust
//! use alibaba_api::{AppKey, ConfigError};
//!
//! let result = AppKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAppKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while building or loading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// App key cannot be empty.
    #[error("App key cannot be empty. Set ALIBABA_APP_KEY or pass --app-key.")]
    EmptyAppKey,

    /// App secret cannot be empty.
    #[error("App secret cannot be empty. Set ALIBABA_APP_SECRET or pass --app-secret.")]
    EmptyAppSecret,

    /// A required field is missing.
    #[error("{field} is required")]
    MissingRequiredField {
        /// The environment variable or option name that was missing.
        field: &'static str,
    },

    /// The timeout value could not be parsed as whole seconds.
    #[error("Invalid timeout '{value}'. Expected a whole number of seconds.")]
    InvalidTimeout {
        /// The raw value that was provided.
        value: String,
    },

    /// The base URL override is malformed.
    #[error("Invalid base URL '{url}'. Expected an http:// or https:// URL.")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}
