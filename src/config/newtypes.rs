//! Validated newtype wrappers for configuration values.
//!
//! These wrappers validate their contents on construction and keep
//! credentials out of `Debug` output.

use crate::error::ConfigError;
use std::fmt;

/// A validated Alibaba application key.
///
/// # Example
///
/// ```rust
/// use alibaba_api::AppKey;
///
/// let key = AppKey::new("500102").unwrap();
/// assert_eq!(key.as_ref(), "500102");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppKey(String);

impl AppKey {
    /// Creates a new validated app key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAppKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyAppKey);
        }
        Ok(Self(key))
    }

    /// Returns the key shortened for display: the first 8 characters
    /// followed by `...`.
    ///
    /// ```rust
    /// use alibaba_api::AppKey;
    ///
    /// let key = AppKey::new("1234567890abcdef").unwrap();
    /// assert_eq!(key.masked(), "12345678...");
    /// ```
    #[must_use]
    pub fn masked(&self) -> String {
        let prefix: String = self.0.chars().take(8).collect();
        format!("{prefix}...")
    }
}

impl AsRef<str> for AppKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated Alibaba application secret.
///
/// The `Debug` implementation masks the value so the secret cannot leak
/// into logs.
///
/// ```rust
/// use alibaba_api::AppSecret;
///
/// let secret = AppSecret::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "AppSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AppSecret(String);

impl AppSecret {
    /// Creates a new validated app secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAppSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptyAppSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for AppSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AppSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AppSecret(*****)")
    }
}

/// An OAuth token (access or refresh) with masked `Debug` output.
///
/// Empty strings are treated as "no token" by the configuration layer, so
/// construction goes through [`OAuthToken::non_empty`].
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthToken(String);

impl OAuthToken {
    /// Wraps `token`, returning `None` for an empty string.
    #[must_use]
    pub fn non_empty(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }
}

impl AsRef<str> for OAuthToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for OAuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OAuthToken(*****)")
    }
}

/// A validated REST base URL, e.g. `https://openapi-api.alibaba.com/rest`.
///
/// Trailing slashes are removed so endpoint paths (which start with `/`)
/// can be appended directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL does not use the
    /// `http` or `https` scheme or has no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');

        let rest = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .ok_or_else(|| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if host.is_empty() {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
