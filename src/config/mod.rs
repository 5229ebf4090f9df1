//! Configuration types for the Alibaba API client.
//!
//! # Overview
//!
//! - [`AlibabaConfig`]: immutable credentials and transport settings
//! - [`AlibabaConfigBuilder`]: builder for [`AlibabaConfig`]
//! - [`ConfigOverrides`] and [`load_config`]: the environment-backed loader
//! - [`AppKey`], [`AppSecret`], [`OAuthToken`], [`BaseUrl`]: validated newtypes
//! - [`Environment`]: production or sandbox
//!
//! # Example
//!
//! ```rust
//! use alibaba_api::{AlibabaConfig, AppKey, AppSecret};
//!
//! let config = AlibabaConfig::builder()
//!     .app_key(AppKey::new("my-app-key").unwrap())
//!     .app_secret(AppSecret::new("my-secret").unwrap())
//!     .use_sandbox(true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url(), "https://openapi-api-sandbox.alibaba.com/rest");
//! ```

mod environment;
mod loader;
mod newtypes;

pub use environment::{Environment, PRODUCTION_BASE_URL, SANDBOX_BASE_URL};
pub use loader::{load_config, parse_sandbox_flag, ConfigOverrides, DEFAULT_TIMEOUT_SECS};
pub use newtypes::{AppKey, AppSecret, BaseUrl, OAuthToken};

use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for the Alibaba API client.
///
/// Built once at startup and read-only afterwards. The core client never
/// consults the process environment; use [`AlibabaConfig::from_env`] or
/// [`load_config`] at the edge of the program instead.
#[derive(Clone, Debug)]
pub struct AlibabaConfig {
    app_key: AppKey,
    app_secret: AppSecret,
    access_token: Option<OAuthToken>,
    refresh_token: Option<OAuthToken>,
    environment: Environment,
    timeout_secs: u64,
    base_url_override: Option<BaseUrl>,
}

impl AlibabaConfig {
    /// Creates a new builder for constructing an `AlibabaConfig`.
    #[must_use]
    pub fn builder() -> AlibabaConfigBuilder {
        AlibabaConfigBuilder::new()
    }

    /// Loads configuration from `ALIBABA_*` environment variables, with
    /// `overrides` taking precedence.
    ///
    /// # Errors
    ///
    /// See [`load_config`].
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        load_config(overrides, |name| std::env::var(name).ok())
    }

    /// Returns the app key.
    #[must_use]
    pub const fn app_key(&self) -> &AppKey {
        &self.app_key
    }

    /// Returns the app secret.
    #[must_use]
    pub const fn app_secret(&self) -> &AppSecret {
        &self.app_secret
    }

    /// Returns the configured access token, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_ref().map(AsRef::as_ref)
    }

    /// Returns the configured refresh token, if any.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_ref().map(AsRef::as_ref)
    }

    /// Returns the target environment.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns `true` when requests go to the sandbox.
    #[must_use]
    pub const fn use_sandbox(&self) -> bool {
        self.environment.is_sandbox()
    }

    /// Returns the request timeout in whole seconds.
    #[must_use]
    pub const fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the REST base URL: the override when set, otherwise the
    /// URL of the configured environment.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url_override
            .as_ref()
            .map_or_else(|| self.environment.base_url(), AsRef::as_ref)
    }
}

// Verify AlibabaConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AlibabaConfig>();
};

/// Builder for [`AlibabaConfig`].
///
/// `app_key` and `app_secret` are required.
///
/// # Defaults
///
/// - `access_token` / `refresh_token`: `None`
/// - `use_sandbox`: `false`
/// - `timeout_secs`: 30
/// - `base_url`: derived from the environment
#[derive(Debug, Default)]
pub struct AlibabaConfigBuilder {
    app_key: Option<AppKey>,
    app_secret: Option<AppSecret>,
    access_token: Option<OAuthToken>,
    refresh_token: Option<OAuthToken>,
    use_sandbox: Option<bool>,
    timeout_secs: Option<u64>,
    base_url: Option<BaseUrl>,
}

impl AlibabaConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the app key (required).
    #[must_use]
    pub fn app_key(mut self, key: AppKey) -> Self {
        self.app_key = Some(key);
        self
    }

    /// Sets the app secret (required).
    #[must_use]
    pub fn app_secret(mut self, secret: AppSecret) -> Self {
        self.app_secret = Some(secret);
        self
    }

    /// Sets the OAuth access token. An empty string clears it.
    #[must_use]
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = OAuthToken::non_empty(token);
        self
    }

    /// Sets the OAuth refresh token. An empty string clears it.
    #[must_use]
    pub fn refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = OAuthToken::non_empty(token);
        self
    }

    /// Selects the sandbox environment.
    #[must_use]
    pub const fn use_sandbox(mut self, use_sandbox: bool) -> Self {
        self.use_sandbox = Some(use_sandbox);
        self
    }

    /// Sets the request timeout in seconds.
    #[must_use]
    pub const fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Overrides the REST base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Builds the [`AlibabaConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `app_key` or
    /// `app_secret` are not set.
    pub fn build(self) -> Result<AlibabaConfig, ConfigError> {
        let app_key = self
            .app_key
            .ok_or(ConfigError::MissingRequiredField { field: "app_key" })?;
        let app_secret = self
            .app_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "app_secret",
            })?;

        Ok(AlibabaConfig {
            app_key,
            app_secret,
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            environment: Environment::from_sandbox_flag(self.use_sandbox.unwrap_or(false)),
            timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            base_url_override: self.base_url,
        })
    }
}
