//! Loading [`AlibabaConfig`] from environment variables plus explicit overrides.
//!
//! | Option          | Variable                | Required | Default |
//! |-----------------|-------------------------|----------|---------|
//! | `app_key`       | `ALIBABA_APP_KEY`       | yes      |         |
//! | `app_secret`    | `ALIBABA_APP_SECRET`    | yes      |         |
//! | `access_token`  | `ALIBABA_ACCESS_TOKEN`  | no       | none    |
//! | `refresh_token` | `ALIBABA_REFRESH_TOKEN` | no       | none    |
//! | `use_sandbox`   | `ALIBABA_USE_SANDBOX`   | no       | `false` |
//! | `timeout`       | `ALIBABA_TIMEOUT`       | no       | `30`    |
//!
//! Overrides always beat the environment. `ALIBABA_USE_SANDBOX` accepts
//! `1`, `true` or `yes` (case-insensitive); anything else means production.

use super::{AlibabaConfig, AppKey, AppSecret, BaseUrl};
use crate::error::ConfigError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_APP_KEY: &str = "ALIBABA_APP_KEY";
const ENV_APP_SECRET: &str = "ALIBABA_APP_SECRET";
const ENV_ACCESS_TOKEN: &str = "ALIBABA_ACCESS_TOKEN";
const ENV_REFRESH_TOKEN: &str = "ALIBABA_REFRESH_TOKEN";
const ENV_USE_SANDBOX: &str = "ALIBABA_USE_SANDBOX";
const ENV_TIMEOUT: &str = "ALIBABA_TIMEOUT";

/// Explicit configuration values that take precedence over the environment.
///
/// Every field is optional; `None` (or an empty string) defers to the
/// corresponding environment variable.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Application key.
    pub app_key: Option<String>,
    /// Application secret.
    pub app_secret: Option<String>,
    /// OAuth access token.
    pub access_token: Option<String>,
    /// OAuth refresh token.
    pub refresh_token: Option<String>,
    /// Sandbox flag.
    pub use_sandbox: Option<bool>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// REST base URL override. Not read from the environment.
    pub base_url: Option<String>,
}

/// Interprets an `ALIBABA_USE_SANDBOX` value.
///
/// ```rust
/// use alibaba_api::parse_sandbox_flag;
///
/// assert!(parse_sandbox_flag("YES"));
/// assert!(parse_sandbox_flag("1"));
/// assert!(!parse_sandbox_flag("false"));
/// assert!(!parse_sandbox_flag(""));
/// ```
#[must_use]
pub fn parse_sandbox_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

/// Builds an [`AlibabaConfig`] from `overrides`, falling back to `lookup` for
/// anything not overridden.
///
/// `lookup` maps an environment variable name to its value; pass
/// `|name| std::env::var(name).ok()` for the process environment or a map
/// lookup in tests.
///
/// # Errors
///
/// - [`ConfigError::MissingRequiredField`] when the app key or secret is
///   absent from both sources
/// - [`ConfigError::InvalidTimeout`] when `ALIBABA_TIMEOUT` is not an integer
/// - [`ConfigError::InvalidBaseUrl`] when the base URL override is malformed
pub fn load_config<F>(overrides: ConfigOverrides, lookup: F) -> Result<AlibabaConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let resolve = |explicit: Option<String>, var: &str| -> Option<String> {
        explicit
            .filter(|value| !value.is_empty())
            .or_else(|| lookup(var).filter(|value| !value.is_empty()))
    };

    let app_key = resolve(overrides.app_key, ENV_APP_KEY)
        .ok_or(ConfigError::MissingRequiredField { field: ENV_APP_KEY })?;
    let app_secret = resolve(overrides.app_secret, ENV_APP_SECRET).ok_or(
        ConfigError::MissingRequiredField {
            field: ENV_APP_SECRET,
        },
    )?;

    let use_sandbox = match overrides.use_sandbox {
        Some(flag) => flag,
        None => lookup(ENV_USE_SANDBOX).is_some_and(|value| parse_sandbox_flag(&value)),
    };

    let timeout_secs = match overrides.timeout_secs {
        Some(secs) => secs,
        None => match lookup(ENV_TIMEOUT).filter(|value| !value.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout { value: raw.clone() })?,
            None => DEFAULT_TIMEOUT_SECS,
        },
    };

    let mut builder = AlibabaConfig::builder()
        .app_key(AppKey::new(app_key)?)
        .app_secret(AppSecret::new(app_secret)?)
        .use_sandbox(use_sandbox)
        .timeout_secs(timeout_secs);

    if let Some(token) = resolve(overrides.access_token, ENV_ACCESS_TOKEN) {
        builder = builder.access_token(token);
    }
    if let Some(token) = resolve(overrides.refresh_token, ENV_REFRESH_TOKEN) {
        builder = builder.refresh_token(token);
    }
    if let Some(url) = overrides.base_url.filter(|url| !url.is_empty()) {
        builder = builder.base_url(BaseUrl::new(url)?);
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_loads_required_values_from_env() {
        let config = load_config(
            ConfigOverrides::default(),
            env(&[("ALIBABA_APP_KEY", "key"), ("ALIBABA_APP_SECRET", "secret")]),
        )
        .unwrap();

        assert_eq!(config.app_key().as_ref(), "key");
        assert_eq!(config.app_secret().as_ref(), "secret");
        assert!(!config.use_sandbox());
        assert_eq!(config.timeout_secs(), DEFAULT_TIMEOUT_SECS);
        assert!(config.access_token().is_none());
    }

    #[test]
    fn test_missing_app_key_is_reported_by_variable_name() {
        let result = load_config(
            ConfigOverrides::default(),
            env(&[("ALIBABA_APP_SECRET", "secret")]),
        );
        assert_eq!(
            result.unwrap_err(),
            ConfigError::MissingRequiredField {
                field: "ALIBABA_APP_KEY"
            }
        );
    }

    #[test]
    fn test_missing_app_secret_is_reported() {
        let result = load_config(
            ConfigOverrides::default(),
            env(&[("ALIBABA_APP_KEY", "key"), ("ALIBABA_APP_SECRET", "")]),
        );
        assert_eq!(
            result.unwrap_err(),
            ConfigError::MissingRequiredField {
                field: "ALIBABA_APP_SECRET"
            }
        );
    }

    #[test]
    fn test_overrides_take_precedence() {
        let overrides = ConfigOverrides {
            app_key: Some("override-key".to_string()),
            access_token: Some("override-token".to_string()),
            use_sandbox: Some(false),
            timeout_secs: Some(5),
            ..ConfigOverrides::default()
        };
        let config = load_config(
            overrides,
            env(&[
                ("ALIBABA_APP_KEY", "env-key"),
                ("ALIBABA_APP_SECRET", "env-secret"),
                ("ALIBABA_ACCESS_TOKEN", "env-token"),
                ("ALIBABA_USE_SANDBOX", "true"),
                ("ALIBABA_TIMEOUT", "60"),
            ]),
        )
        .unwrap();

        assert_eq!(config.app_key().as_ref(), "override-key");
        assert_eq!(config.app_secret().as_ref(), "env-secret");
        assert_eq!(config.access_token(), Some("override-token"));
        assert!(!config.use_sandbox());
        assert_eq!(config.timeout_secs(), 5);
    }

    #[test]
    fn test_sandbox_flag_values() {
        for (raw, expected) in [
            ("1", true),
            ("true", true),
            ("TRUE", true),
            ("Yes", true),
            ("0", false),
            ("no", false),
            ("on", false),
        ] {
            let config = load_config(
                ConfigOverrides::default(),
                env(&[
                    ("ALIBABA_APP_KEY", "key"),
                    ("ALIBABA_APP_SECRET", "secret"),
                    ("ALIBABA_USE_SANDBOX", raw),
                ]),
            )
            .unwrap();
            assert_eq!(config.use_sandbox(), expected, "value {raw:?}");
        }
    }

    #[test]
    fn test_env_tokens_and_timeout() {
        let config = load_config(
            ConfigOverrides::default(),
            env(&[
                ("ALIBABA_APP_KEY", "key"),
                ("ALIBABA_APP_SECRET", "secret"),
                ("ALIBABA_ACCESS_TOKEN", "access"),
                ("ALIBABA_REFRESH_TOKEN", "refresh"),
                ("ALIBABA_TIMEOUT", "12"),
            ]),
        )
        .unwrap();

        assert_eq!(config.access_token(), Some("access"));
        assert_eq!(config.refresh_token(), Some("refresh"));
        assert_eq!(config.timeout_secs(), 12);
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let result = load_config(
            ConfigOverrides::default(),
            env(&[
                ("ALIBABA_APP_KEY", "key"),
                ("ALIBABA_APP_SECRET", "secret"),
                ("ALIBABA_TIMEOUT", "thirty"),
            ]),
        );
        assert!(matches!(result, Err(ConfigError::InvalidTimeout { .. })));
    }

    #[test]
    fn test_base_url_override_is_validated() {
        let overrides = ConfigOverrides {
            app_key: Some("key".to_string()),
            app_secret: Some("secret".to_string()),
            base_url: Some("not a url".to_string()),
            ..ConfigOverrides::default()
        };
        let result = load_config(overrides, env(&[]));
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
    }
}
