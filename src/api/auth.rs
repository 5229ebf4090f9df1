//! OAuth token management.
//!
//! The authorization code is obtained interactively by visiting
//! [`AuthApi::authorization_url`]; it is then exchanged for tokens with
//! [`AuthApi::create_token`].

use serde::Serialize;
use serde_json::Value;

use super::{count_field, string_field};
use crate::clients::{business_params, AlibabaClient, AlibabaError, AuthError, ResponseMapping};

/// OAuth authorization endpoint.
pub const AUTHORIZE_URL: &str = "https://openapi-auth.alibaba.com/oauth/authorize";

const CREATE_TOKEN_PATH: &str = "/auth/token/create";
const REFRESH_TOKEN_PATH: &str = "/auth/token/refresh";

/// Tokens returned by the create and refresh endpoints.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TokenResult {
    /// The new access token.
    pub access_token: Option<String>,
    /// The new refresh token.
    pub refresh_token: Option<String>,
    /// Access token lifetime in seconds.
    pub expires_in: Option<u64>,
    /// Refresh token lifetime in seconds.
    pub refresh_expires_in: Option<u64>,
    /// Account details; only returned by token creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_info: Option<Value>,
    /// Account platform; only returned by token creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_platform: Option<String>,
    /// The response this result was built from.
    #[serde(skip)]
    pub raw: ResponseMapping,
}

impl TokenResult {
    fn from_response(response: ResponseMapping, include_account: bool) -> Self {
        let body = Value::Object(response);
        let (user_info, account_platform) = if include_account {
            (
                Some(
                    body.get("user_info")
                        .cloned()
                        .unwrap_or_else(|| Value::Object(ResponseMapping::new())),
                ),
                string_field(&body, "account_platform"),
            )
        } else {
            (None, None)
        };

        Self {
            access_token: string_field(&body, "access_token"),
            refresh_token: string_field(&body, "refresh_token"),
            expires_in: count_field(&body, "expires_in"),
            refresh_expires_in: count_field(&body, "refresh_expires_in"),
            user_info,
            account_platform,
            raw: match body {
                Value::Object(map) => map,
                _ => ResponseMapping::new(),
            },
        }
    }
}

/// Summary of the configured credentials. Never contains secrets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuthStatus {
    /// `production` or `sandbox`.
    pub environment: String,
    /// App key shortened to its first 8 characters.
    pub app_key: String,
    /// Whether an access token is configured.
    pub has_access_token: bool,
    /// Whether a refresh token is configured.
    pub has_refresh_token: bool,
}

/// Authentication service.
#[derive(Clone, Copy, Debug)]
pub struct AuthApi<'a> {
    client: &'a AlibabaClient,
}

impl<'a> AuthApi<'a> {
    /// Creates the service for `client`.
    #[must_use]
    pub const fn new(client: &'a AlibabaClient) -> Self {
        Self { client }
    }

    /// Exchanges an OAuth authorization code for tokens.
    ///
    /// # Errors
    ///
    /// Propagates any dispatcher error.
    pub async fn create_token(&self, code: &str) -> Result<TokenResult, AlibabaError> {
        let response = self
            .client
            .get(CREATE_TOKEN_PATH, &business_params([("code", code)]))
            .await?;
        Ok(TokenResult::from_response(response, true))
    }

    /// Refreshes the access token.
    ///
    /// Uses `refresh_token` when given, otherwise the configured refresh
    /// token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] without sending anything when no refresh token
    /// is available; otherwise propagates any dispatcher error.
    pub async fn refresh_token(
        &self,
        refresh_token: Option<&str>,
    ) -> Result<TokenResult, AlibabaError> {
        let token = refresh_token
            .filter(|token| !token.is_empty())
            .or_else(|| self.client.config().refresh_token())
            .ok_or_else(|| {
                AuthError::new(
                    "No refresh token available. \
                     Provide refresh_token parameter or set ALIBABA_REFRESH_TOKEN.",
                )
            })?;

        let response = self
            .client
            .get(REFRESH_TOKEN_PATH, &business_params([("refresh_token", token)]))
            .await?;
        Ok(TokenResult::from_response(response, false))
    }

    /// Reports which credentials are configured.
    #[must_use]
    pub fn status(&self) -> AuthStatus {
        let config = self.client.config();
        AuthStatus {
            environment: config.environment().to_string(),
            app_key: config.app_key().masked(),
            has_access_token: config.access_token().is_some(),
            has_refresh_token: config.refresh_token().is_some(),
        }
    }

    /// Returns the URL a user visits to authorize this app.
    ///
    /// ```rust
    /// use alibaba_api::{AlibabaClient, AlibabaConfig, AppKey, AppSecret};
    ///
    /// let config = AlibabaConfig::builder()
    ///     .app_key(AppKey::new("500102").unwrap())
    ///     .app_secret(AppSecret::new("secret").unwrap())
    ///     .build()
    ///     .unwrap();
    /// let client = AlibabaClient::new(config).unwrap();
    ///
    /// assert_eq!(
    ///     client.auth().authorization_url("https://example.com/cb"),
    ///     "https://openapi-auth.alibaba.com/oauth/authorize?response_type=code\
    ///      &client_id=500102&redirect_uri=https%3A%2F%2Fexample.com%2Fcb"
    /// );
    /// ```
    #[must_use]
    pub fn authorization_url(&self, redirect_uri: &str) -> String {
        format!(
            "{AUTHORIZE_URL}?response_type=code&client_id={}&redirect_uri={}",
            urlencoding::encode(self.client.config().app_key().as_ref()),
            urlencoding::encode(redirect_uri)
        )
    }
}
