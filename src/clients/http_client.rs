//! The signed-request dispatcher.
//!
//! [`AlibabaClient`] owns the connection pool and the configuration. Each
//! call to [`AlibabaClient::execute`] signs the parameters, performs one
//! HTTP round trip, and classifies the outcome.

use crate::clients::errors::{AlibabaError, NetworkError, ValidationError};
use crate::clients::http_request::{BusinessParams, HttpMethod};
use crate::clients::http_response::{HttpResponse, ResponseMapping};
use crate::config::AlibabaConfig;
use crate::signing::build_signed_parameters;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Async client for the Alibaba Open Platform REST gateway.
///
/// No retries are performed; every call is exactly one request.
///
/// # Thread Safety
///
/// `AlibabaClient` is `Send + Sync` and can be shared across tasks.
///
/// # Example
///
/// ```rust,ignore
/// use alibaba_api::{AlibabaClient, AlibabaConfig, ConfigOverrides, HttpMethod};
/// use alibaba_api::clients::business_params;
///
/// let config = AlibabaConfig::from_env(ConfigOverrides::default())?;
/// let client = AlibabaClient::new(config)?;
///
/// let params = business_params([("e_trade_id", "234193410001028893")]);
/// let order = client.execute("/alibaba/order/get", &params, HttpMethod::Get, None).await?;
/// ```
#[derive(Debug)]
pub struct AlibabaClient {
    client: reqwest::Client,
    config: AlibabaConfig,
}

// Verify AlibabaClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AlibabaClient>();
};

impl AlibabaClient {
    /// Creates a client with a connection pool configured for the
    /// configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError`] if the TLS backend cannot be initialized.
    pub fn new(config: AlibabaConfig) -> Result<Self, AlibabaError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .user_agent(format!("alibaba-api-rust/{SDK_VERSION}"))
            .build()
            .map_err(|e| NetworkError::new(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &AlibabaConfig {
        &self.config
    }

    /// Returns the REST base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Sends one signed request.
    ///
    /// `access_token` overrides the configured token for this call only; an
    /// empty override falls back to the configured token.
    ///
    /// # Errors
    ///
    /// - [`ValidationError`] if `path` does not start with `/` (nothing is sent)
    /// - [`NetworkError`] on timeout, transport failure, or HTTP status >= 400
    /// - [`ApiError`](crate::ApiError) if the body carries a non-zero `code`
    pub async fn execute(
        &self,
        path: &str,
        params: &BusinessParams,
        method: HttpMethod,
        access_token: Option<&str>,
    ) -> Result<ResponseMapping, AlibabaError> {
        if !path.starts_with('/') {
            let message = format!("api_path must start with '/', got: {path}");
            return Err(ValidationError::new(message).into());
        }

        let token = access_token
            .filter(|token| !token.is_empty())
            .or_else(|| self.config.access_token());

        let signed = build_signed_parameters(
            path,
            params,
            self.config.app_key().as_ref(),
            self.config.app_secret().as_ref(),
            token,
        );

        let url = format!("{}{}", self.config.base_url(), path);
        tracing::debug!(%method, path, has_token = token.is_some(), "dispatching signed request");

        let request = match method {
            HttpMethod::Get => self.client.get(&url).query(&signed),
            HttpMethod::Post => self.client.post(&url).form(&signed),
        };

        let res = request.send().await.map_err(|e| self.transport_error(&e))?;

        let code = res.status().as_u16();
        let request_id = res
            .headers()
            .get("x-request-id")
            .and_then(|value| value.to_str().ok())
            .map(String::from);
        let text = res.text().await.map_err(|e| self.transport_error(&e))?;

        let result = HttpResponse::new(code, request_id, text).into_mapping();
        if let Err(error) = &result {
            tracing::debug!(path, kind = error.kind(), %error, "request failed");
        }
        result
    }

    /// Sends a signed GET request with the configured token.
    ///
    /// # Errors
    ///
    /// See [`AlibabaClient::execute`].
    pub async fn get(
        &self,
        path: &str,
        params: &BusinessParams,
    ) -> Result<ResponseMapping, AlibabaError> {
        self.execute(path, params, HttpMethod::Get, None).await
    }

    /// Sends a signed POST request with the configured token.
    ///
    /// # Errors
    ///
    /// See [`AlibabaClient::execute`].
    pub async fn post(
        &self,
        path: &str,
        params: &BusinessParams,
    ) -> Result<ResponseMapping, AlibabaError> {
        self.execute(path, params, HttpMethod::Post, None).await
    }

    /// Sends a signed GET request with an explicit access token.
    ///
    /// # Errors
    ///
    /// See [`AlibabaClient::execute`].
    pub async fn get_with_token(
        &self,
        path: &str,
        params: &BusinessParams,
        access_token: &str,
    ) -> Result<ResponseMapping, AlibabaError> {
        self.execute(path, params, HttpMethod::Get, Some(access_token))
            .await
    }

    /// Sends a signed POST request with an explicit access token.
    ///
    /// # Errors
    ///
    /// See [`AlibabaClient::execute`].
    pub async fn post_with_token(
        &self,
        path: &str,
        params: &BusinessParams,
        access_token: &str,
    ) -> Result<ResponseMapping, AlibabaError> {
        self.execute(path, params, HttpMethod::Post, Some(access_token))
            .await
    }

    /// Releases the connection pool.
    ///
    /// Dropping the client has the same effect; this only makes the end of
    /// its lifetime explicit.
    pub fn close(self) {
        drop(self);
    }

    fn transport_error(&self, error: &reqwest::Error) -> NetworkError {
        if error.is_timeout() {
            NetworkError::new(format!(
                "Request timed out after {}s",
                self.config.timeout_secs()
            ))
        } else {
            NetworkError::new(format!("Network error: {error}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppKey, AppSecret};

    fn test_config() -> AlibabaConfig {
        AlibabaConfig::builder()
            .app_key(AppKey::new("test-key").unwrap())
            .app_secret(AppSecret::new("test-secret").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_construction_uses_config_base_url() {
        let client = AlibabaClient::new(test_config()).unwrap();
        assert_eq!(client.base_url(), "https://openapi-api.alibaba.com/rest");
        assert_eq!(client.config().app_key().as_ref(), "test-key");
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AlibabaClient>();
    }

    #[tokio::test]
    async fn test_relative_path_is_rejected_before_sending() {
        let client = AlibabaClient::new(test_config()).unwrap();
        let err = client
            .execute("orders", &BusinessParams::new(), HttpMethod::Get, None)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            AlibabaError::Validation(ValidationError::new(
                "api_path must start with '/', got: orders"
            ))
        );
    }
}
