//! # Alibaba Open Platform API client
//!
//! A Rust client for the Alibaba.com Open Platform REST API (v2), with
//! HMAC-SHA256 request signing, typed errors, and services for orders,
//! products, shipping and OAuth tokens.
//!
//! ## Overview
//!
//! - Type-safe configuration via [`AlibabaConfig`] and [`AlibabaConfigBuilder`],
//!   or from `ALIBABA_*` environment variables via [`AlibabaConfig::from_env`]
//! - Deterministic request signing in [`signing`]
//! - An async dispatcher, [`AlibabaClient`], that signs, sends and
//!   classifies every request
//! - A typed error taxonomy rooted at [`AlibabaError`]
//! - Business services in [`api`]
//!
//! ## Quick Start
//!
//! ```rust
//! use alibaba_api::{AlibabaClient, AlibabaConfig, AppKey, AppSecret};
//!
//! let config = AlibabaConfig::builder()
//!     .app_key(AppKey::new("your-app-key").unwrap())
//!     .app_secret(AppSecret::new("your-app-secret").unwrap())
//!     .access_token("your-access-token")
//!     .use_sandbox(true)
//!     .build()
//!     .unwrap();
//!
//! let client = AlibabaClient::new(config).unwrap();
//! assert_eq!(client.base_url(), "https://openapi-api-sandbox.alibaba.com/rest");
//! ```
//!
//! ## Making Requests
//!
//! Low-level calls go through [`AlibabaClient::execute`] (or the `get` /
//! `post` shorthands) and return the parsed JSON object:
//!
//! ```rust,ignore
//! use alibaba_api::clients::business_params;
//!
//! let params = business_params([("e_trade_id", "234193410001028893"), ("language", "en_US")]);
//! let order = client.get("/alibaba/order/get", &params).await?;
//! ```
//!
//! Higher-level services return typed results:
//!
//! ```rust,ignore
//! use alibaba_api::{FreightQuery, OrderListQuery};
//!
//! let orders = client.orders().list_orders(&OrderListQuery::default()).await?;
//! let quote = client
//!     .shipping()
//!     .calculate_freight(&FreightQuery::new("1600124642247", 5, "US").zip_code("90001"))
//!     .await?;
//! println!("{} options from {}", quote.options.len(), quote.dispatch_location);
//! ```
//!
//! ## Error Handling
//!
//! ```rust,ignore
//! use alibaba_api::AlibabaError;
//!
//! match client.products().get_product("1601206892606", "US").await {
//!     Ok(product) => println!("{product}"),
//!     Err(AlibabaError::Api(e)) => eprintln!("{e}"),  // "[130106] Product invalid..."
//!     Err(AlibabaError::Network(e)) => eprintln!("HTTP {:?}: {}", e.status_code, e.message),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
//!
//! ## Logging
//!
//! The library emits [`tracing`] events under the `alibaba_api` target and
//! never logs secrets. Install a subscriber to see them.

pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod signing;

// Re-export public types at crate root for convenience
pub use config::{
    load_config, parse_sandbox_flag, AlibabaConfig, AlibabaConfigBuilder, AppKey, AppSecret,
    BaseUrl, ConfigOverrides, Environment, OAuthToken, DEFAULT_TIMEOUT_SECS, PRODUCTION_BASE_URL,
    SANDBOX_BASE_URL,
};
pub use error::ConfigError;

// Re-export client and error types
pub use clients::{
    AlibabaClient, AlibabaError, ApiError, AuthError, BusinessParams, HttpMethod, NetworkError,
    ResponseMapping, ValidationError,
};

// Re-export business services and their result types
pub use api::{
    AdvancedFreightQuery, AdvancedFreightQuote, AuthApi, AuthStatus, CreateOrderRequest,
    CreatedOrder, FreightQuery, FreightQuote, OrderApi, OrderList, OrderListQuery, OrderTracking,
    PaymentRequest, PaymentResult, ProductApi, ProductIdPage, ProductIds, SearchResult,
    ShippingApi, TokenResult,
};
