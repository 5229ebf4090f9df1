//! HTTP client layer for the Alibaba Open Platform.
//!
//! # Overview
//!
//! - [`AlibabaClient`]: the async signed-request dispatcher
//! - [`HttpMethod`]: GET (query string) or POST (form body)
//! - [`HttpResponse`]: a raw response and its classification
//! - [`AlibabaError`] and its payloads: the error taxonomy
//! - [`describe_error_code`]: documented explanations for error codes
//!
//! # Example
//!
//! ```rust,ignore
//! use alibaba_api::clients::{business_params, AlibabaClient};
//!
//! let client = AlibabaClient::new(config)?;
//! let params = business_params([("trade_id", "234193410001028893")]);
//! let tracking = client.get("/order/logistics/tracking/get", &params).await?;
//! ```
//!
//! # Response Classification
//!
//! - **HTTP status >= 400**: [`NetworkError`] carrying the status and the
//!   `x-request-id` header
//! - **Non-object body**: returned as `{"data": <body>}`
//! - **`code` other than `"0"`**: [`ApiError`]; an empty `message` is
//!   resolved through the error-code table
//! - **`code == "0"`**: the parsed body, unmodified

mod error_codes;
mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use error_codes::{describe as describe_error_code, ERROR_CODES};
pub use errors::{AlibabaError, ApiError, AuthError, NetworkError, ValidationError};
pub use http_client::{AlibabaClient, SDK_VERSION};
pub use http_request::{business_params, BusinessParams, HttpMethod};
pub use http_response::{HttpResponse, ResponseMapping};
