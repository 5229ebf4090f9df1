//! Business services built on top of [`AlibabaClient`].
//!
//! Each service borrows the client and reshapes raw response mappings into
//! typed results:
//!
//! - [`AuthApi`]: OAuth token exchange and refresh
//! - [`OrderApi`]: BuyNow order creation, payment, and lookup
//! - [`ProductApi`]: product discovery and inventory
//! - [`ShippingApi`]: freight estimates
//!
//! # Example
//!
//! ```rust,ignore
//! use alibaba_api::{AlibabaClient, FreightQuery};
//!
//! let client = AlibabaClient::new(config)?;
//! let product = client.products().get_product("1601206892606", "US").await?;
//! let quote = client
//!     .shipping()
//!     .calculate_freight(&FreightQuery::new("1601206892606", 5, "US"))
//!     .await?;
//! ```
//!
//! Typed results implement `Serialize`. The raw response each one was built
//! from is kept in a `raw` field that is not serialized.

pub mod auth;
pub mod orders;
pub mod products;
pub mod shipping;

pub use auth::{AuthApi, AuthStatus, TokenResult, AUTHORIZE_URL};
pub use orders::{
    CreateOrderRequest, CreatedOrder, OrderApi, OrderList, OrderListQuery, OrderTracking,
    PaymentRequest, PaymentResult,
};
pub use products::{ProductApi, ProductIdPage, ProductIds, SearchResult, DEFAULT_SCENE_ID};
pub use shipping::{
    AdvancedFreightQuery, AdvancedFreightQuote, FreightQuery, FreightQuote, ShippingApi,
    DISPATCH_LOCATIONS,
};

use serde::Serialize;
use serde_json::Value;

use crate::clients::{AlibabaClient, AlibabaError, ResponseMapping, ValidationError};

impl AlibabaClient {
    /// Returns the authentication service.
    #[must_use]
    pub const fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// Returns the order service.
    #[must_use]
    pub const fn orders(&self) -> OrderApi<'_> {
        OrderApi::new(self)
    }

    /// Returns the product service.
    #[must_use]
    pub const fn products(&self) -> ProductApi<'_> {
        ProductApi::new(self)
    }

    /// Returns the shipping service.
    #[must_use]
    pub const fn shipping(&self) -> ShippingApi<'_> {
        ShippingApi::new(self)
    }
}

/// Encodes a structured parameter as the JSON string the gateway expects.
pub(crate) fn encode_json<T: Serialize + ?Sized>(
    name: &str,
    value: &T,
) -> Result<String, AlibabaError> {
    serde_json::to_string(value)
        .map_err(|e| ValidationError::new(format!("Failed to encode {name}: {e}")).into())
}

/// Returns `response["value"]`, or the whole response when absent.
pub(crate) fn value_or_whole(response: &ResponseMapping) -> Value {
    response
        .get("value")
        .cloned()
        .unwrap_or_else(|| Value::Object(response.clone()))
}

/// Follows `keys` through nested objects.
pub(crate) fn nested<'a>(response: &'a ResponseMapping, keys: &[&str]) -> Option<&'a Value> {
    let (first, rest) = keys.split_first()?;
    rest.iter()
        .try_fold(response.get(*first)?, |value, key| value.get(key))
}

/// Returns the array at `keys`, or an empty list.
pub(crate) fn array_at(response: &ResponseMapping, keys: &[&str]) -> Vec<Value> {
    nested(response, keys)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Reads a scalar field as a string. Numbers are rendered in decimal.
pub(crate) fn string_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads a count that may arrive as a number or a numeric string.
pub(crate) fn count_field(value: &Value, key: &str) -> Option<u64> {
    match value.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mapping(value: Value) -> ResponseMapping {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_value_or_whole() {
        let with_value = mapping(json!({"code": "0", "value": {"a": 1}}));
        assert_eq!(value_or_whole(&with_value), json!({"a": 1}));

        let without = mapping(json!({"code": "0", "a": 1}));
        assert_eq!(value_or_whole(&without), json!({"code": "0", "a": 1}));
    }

    #[test]
    fn test_nested_and_array_at() {
        let response = mapping(json!({"result": {"result_data": [1, 2]}}));
        assert_eq!(nested(&response, &["result", "result_data"]), Some(&json!([1, 2])));
        assert_eq!(array_at(&response, &["result", "result_data"]).len(), 2);
        assert!(array_at(&response, &["result", "missing"]).is_empty());
        assert!(nested(&response, &[]).is_none());
    }

    #[test]
    fn test_scalar_field_coercion() {
        let value = json!({"n": 12, "s": "34", "b": true});
        assert_eq!(string_field(&value, "n").as_deref(), Some("12"));
        assert_eq!(string_field(&value, "s").as_deref(), Some("34"));
        assert_eq!(string_field(&value, "b"), None);
        assert_eq!(count_field(&value, "n"), Some(12));
        assert_eq!(count_field(&value, "s"), Some(34));
        assert_eq!(count_field(&value, "missing"), None);
    }
}
