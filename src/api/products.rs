//! Product discovery: scene listings, details and inventory.
//!
//! Common scene ids:
//!
//! | Scene       | Products                                  |
//! |-------------|-------------------------------------------|
//! | `906124611` | Standard US-based fulfillment             |
//! | `906168847` | Cross-border fulfillment (China to US)    |
//! | `907135637` | Fast fulfillment from US (within 48 hours)|
//! | `907732810` | Dropshipping-eligible products from Mexico|
//! | `907180667` | Top-selling products from the US          |
//! | `907180664` | Top-selling products from Mexico          |

use serde::Serialize;
use serde_json::{json, Value};

use super::{array_at, count_field, encode_json, nested};
use crate::clients::{
    business_params, AlibabaClient, AlibabaError, ResponseMapping, ValidationError,
};

const LIST_PATH: &str = "/eco/buyer/product/check";
const DESCRIPTION_PATH: &str = "/eco/buyer/product/description";
const INVENTORY_PATH: &str = "/eco/buyer/product/inventory";
const LOCAL_PATH: &str = "/eco/buyer/local/product/check";
const CROSSBORDER_PATH: &str = "/eco/buyer/crossborder/product/check";

/// Scene used by [`ProductApi::search_products`] when none is given.
pub const DEFAULT_SCENE_ID: &str = "906124611";

/// Largest page size the listing endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// One page of product ids from a scene listing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductIdPage {
    /// Product ids on this page.
    pub product_ids: Vec<Value>,
    /// Total number of products in the scene, if reported.
    pub total: Option<u64>,
    /// The requested page.
    pub page: u32,
    /// The requested page size.
    pub page_size: u32,
    /// The response this result was built from.
    #[serde(skip)]
    pub raw: ResponseMapping,
}

/// Product ids from the local-warehouse or cross-border listings.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductIds {
    /// Product ids.
    pub product_ids: Vec<Value>,
    /// Warehouse country, for local listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// The response this result was built from.
    #[serde(skip)]
    pub raw: ResponseMapping,
}

/// Products found by [`ProductApi::search_products`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchResult {
    /// The scene that was searched.
    pub scene_id: String,
    /// Number of ids the listing returned.
    pub total_found: usize,
    /// Number of products whose details were loaded.
    pub successfully_loaded: usize,
    /// Product details.
    pub products: Vec<Value>,
}

#[derive(Serialize)]
struct SceneQuery<'a> {
    scene_id: &'a str,
    index: u32,
    size: u32,
    product_type: &'static str,
}

#[derive(Serialize)]
struct InventoryQuery<'a> {
    product_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sku_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shipping_from: Option<&'a str>,
}

/// Product service.
#[derive(Clone, Copy, Debug)]
pub struct ProductApi<'a> {
    client: &'a AlibabaClient,
}

impl<'a> ProductApi<'a> {
    /// Creates the service for `client`.
    #[must_use]
    pub const fn new(client: &'a AlibabaClient) -> Self {
        Self { client }
    }

    /// Lists product ids in a scene. `page_size` is capped at
    /// [`MAX_PAGE_SIZE`].
    ///
    /// # Errors
    ///
    /// Propagates any dispatcher error.
    pub async fn list_products(
        &self,
        scene_id: &str,
        page: u32,
        page_size: u32,
    ) -> Result<ProductIdPage, AlibabaError> {
        let query = SceneQuery {
            scene_id,
            index: page,
            size: page_size.min(MAX_PAGE_SIZE),
            product_type: "common",
        };
        let params = business_params([("query_req", encode_json("query_req", &query)?)]);

        let response = self.client.get(LIST_PATH, &params).await?;
        let total = response
            .get("result")
            .and_then(|result| count_field(result, "result_total"));

        Ok(ProductIdPage {
            product_ids: array_at(&response, &["result", "result_data"]),
            total,
            page,
            page_size,
            raw: response,
        })
    }

    /// Fetches product details for `country`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for a non-numeric `product_id` without
    /// sending anything; otherwise propagates any dispatcher error.
    pub async fn get_product(
        &self,
        product_id: &str,
        country: &str,
    ) -> Result<Value, AlibabaError> {
        let numeric: u64 = product_id.trim().parse().map_err(|_| {
            ValidationError::new(format!("product_id must be numeric, got: {product_id}"))
        })?;

        let query = json!({"product_id": numeric, "country": country});
        let params = business_params([("query_req", encode_json("query_req", &query)?)]);

        let response = self.client.get(DESCRIPTION_PATH, &params).await?;
        Ok(nested(&response, &["result", "result_data"])
            .cloned()
            .unwrap_or_else(|| json!({})))
    }

    /// Checks inventory levels, optionally for one SKU or origin.
    ///
    /// # Errors
    ///
    /// Propagates any dispatcher error.
    pub async fn get_product_inventory(
        &self,
        product_id: &str,
        sku_id: Option<&str>,
        shipping_from: Option<&str>,
    ) -> Result<Vec<Value>, AlibabaError> {
        let query = InventoryQuery {
            product_id,
            sku_id: sku_id.filter(|s| !s.is_empty()),
            shipping_from: shipping_from.filter(|s| !s.is_empty()),
        };
        let params = business_params([("inv_req", encode_json("inv_req", &query)?)]);

        let response = self.client.get(INVENTORY_PATH, &params).await?;
        Ok(array_at(&response, &["result", "result_data"]))
    }

    /// Lists products stocked in a local warehouse.
    ///
    /// # Errors
    ///
    /// Propagates any dispatcher error.
    pub async fn get_local_products(
        &self,
        country: &str,
        page: u32,
        page_size: u32,
    ) -> Result<ProductIds, AlibabaError> {
        let req = json!({"index": page, "size": page_size, "country": country});
        let params = business_params([("req", encode_json("req", &req)?)]);

        let response = self.client.get(LOCAL_PATH, &params).await?;
        Ok(ProductIds {
            product_ids: array_at(&response, &["result", "result_data"]),
            country: Some(country.to_string()),
            raw: response,
        })
    }

    /// Lists cross-border products shipping from China.
    ///
    /// # Errors
    ///
    /// Propagates any dispatcher error.
    pub async fn get_crossborder_products(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<ProductIds, AlibabaError> {
        let param0 = json!({"index": page, "size": page_size});
        let params = business_params([("param0", encode_json("param0", &param0)?)]);

        let response = self.client.get(CROSSBORDER_PATH, &params).await?;
        Ok(ProductIds {
            product_ids: array_at(&response, &["result", "result_data"]),
            country: None,
            raw: response,
        })
    }

    /// Lists a scene and loads details for up to `limit` products.
    ///
    /// Products whose details fail to load are logged and skipped.
    ///
    /// # Errors
    ///
    /// Propagates a failure of the listing request only.
    pub async fn search_products(
        &self,
        scene_id: &str,
        limit: u32,
    ) -> Result<SearchResult, AlibabaError> {
        let query = json!({
            "scene_id": scene_id,
            "page": 0,
            "page_size": limit,
            "size": limit,
            "index": 0,
        });
        let params = business_params([("query_req", encode_json("query_req", &query)?)]);

        let listing = self.client.get(LIST_PATH, &params).await?;
        let product_ids = array_at(&listing, &["result", "result_data"]);

        let mut products = Vec::with_capacity(product_ids.len());
        for id in &product_ids {
            let id = match id {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            match self.load_search_detail(&id).await {
                Ok(Some(product)) => products.push(product),
                Ok(None) => tracing::debug!(product_id = %id, "product has no details"),
                Err(error) => {
                    tracing::warn!(
                        product_id = %id,
                        %error,
                        "skipping product that failed to load"
                    );
                }
            }
        }

        Ok(SearchResult {
            scene_id: scene_id.to_string(),
            total_found: product_ids.len(),
            successfully_loaded: products.len(),
            products,
        })
    }

    async fn load_search_detail(&self, product_id: &str) -> Result<Option<Value>, AlibabaError> {
        let query = json!({"product_id": product_id, "size": 10, "index": 0});
        let params = business_params([("query_req", encode_json("query_req", &query)?)]);

        let response = self.client.get(DESCRIPTION_PATH, &params).await?;
        Ok(nested(&response, &["result", "result_data"])
            .filter(|data| !is_empty_value(data))
            .cloned())
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_query_encoding_caps_size() {
        let query = SceneQuery {
            scene_id: "906124611",
            index: 2,
            size: 500_u32.min(MAX_PAGE_SIZE),
            product_type: "common",
        };
        assert_eq!(
            serde_json::to_string(&query).unwrap(),
            r#"{"scene_id":"906124611","index":2,"size":100,"product_type":"common"}"#
        );
    }

    #[test]
    fn test_inventory_query_omits_unset_fields() {
        let query = InventoryQuery {
            product_id: "1600927952535",
            sku_id: None,
            shipping_from: Some("CN"),
        };
        assert_eq!(
            serde_json::to_string(&query).unwrap(),
            r#"{"product_id":"1600927952535","shipping_from":"CN"}"#
        );
    }

    #[test]
    fn test_empty_values() {
        assert!(is_empty_value(&Value::Null));
        assert!(is_empty_value(&json!({})));
        assert!(!is_empty_value(&json!({"id": 1})));
        assert!(!is_empty_value(&json!(0)));
    }
}
