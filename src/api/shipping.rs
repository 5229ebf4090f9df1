//! Freight estimates.
//!
//! [`ShippingApi::calculate_freight`] can fall back across dispatch
//! locations. Starting at the requested location it walks the rest of
//! [`DISPATCH_LOCATIONS`] in order, stopping at the first location that
//! returns options. Empty results and errors both move on to the next
//! location. If every location errored, the last error is returned; if
//! some answered with no options, an empty quote for the requested location
//! is returned. Locations outside the list are tried alone.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::{array_at, encode_json};
use crate::clients::{business_params, AlibabaClient, AlibabaError, ResponseMapping};

const FREIGHT_PATH: &str = "/shipping/freight/calculate";
const ADVANCED_FREIGHT_PATH: &str = "/order/freight/calculate";

/// Dispatch locations in fallback order.
pub const DISPATCH_LOCATIONS: [&str; 3] = ["CN", "US", "MX"];

/// Default dispatch location.
pub const DEFAULT_DISPATCH_LOCATION: &str = "CN";

/// Input for [`ShippingApi::calculate_freight`].
///
/// ```rust
/// use alibaba_api::FreightQuery;
///
/// let query = FreightQuery::new("1600124642247", 5, "US")
///     .zip_code("90001")
///     .fallback(false);
/// assert_eq!(query.dispatch_location, "CN");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FreightQuery {
    /// Product to ship.
    pub product_id: String,
    /// Number of items.
    pub quantity: u32,
    /// Destination country code.
    pub destination_country: String,
    /// Destination ZIP code.
    pub zip_code: Option<String>,
    /// Preferred origin.
    pub dispatch_location: String,
    /// Whether to try later origins when this one yields nothing.
    pub fallback: bool,
}

impl FreightQuery {
    /// Creates a query dispatching from China with fallback enabled.
    #[must_use]
    pub fn new(
        product_id: impl Into<String>,
        quantity: u32,
        destination_country: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            destination_country: destination_country.into(),
            zip_code: None,
            dispatch_location: DEFAULT_DISPATCH_LOCATION.to_string(),
            fallback: true,
        }
    }

    /// Sets the destination ZIP code.
    #[must_use]
    pub fn zip_code(mut self, zip_code: impl Into<String>) -> Self {
        self.zip_code = Some(zip_code.into());
        self
    }

    /// Sets the preferred dispatch location.
    #[must_use]
    pub fn dispatch_location(mut self, location: impl Into<String>) -> Self {
        self.dispatch_location = location.into();
        self
    }

    /// Enables or disables location fallback.
    #[must_use]
    pub const fn fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    /// Returns the locations to try, in order.
    #[must_use]
    pub fn locations(&self) -> Vec<&str> {
        let requested = self.dispatch_location.as_str();
        match DISPATCH_LOCATIONS.iter().position(|l| *l == requested) {
            Some(start) if self.fallback => DISPATCH_LOCATIONS[start..].to_vec(),
            _ => vec![requested],
        }
    }
}

/// Shipping options for a single product.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FreightQuote {
    /// Product id.
    pub product_id: String,
    /// Number of items.
    pub quantity: u32,
    /// Destination country code.
    pub destination: String,
    /// The location the options were found for.
    pub dispatch_location: String,
    /// `true` when the options came from a location other than the
    /// requested one.
    pub fallback_used: bool,
    /// Shipping options.
    pub options: Vec<Value>,
    /// The response this result was built from.
    #[serde(skip)]
    pub raw: ResponseMapping,
}

/// Input for [`ShippingApi::calculate_freight_advanced`].
#[derive(Clone, Debug, PartialEq)]
pub struct AdvancedFreightQuery {
    /// Supplier company id, from product details.
    pub e_company_id: String,
    /// Destination country code.
    pub destination_country: String,
    /// Full shipping address.
    pub address: Value,
    /// Products to ship, e.g. `[{"product_id": "...", "sku_id": "...", "quantity": "1"}]`.
    pub logistics_product_list: Value,
    /// Origin location.
    pub dispatch_location: String,
}

/// Shipping options for a multi-product shipment.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AdvancedFreightQuote {
    /// Supplier company id.
    pub supplier: String,
    /// Destination country code.
    pub destination: String,
    /// Origin location.
    pub dispatch_location: String,
    /// The products that were quoted.
    pub products: Value,
    /// Shipping options.
    pub options: Vec<Value>,
    /// The response this result was built from.
    #[serde(skip)]
    pub raw: ResponseMapping,
}

/// Shipping service.
#[derive(Clone, Copy, Debug)]
pub struct ShippingApi<'a> {
    client: &'a AlibabaClient,
}

impl<'a> ShippingApi<'a> {
    /// Creates the service for `client`.
    #[must_use]
    pub const fn new(client: &'a AlibabaClient) -> Self {
        Self { client }
    }

    /// Estimates shipping for one product, falling back across dispatch
    /// locations when enabled.
    ///
    /// # Errors
    ///
    /// With fallback disabled, any error for the requested location. With
    /// fallback enabled, the last error when every location failed.
    pub async fn calculate_freight(
        &self,
        query: &FreightQuery,
    ) -> Result<FreightQuote, AlibabaError> {
        let locations = query.locations();
        let mut last_error = None;
        let mut last_empty = None;
        let mut previous: Option<Miss> = None;

        for (attempt, location) in locations.iter().enumerate() {
            if let Some(miss) = &previous {
                tracing::warn!(
                    product_id = %query.product_id,
                    from = locations[attempt - 1],
                    to = *location,
                    reason = %miss,
                    "trying next dispatch location"
                );
            }

            match self.freight_for_location(query, location).await {
                Ok(response) => {
                    let options = array_at(&response, &["value"]);
                    if !options.is_empty() {
                        return Ok(quote(query, location, options, response));
                    }
                    last_empty = Some(response);
                    previous = Some(Miss::Empty);
                }
                Err(error) if query.fallback => {
                    previous = Some(Miss::Failed(error.to_string()));
                    last_error = Some(error);
                }
                Err(error) => return Err(error),
            }
        }

        match (last_empty, last_error) {
            (Some(response), _) => Ok(quote(
                query,
                &query.dispatch_location,
                Vec::new(),
                response,
            )),
            (None, Some(error)) => Err(error),
            (None, None) => Ok(quote(
                query,
                &query.dispatch_location,
                Vec::new(),
                ResponseMapping::new(),
            )),
        }
    }

    async fn freight_for_location(
        &self,
        query: &FreightQuery,
        location: &str,
    ) -> Result<ResponseMapping, AlibabaError> {
        let mut params = business_params([
            ("product_id", query.product_id.clone()),
            ("quantity", query.quantity.to_string()),
            ("destination_country", query.destination_country.clone()),
            ("dispatch_location", location.to_string()),
        ]);
        if let Some(zip) = query.zip_code.as_ref().filter(|z| !z.is_empty()) {
            params.insert("zip_code".to_string(), zip.clone());
        }
        self.client.get(FREIGHT_PATH, &params).await
    }

    /// Estimates shipping for several products to a full address.
    ///
    /// # Errors
    ///
    /// Propagates any dispatcher error.
    pub async fn calculate_freight_advanced(
        &self,
        query: &AdvancedFreightQuery,
    ) -> Result<AdvancedFreightQuote, AlibabaError> {
        let params = business_params([
            ("e_company_id", query.e_company_id.clone()),
            ("destination_country", query.destination_country.clone()),
            ("dispatch_location", query.dispatch_location.clone()),
            ("address", encode_json("address", &query.address)?),
            (
                "logistics_product_list",
                encode_json("logistics_product_list", &query.logistics_product_list)?,
            ),
        ]);

        let response = self.client.get(ADVANCED_FREIGHT_PATH, &params).await?;
        Ok(AdvancedFreightQuote {
            supplier: query.e_company_id.clone(),
            destination: query.destination_country.clone(),
            dispatch_location: query.dispatch_location.clone(),
            products: query.logistics_product_list.clone(),
            options: array_at(&response, &["value"]),
            raw: response,
        })
    }
}

/// Why a dispatch location produced no quote.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Miss {
    Empty,
    Failed(String),
}

impl fmt::Display for Miss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no shipping options returned"),
            Self::Failed(error) => write!(f, "lookup failed: {error}"),
        }
    }
}

fn quote(
    query: &FreightQuery,
    location: &str,
    options: Vec<Value>,
    raw: ResponseMapping,
) -> FreightQuote {
    FreightQuote {
        product_id: query.product_id.clone(),
        quantity: query.quantity,
        destination: query.destination_country.clone(),
        dispatch_location: location.to_string(),
        fallback_used: location != query.dispatch_location,
        options,
        raw,
    }
}
