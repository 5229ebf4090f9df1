//! BuyNow dropshipping orders: creation, payment, listing and tracking.

use serde::Serialize;
use serde_json::Value;

use super::{array_at, count_field, encode_json, string_field, value_or_whole};
use crate::clients::{
    business_params, AlibabaClient, AlibabaError, BusinessParams, ResponseMapping,
};

const LIST_PATH: &str = "/alibaba/order/list";
const GET_PATH: &str = "/alibaba/order/get";
const CREATE_PATH: &str = "/buynow/order/create";
const PAY_PATH: &str = "/alibaba/dropshipping/order/pay";
const LOGISTICS_PATH: &str = "/order/logistics/query";
const TRACKING_PATH: &str = "/order/logistics/tracking/get";
const FUNDS_PATH: &str = "/alibaba/order/fund/query";

/// Default response language for order details.
pub const DEFAULT_LANGUAGE: &str = "en_US";
/// Default `data_select` for logistics queries.
pub const DEFAULT_LOGISTICS_SELECT: &str = "logistic_order";
/// Default `data_select` for fund queries.
pub const DEFAULT_FUNDS_SELECT: &str = "fund_transaction_fee";

/// Filters for [`OrderApi::list_orders`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderListQuery {
    /// `buyer` or `seller`.
    pub role: String,
    /// Optional order status filter.
    pub status: Option<String>,
    /// Zero-based page number.
    pub start_page: u32,
    /// Orders per page.
    pub page_size: u32,
}

impl Default for OrderListQuery {
    fn default() -> Self {
        Self {
            role: "buyer".to_string(),
            status: None,
            start_page: 0,
            page_size: 20,
        }
    }
}

/// One page of orders.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrderList {
    /// Total number of matching orders, if reported.
    pub total_count: Option<u64>,
    /// The requested page.
    pub page: u32,
    /// The requested page size.
    pub page_size: u32,
    /// Orders on this page.
    pub orders: Vec<Value>,
    /// The response this result was built from.
    #[serde(skip)]
    pub raw: ResponseMapping,
}

/// Input for [`OrderApi::create_order`].
#[derive(Clone, Debug, PartialEq)]
pub struct CreateOrderRequest {
    /// Caller's own order reference.
    pub channel_refer_id: String,
    /// Products to order, e.g. `[{"product_id": "...", "sku_id": "...", "quantity": "1"}]`.
    pub product_list: Value,
    /// Shipping details: `shipment_address`, `dispatch_location`, `carrier_code`.
    pub logistics_detail: Value,
    /// Optional order note.
    pub remark: Option<String>,
}

/// Identifiers of a newly created order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreatedOrder {
    /// The new order id.
    pub trade_id: Option<String>,
    /// URL where the order can be paid.
    pub pay_url: Option<String>,
    /// The response this result was built from.
    #[serde(skip)]
    pub raw: ResponseMapping,
}

/// Input for [`OrderApi::pay_orders`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Orders to pay.
    pub order_ids: Vec<String>,
    /// Payment method.
    pub payment_method: String,
    /// Buyer IP address.
    pub user_ip: String,
    /// Buyer user agent.
    pub user_agent: String,
}

impl PaymentRequest {
    /// Creates a credit card payment request for `order_ids`.
    #[must_use]
    pub fn new(order_ids: Vec<String>) -> Self {
        Self {
            order_ids,
            payment_method: "CREDIT_CARD".to_string(),
            user_ip: "127.0.0.1".to_string(),
            user_agent: "alibaba-api/1.0".to_string(),
        }
    }
}

#[derive(Serialize)]
struct PayOrderPayload<'a> {
    order_id_list: &'a [String],
    payment_method: &'a str,
    user_ip: &'a str,
    user_agent: &'a str,
    accept_language: &'static str,
    screen_resolution: &'static str,
    is_pc: bool,
}

impl<'a> From<&'a PaymentRequest> for PayOrderPayload<'a> {
    fn from(request: &'a PaymentRequest) -> Self {
        Self {
            order_id_list: &request.order_ids,
            payment_method: &request.payment_method,
            user_ip: &request.user_ip,
            user_agent: &request.user_agent,
            accept_language: "en-US,en;q=0.9",
            screen_resolution: "1920*1080",
            is_pc: true,
        }
    }
}

/// Outcome of a payment attempt.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PaymentResult {
    /// Payment status reported by the platform.
    pub status: Option<String>,
    /// The orders that were submitted.
    pub order_ids: Vec<String>,
    /// Failure reason code, if any.
    pub reason_code: Option<String>,
    /// Failure reason, if any.
    pub reason_message: Option<String>,
    /// URL to complete payment, if required.
    pub pay_url: Option<String>,
    /// The response this result was built from.
    #[serde(skip)]
    pub raw: ResponseMapping,
}

/// Tracking events for an order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrderTracking {
    /// The order id.
    pub trade_id: String,
    /// Tracking entries, one per shipment.
    pub tracking: Vec<Value>,
    /// The response this result was built from.
    #[serde(skip)]
    pub raw: ResponseMapping,
}

/// Order service.
#[derive(Clone, Copy, Debug)]
pub struct OrderApi<'a> {
    client: &'a AlibabaClient,
}

impl<'a> OrderApi<'a> {
    /// Creates the service for `client`.
    #[must_use]
    pub const fn new(client: &'a AlibabaClient) -> Self {
        Self { client }
    }

    /// Lists orders.
    ///
    /// # Errors
    ///
    /// Propagates any dispatcher error.
    pub async fn list_orders(&self, query: &OrderListQuery) -> Result<OrderList, AlibabaError> {
        let mut params = business_params([
            ("role", query.role.clone()),
            ("start_page", query.start_page.to_string()),
            ("page_size", query.page_size.to_string()),
        ]);
        if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
            params.insert("status".to_string(), status.clone());
        }

        let response = self.client.get(LIST_PATH, &params).await?;
        let total_count = response
            .get("value")
            .and_then(|value| count_field(value, "total_count"));

        Ok(OrderList {
            total_count,
            page: query.start_page,
            page_size: query.page_size,
            orders: array_at(&response, &["value", "order_list"]),
            raw: response,
        })
    }

    /// Fetches order details. Returns `value`, or the whole response when
    /// there is none.
    ///
    /// # Errors
    ///
    /// Propagates any dispatcher error.
    pub async fn get_order(&self, trade_id: &str, language: &str) -> Result<Value, AlibabaError> {
        let params = business_params([("e_trade_id", trade_id), ("language", language)]);
        let response = self.client.get(GET_PATH, &params).await?;
        Ok(value_or_whole(&response))
    }

    /// Creates a BuyNow order. Sent as POST.
    ///
    /// # Errors
    ///
    /// Propagates any dispatcher error.
    pub async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<CreatedOrder, AlibabaError> {
        let mut params = BusinessParams::new();
        params.insert(
            "channel_refer_id".to_string(),
            request.channel_refer_id.clone(),
        );
        params.insert(
            "product_list".to_string(),
            encode_json("product_list", &request.product_list)?,
        );
        params.insert(
            "logistics_detail".to_string(),
            encode_json("logistics_detail", &request.logistics_detail)?,
        );
        if let Some(remark) = request.remark.as_ref().filter(|r| !r.is_empty()) {
            params.insert("remark".to_string(), remark.clone());
        }

        let response = self.client.post(CREATE_PATH, &params).await?;
        let value = value_or_whole(&response);
        let top = Value::Object(response);
        let field = |key: &str| {
            string_field(&value, key).or_else(|| string_field(&top, key))
        };

        Ok(CreatedOrder {
            trade_id: field("trade_id"),
            pay_url: field("pay_url"),
            raw: into_mapping(top),
        })
    }

    /// Pays one or more orders. Sent as POST.
    ///
    /// # Errors
    ///
    /// Propagates any dispatcher error.
    pub async fn pay_orders(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentResult, AlibabaError> {
        let payload = PayOrderPayload::from(request);
        let params = business_params([(
            "param_order_pay_request",
            encode_json("param_order_pay_request", &payload)?,
        )]);

        let response = self.client.post(PAY_PATH, &params).await?;
        let value = value_or_whole(&response);

        Ok(PaymentResult {
            status: string_field(&value, "status"),
            order_ids: request.order_ids.clone(),
            reason_code: string_field(&value, "reason_code"),
            reason_message: string_field(&value, "reason_message"),
            pay_url: string_field(&value, "pay_url"),
            raw: response,
        })
    }

    /// Fetches logistics status and tracking numbers.
    ///
    /// # Errors
    ///
    /// Propagates any dispatcher error.
    pub async fn get_order_logistics(
        &self,
        trade_id: &str,
        data_select: &str,
    ) -> Result<Value, AlibabaError> {
        let params = business_params([("trade_id", trade_id), ("data_select", data_select)]);
        let response = self.client.get(LOGISTICS_PATH, &params).await?;
        Ok(value_or_whole(&response))
    }

    /// Fetches tracking events.
    ///
    /// # Errors
    ///
    /// Propagates any dispatcher error.
    pub async fn get_order_tracking(&self, trade_id: &str) -> Result<OrderTracking, AlibabaError> {
        let params = business_params([("trade_id", trade_id)]);
        let response = self.client.get(TRACKING_PATH, &params).await?;

        Ok(OrderTracking {
            trade_id: trade_id.to_string(),
            tracking: array_at(&response, &["tracking_list"]),
            raw: response,
        })
    }

    /// Fetches payment and fund details.
    ///
    /// # Errors
    ///
    /// Propagates any dispatcher error.
    pub async fn get_order_funds(
        &self,
        trade_id: &str,
        data_select: &str,
    ) -> Result<Value, AlibabaError> {
        let params = business_params([("e_trade_id", trade_id), ("data_select", data_select)]);
        let response = self.client.get(FUNDS_PATH, &params).await?;
        Ok(value_or_whole(&response))
    }
}

fn into_mapping(value: Value) -> ResponseMapping {
    match value {
        Value::Object(map) => map,
        _ => ResponseMapping::new(),
    }
}
