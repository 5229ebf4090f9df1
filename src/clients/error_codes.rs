//! Documented Alibaba error codes and their human-readable explanations.
//!
//! Used when an error response carries an empty `message`.

/// Known `code` / `sub_code` values and their descriptions.
pub const ERROR_CODES: &[(&str, &str)] = &[
    (
        "110001",
        "Unauthorized: Buyer must use overseas-registered account (not China account)",
    ),
    (
        "10010",
        "Logistics route not found. Check dispatch_location parameter.",
    ),
    (
        "130602",
        "Invalid logistics route. Ensure carrier_code still exists.",
    ),
    (
        "130608",
        "Missing dispatch location. Set dispatch_location = MX for Mexico products.",
    ),
    (
        "480006",
        "Order amount exceeds limit. Maximum is $5000 for BuyNow orders.",
    ),
    (
        "10007",
        "Cannot find SKU cost. Check product MOQ requirements.",
    ),
    (
        "410006",
        "Quantity below minimum. Increase quantity to meet MOQ.",
    ),
    (
        "130704",
        "Promotion unavailable. Contact Alibaba to refresh inventory cache.",
    ),
    (
        "130106",
        "Product invalid. Product is offline, select different product.",
    ),
    (
        "130703",
        "Insufficient inventory. Reduce quantity or select different SKU.",
    ),
    (
        "120019",
        "Product restricted. Product cannot ship to destination country.",
    ),
    (
        "800022",
        "Unable to calculate tariff. Provide complete address details.",
    ),
    (
        "10012",
        "Dispatch location invalid. Match dispatch_location to product's origin.",
    ),
    (
        "4015",
        "Cannot ship to country. Seller doesn't support shipping to destination.",
    ),
    (
        "4016",
        "Freight template service error. Product or shipping configuration invalid.",
    ),
    ("140004", "Insufficient inventory. Product is out of stock."),
    ("10005", "SKU not found. SKU may have been deleted."),
    (
        "400007",
        "EPR required. Seller needs valid EPR number for DE/FR.",
    ),
    (
        "430013",
        "Order amount too small. Minimum order amount is $0.30.",
    ),
];

/// Returns the documented description for `code`, if any.
#[must_use]
pub fn lookup(code: &str) -> Option<&'static str> {
    ERROR_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, message)| *message)
}

/// Returns the documented description for `code`, or a generic
/// `API error code: {code}` message.
///
/// ```rust
/// use alibaba_api::clients::describe_error_code;
///
/// assert!(describe_error_code("110001").starts_with("Unauthorized"));
/// assert_eq!(describe_error_code("999"), "API error code: 999");
/// ```
#[must_use]
pub fn describe(code: &str) -> String {
    lookup(code).map_or_else(|| format!("API error code: {code}"), String::from)
}
