//! HMAC-SHA256 request signing for the Alibaba Open Platform.
//!
//! Every request carries a `sign` parameter computed as follows:
//!
//! 1. sort all parameters (except `sign`) by key in byte order
//! 2. concatenate `key` and `value` for each pair with no separators
//! 3. prepend the endpoint path
//! 4. HMAC-SHA256 the UTF-8 message with the app secret as key
//! 5. hex-encode the digest in uppercase
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use alibaba_api::signing::compute_signature;
//!
//! let mut params = BTreeMap::new();
//! params.insert("code".to_string(), "3_500102_abc".to_string());
//! params.insert("app_key".to_string(), "500102".to_string());
//!
//! let sign = compute_signature("/auth/token/create", &params, "app-secret");
//! assert_eq!(sign.len(), 64);
//! assert!(sign.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
//! ```

use std::collections::BTreeMap;

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// A complete, signed request parameter set.
///
/// A `BTreeMap` keeps keys unique and iterates them in byte order, which is
/// the canonical order used by the signature.
pub type SignedParams = BTreeMap<String, String>;

/// Value of the `sign_method` system parameter.
pub const SIGN_METHOD: &str = "sha256";

/// Name of the application key system parameter.
pub const PARAM_APP_KEY: &str = "app_key";
/// Name of the signing method system parameter.
pub const PARAM_SIGN_METHOD: &str = "sign_method";
/// Name of the millisecond timestamp system parameter.
pub const PARAM_TIMESTAMP: &str = "timestamp";
/// Name of the OAuth access token system parameter.
pub const PARAM_ACCESS_TOKEN: &str = "access_token";
/// Name of the signature parameter.
pub const PARAM_SIGN: &str = "sign";

/// Parameter names injected by the client. Business parameters must not
/// reuse them.
pub const RESERVED_PARAMS: [&str; 5] = [
    PARAM_APP_KEY,
    PARAM_SIGN_METHOD,
    PARAM_TIMESTAMP,
    PARAM_ACCESS_TOKEN,
    PARAM_SIGN,
];

/// Computes the uppercase hex HMAC-SHA256 signature for a request.
///
/// Parameters may be supplied in any order; they are sorted by key before
/// signing. A `sign` entry, if present, is ignored.
///
/// # Example
///
/// ```rust
/// use alibaba_api::signing::compute_signature;
///
/// let a = compute_signature("/test", [("b", "2"), ("a", "1")], "secret");
/// let b = compute_signature("/test", [("a", "1"), ("b", "2")], "secret");
/// assert_eq!(a, b);
/// ```
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature<I, K, V>(path: &str, params: I, secret: &str) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut pairs: Vec<(K, V)> = params
        .into_iter()
        .filter(|(key, _)| key.as_ref() != PARAM_SIGN)
        .collect();
    pairs.sort_by(|(a, _), (b, _)| a.as_ref().as_bytes().cmp(b.as_ref().as_bytes()));

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(path.as_bytes());
    for (key, value) in &pairs {
        mac.update(key.as_ref().as_bytes());
        mac.update(value.as_ref().as_bytes());
    }

    hex::encode_upper(mac.finalize().into_bytes())
}

/// Builds the full signed parameter set for a request, stamped with the
/// current wall-clock time.
///
/// System parameters `app_key`, `sign_method` and `timestamp` are always
/// present; `access_token` only when a non-empty token is given. Business
/// parameters are merged on top and `sign` is computed over the result.
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeMap;
/// use alibaba_api::signing::build_signed_parameters;
///
/// let mut business = BTreeMap::new();
/// business.insert("product_id".to_string(), "1601206892606".to_string());
///
/// let signed = build_signed_parameters(
///     "/eco/buyer/product/description",
///     &business,
///     "key",
///     "secret",
///     None,
/// );
/// assert_eq!(signed["sign_method"], "sha256");
/// assert!(signed.contains_key("sign"));
/// assert!(!signed.contains_key("access_token"));
/// ```
#[must_use]
pub fn build_signed_parameters(
    path: &str,
    business_params: &BTreeMap<String, String>,
    app_key: &str,
    app_secret: &str,
    access_token: Option<&str>,
) -> SignedParams {
    build_signed_parameters_at(
        path,
        business_params,
        app_key,
        app_secret,
        access_token,
        chrono::Utc::now().timestamp_millis(),
    )
}

/// Same as [`build_signed_parameters`] with an explicit millisecond
/// timestamp.
///
/// # Panics
///
/// In debug builds, panics when a business parameter reuses a reserved
/// system parameter name. Release builds log a warning and let the business
/// value through.
#[must_use]
pub fn build_signed_parameters_at(
    path: &str,
    business_params: &BTreeMap<String, String>,
    app_key: &str,
    app_secret: &str,
    access_token: Option<&str>,
    timestamp_ms: i64,
) -> SignedParams {
    let mut params = SignedParams::new();
    params.insert(PARAM_APP_KEY.to_string(), app_key.to_string());
    params.insert(PARAM_SIGN_METHOD.to_string(), SIGN_METHOD.to_string());
    params.insert(PARAM_TIMESTAMP.to_string(), timestamp_ms.to_string());

    if let Some(token) = access_token.filter(|token| !token.is_empty()) {
        params.insert(PARAM_ACCESS_TOKEN.to_string(), token.to_string());
    }

    let collisions: Vec<&str> = business_params
        .keys()
        .map(String::as_str)
        .filter(|key| RESERVED_PARAMS.contains(key))
        .collect();
    if !collisions.is_empty() {
        tracing::warn!(
            path,
            ?collisions,
            "business parameters reuse reserved system parameter names"
        );
    }
    debug_assert!(
        collisions.is_empty(),
        "business parameters must not reuse reserved names: {collisions:?}"
    );

    params.extend(
        business_params
            .iter()
            .map(|(key, value)| (key.clone(), value.clone())),
    );

    let sign = compute_signature(path, &params, app_secret);
    params.insert(PARAM_SIGN.to_string(), sign);
    params
}

mod hex {
    const HEX_CHARS: &[u8; 16] = b"0123456789ABCDEF";

    pub fn encode_upper(bytes: impl AsRef<[u8]>) -> String {
        let bytes = bytes.as_ref();
        let mut result = String::with_capacity(bytes.len() * 2);
        for &byte in bytes {
            result.push(HEX_CHARS[(byte >> 4) as usize] as char);
            result.push(HEX_CHARS[(byte & 0x0f) as usize] as char);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn is_upper_hex(s: &str) -> bool {
        s.chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
    }

    #[test]
    fn test_signature_matches_known_hmac_vector() {
        // HMAC-SHA256("message", "key")
        let sig = compute_signature("message", params(&[]), "key");
        assert_eq!(
            sig,
            "6E9EF29B75FFFC5B7ABAE527D58FDADB2FE42E7219011976917343065F58ED4A"
        );
    }

    #[test]
    fn test_signature_concatenates_path_keys_and_values_without_separators() {
        // "mess" + "ag" + "e" == "message"
        let sig = compute_signature("mess", params(&[("ag", "e")]), "key");
        assert_eq!(
            sig,
            "6E9EF29B75FFFC5B7ABAE527D58FDADB2FE42E7219011976917343065F58ED4A"
        );
    }

    #[test]
    fn test_signature_format() {
        let sig = compute_signature("/test/path", params(&[("key", "value")]), "secret");
        assert_eq!(sig.len(), 64);
        assert!(is_upper_hex(&sig));
    }

    #[test]
    fn test_signature_is_order_independent() {
        let mut forward = HashMap::new();
        forward.insert("b", "2");
        forward.insert("a", "1");
        forward.insert("c", "3");

        let reversed = vec![("c", "3"), ("b", "2"), ("a", "1")];
        let sorted = params(&[("a", "1"), ("b", "2"), ("c", "3")]);

        let expected = compute_signature("/test", &sorted, "secret");
        assert_eq!(compute_signature("/test", forward, "secret"), expected);
        assert_eq!(compute_signature("/test", reversed, "secret"), expected);
    }

    #[test]
    fn test_sort_is_bytewise_not_case_insensitive() {
        // Byte order puts "Z" (0x5A) before "a" (0x61)
        let sig = compute_signature("/p", [("a", "1"), ("Z", "2")], "secret");
        let manual = compute_signature("/pZ2a1", params(&[]), "secret");
        assert_eq!(sig, manual);
    }

    #[test]
    fn test_different_paths_produce_different_signatures() {
        let p = params(&[("key", "value")]);
        let one = compute_signature("/api/one", &p, "secret");
        let two = compute_signature("/api/two", &p, "secret");
        assert_ne!(one, two);
    }

    #[test]
    fn test_different_values_produce_different_signatures() {
        let one = compute_signature("/test", params(&[("key", "value1")]), "secret");
        let two = compute_signature("/test", params(&[("key", "value2")]), "secret");
        assert_ne!(one, two);
    }

    #[test]
    fn test_existing_sign_entry_is_ignored() {
        let without = compute_signature("/test", params(&[("a", "1")]), "secret");
        let with = compute_signature("/test", params(&[("a", "1"), ("sign", "OLD")]), "secret");
        assert_eq!(without, with);
    }

    #[test]
    fn test_unicode_and_special_characters() {
        let sig = compute_signature(
            "/test",
            params(&[("key", "值"), ("other", "value with spaces & symbols!@#")]),
            "secret",
        );
        assert_eq!(sig.len(), 64);
        assert!(is_upper_hex(&sig));
    }

    #[test]
    fn test_build_includes_system_params() {
        let result = build_signed_parameters("/test", &params(&[]), "app_key", "app_secret", None);

        assert_eq!(result["app_key"], "app_key");
        assert_eq!(result["sign_method"], "sha256");
        assert!(result.contains_key("timestamp"));
        assert!(result.contains_key("sign"));
        assert!(!result.contains_key("access_token"));
    }

    #[test]
    fn test_build_timestamp_is_current_milliseconds() {
        let before = chrono::Utc::now().timestamp_millis();
        let result = build_signed_parameters("/test", &params(&[]), "k", "s", None);
        let after = chrono::Utc::now().timestamp_millis();

        let timestamp: i64 = result["timestamp"].parse().unwrap();
        assert!(before <= timestamp && timestamp <= after);
    }

    #[test]
    fn test_build_includes_access_token_only_when_supplied() {
        let with = build_signed_parameters("/test", &params(&[]), "k", "s", Some("token123"));
        assert_eq!(with["access_token"], "token123");

        let empty = build_signed_parameters("/test", &params(&[]), "k", "s", Some(""));
        assert!(!empty.contains_key("access_token"));
    }

    #[test]
    fn test_build_merges_business_params_and_signs_everything() {
        let business = params(&[("product_id", "123"), ("quantity", "5")]);
        let result =
            build_signed_parameters_at("/test", &business, "k", "s", Some("t"), 1_700_000_000_000);

        assert_eq!(result["product_id"], "123");
        assert_eq!(result["quantity"], "5");
        assert_eq!(result["timestamp"], "1700000000000");

        let mut unsigned = result.clone();
        let sign = unsigned.remove("sign").unwrap();
        assert_eq!(sign, compute_signature("/test", &unsigned, "s"));
    }

    #[test]
    fn test_build_signature_depends_on_business_params() {
        let extra = params(&[("extra", "value")]);
        let one = build_signed_parameters_at("/test", &extra, "k", "s", None, 1);
        let two = build_signed_parameters_at("/test", &params(&[]), "k", "s", None, 1);
        assert_ne!(one["sign"], two["sign"]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "reserved names")]
    fn test_build_flags_reserved_name_collision() {
        let business = params(&[("timestamp", "0")]);
        let _ = build_signed_parameters("/test", &business, "k", "s", None);
    }
}
