//! Request-side types for the Alibaba dispatcher.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Endpoint-specific parameters supplied by the caller.
///
/// Values are always strings; structured values are JSON-encoded first.
pub type BusinessParams = BTreeMap<String, String>;

/// HTTP methods supported by the Alibaba REST gateway.
///
/// GET sends the signed parameters as a query string, POST as an
/// `application/x-www-form-urlencoded` body.
///
/// ```rust
/// use alibaba_api::HttpMethod;
///
/// assert_eq!("post".parse::<HttpMethod>(), Ok(HttpMethod::Post));
/// assert_eq!(HttpMethod::Get.to_string(), "GET");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Parameters in the query string.
    #[default]
    Get,
    /// Parameters in a urlencoded form body.
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            _ => Err(format!("Invalid Http method {s}.")),
        }
    }
}

/// Builds a [`BusinessParams`] map from string pairs.
///
/// ```rust
/// use alibaba_api::clients::business_params;
///
/// let params = business_params([("trade_id", "123"), ("data_select", "logistic_order")]);
/// assert_eq!(params["trade_id"], "123");
/// ```
#[must_use]
pub fn business_params<I, K, V>(pairs: I) -> BusinessParams
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse_is_case_insensitive() {
        assert_eq!("GET".parse::<HttpMethod>(), Ok(HttpMethod::Get));
        assert_eq!("Post".parse::<HttpMethod>(), Ok(HttpMethod::Post));
    }

    #[test]
    fn test_method_parse_rejects_others() {
        assert_eq!(
            "put".parse::<HttpMethod>(),
            Err("Invalid Http method put.".to_string())
        );
    }

    #[test]
    fn test_business_params_later_pairs_win() {
        let params = business_params([("a", "1"), ("a", "2")]);
        assert_eq!(params.len(), 1);
        assert_eq!(params["a"], "2");
    }
}
