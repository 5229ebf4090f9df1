//! Response classification for the Alibaba dispatcher.
//!
//! A raw HTTP response (status, `x-request-id` header, body text) is turned
//! into either the parsed JSON object or a typed [`AlibabaError`].

use serde_json::{Map, Value};

use crate::clients::error_codes;
use crate::clients::errors::{AlibabaError, ApiError, NetworkError};

/// The parsed top-level JSON object of a successful response.
pub type ResponseMapping = Map<String, Value>;

/// A response received from the gateway, before classification.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// HTTP status code.
    pub code: u16,
    /// Value of the `x-request-id` header.
    pub request_id: Option<String>,
    /// Raw body text.
    pub text: String,
    /// Body parsed as JSON, when it is valid JSON.
    pub body: Option<Value>,
}

impl HttpResponse {
    /// Creates a response and attempts to parse the body as JSON.
    #[must_use]
    pub fn new(code: u16, request_id: Option<String>, text: String) -> Self {
        let body = serde_json::from_str(&text).ok();
        Self {
            code,
            request_id,
            text,
            body,
        }
    }

    /// Returns `true` if the status code is below 400.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code < 400
    }

    /// Classifies the response.
    ///
    /// # Errors
    ///
    /// - [`NetworkError`] with the status code when the status is >= 400
    /// - [`ApiError`] when the body is an object whose `code` is not `"0"`
    pub fn into_mapping(self) -> Result<ResponseMapping, AlibabaError> {
        if !self.is_ok() {
            let message = match &self.body {
                Some(Value::Object(object)) => object
                    .get("message")
                    .and_then(Value::as_str)
                    .map_or_else(|| self.text.clone(), String::from),
                _ => self.text.clone(),
            };
            return Err(NetworkError {
                message,
                status_code: Some(self.code),
                request_id: self.request_id,
            }
            .into());
        }

        let object = match self.body {
            Some(Value::Object(object)) => object,
            Some(other) => return Ok(wrap_data(other)),
            None => return Ok(wrap_data(Value::String(self.text))),
        };

        let code = object.get("code").map(coerce_to_string).unwrap_or_default();
        if code == "0" {
            return Ok(object);
        }

        Err(api_error(code, &object).into())
    }
}

fn wrap_data(value: Value) -> ResponseMapping {
    let mut mapping = Map::new();
    mapping.insert("data".to_string(), value);
    mapping
}

/// Renders a scalar JSON value as the string the platform would have sent.
fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn api_error(code: String, object: &ResponseMapping) -> ApiError {
    let sub_code = object
        .get("sub_code")
        .map(coerce_to_string)
        .filter(|s| !s.is_empty());
    let request_id = object
        .get("request_id")
        .map(coerce_to_string)
        .filter(|s| !s.is_empty());

    let message = object
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map_or_else(
            || error_codes::describe(sub_code.as_deref().unwrap_or(&code)),
            String::from,
        );

    ApiError {
        code,
        message,
        sub_code,
        request_id,
    }
}
