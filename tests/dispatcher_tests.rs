//! Integration tests for the signed request dispatcher.
//!
//! These tests run the client against a local mock gateway and verify
//! signing, transport, and response classification.

use std::collections::BTreeMap;
use std::time::Duration;

use alibaba_api::clients::business_params;
use alibaba_api::signing::compute_signature;
use alibaba_api::{
    AlibabaClient, AlibabaConfig, AlibabaError, AppKey, AppSecret, BaseUrl, BusinessParams,
    HttpMethod,
};
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const APP_KEY: &str = "500102";
const APP_SECRET: &str = "test-secret";

/// Creates a client pointed at `base_url`.
fn create_client(base_url: &str, timeout_secs: u64) -> AlibabaClient {
    let config = AlibabaConfig::builder()
        .app_key(AppKey::new(APP_KEY).unwrap())
        .app_secret(AppSecret::new(APP_SECRET).unwrap())
        .access_token("configured-token")
        .timeout_secs(timeout_secs)
        .base_url(BaseUrl::new(base_url).unwrap())
        .build()
        .unwrap();
    AlibabaClient::new(config).unwrap()
}

fn query_map(request: &wiremock::Request) -> BTreeMap<String, String> {
    request.url.query_pairs().into_owned().collect()
}

fn form_map(request: &wiremock::Request) -> BTreeMap<String, String> {
    let body = String::from_utf8(request.body.clone()).unwrap();
    body.split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| {
            (
                urlencoding::decode(k).unwrap().into_owned(),
                urlencoding::decode(&v.replace('+', " ")).unwrap().into_owned(),
            )
        })
        .collect()
}

// ============================================================================
// Success path
// ============================================================================

#[tokio::test]
async fn test_success_body_is_returned_unmodified() {
    let server = MockServer::start().await;
    let body = json!({
        "code": "0",
        "value": {"trade_id": "234193410001028893"},
        "request_id": "abc"
    });
    Mock::given(method("GET"))
        .and(path("/alibaba/order/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server.uri(), 30);
    let params = business_params([("e_trade_id", "234193410001028893")]);
    let mapping = client.get("/alibaba/order/get", &params).await.unwrap();

    assert_eq!(Value::Object(mapping), body);
}

#[tokio::test]
async fn test_get_request_carries_valid_signature() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/alibaba/order/list"))
        .and(query_param("app_key", APP_KEY))
        .and(query_param("sign_method", "sha256"))
        .and(query_param("access_token", "configured-token"))
        .and(query_param("role", "buyer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": "0"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server.uri(), 30);
    client
        .get("/alibaba/order/list", &business_params([("role", "buyer")]))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let query = query_map(&requests[0]);
    let sign = query.get("sign").unwrap();

    assert_eq!(sign.len(), 64);
    assert_eq!(sign, &sign.to_uppercase());
    assert_eq!(
        sign,
        &compute_signature("/alibaba/order/list", &query, APP_SECRET)
    );
    assert!(query["timestamp"].parse::<i64>().is_ok());
}

#[tokio::test]
async fn test_post_sends_signed_form_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/buynow/order/create"))
        .and(body_string_contains("channel_refer_id=ref-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": "0", "value": {"trade_id": "9"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server.uri(), 30);
    let params = business_params([("channel_refer_id", "ref-1"), ("remark", "a b&c")]);
    client
        .execute("/buynow/order/create", &params, HttpMethod::Post, None)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].url.query().is_none());

    let form = form_map(&requests[0]);
    assert_eq!(form["remark"], "a b&c");
    assert_eq!(
        form["sign"],
        compute_signature("/buynow/order/create", &form, APP_SECRET)
    );
}

#[tokio::test]
async fn test_token_override_replaces_configured_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/token/create"))
        .and(query_param("access_token", "override"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": "0"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server.uri(), 30);
    client
        .get_with_token("/auth/token/create", &business_params([("code", "c")]), "override")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_non_object_body_is_wrapped_in_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])))
        .mount(&server)
        .await;

    let client = create_client(&server.uri(), 30);
    let mapping = client.get("/any", &BusinessParams::new()).await.unwrap();

    assert_eq!(Value::Object(mapping), json!({"data": [1, 2, 3]}));
}

// ============================================================================
// Error classification
// ============================================================================

#[tokio::test]
async fn test_non_zero_code_is_api_error_with_known_description() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": "130106", "message": "", "request_id": "req-1"})),
        )
        .mount(&server)
        .await;

    let client = create_client(&server.uri(), 30);
    let err = client
        .get("/eco/buyer/product/description", &business_params([("q", "1")]))
        .await
        .unwrap_err();

    match err {
        AlibabaError::Api(e) => {
            assert_eq!(e.code, "130106");
            assert!(e.message.starts_with("Product invalid"));
            assert_eq!(e.request_id.as_deref(), Some("req-1"));
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_sub_code_takes_precedence_for_description() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 15, "sub_code": "110001"})),
        )
        .mount(&server)
        .await;

    let client = create_client(&server.uri(), 30);
    let err = client
        .get("/alibaba/order/list", &business_params([("role", "buyer")]))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "api");
    assert_eq!(err.code(), Some("15"));
    assert!(err.message().contains("overseas-registered account"));
    assert_eq!(err.to_string(), format!("[15:110001] {}", err.message()));
}

#[tokio::test]
async fn test_http_error_status_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("x-request-id", "hdr-404")
                .set_body_json(json!({"message": "Not Found"})),
        )
        .mount(&server)
        .await;

    let client = create_client(&server.uri(), 30);
    let err = client
        .get("/missing", &business_params([("a", "1")]))
        .await
        .unwrap_err();

    match err {
        AlibabaError::Network(e) => {
            assert_eq!(e.status_code, Some(404));
            assert_eq!(e.message, "Not Found");
            assert_eq!(e.request_id.as_deref(), Some("hdr-404"));
        }
        other => panic!("expected NetworkError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_with_text_body_uses_raw_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = create_client(&server.uri(), 30);
    let err = client
        .post("/buynow/order/create", &business_params([("a", "1")]))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(502));
    assert_eq!(err.message(), "Bad Gateway");
}

#[tokio::test]
async fn test_relative_path_never_reaches_transport() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": "0"})))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server.uri(), 30);
    let err = client
        .get("alibaba/order/get", &business_params([("a", "1")]))
        .await
        .unwrap_err();

    assert!(matches!(err, AlibabaError::Validation(_)));
    assert_eq!(
        err.message(),
        "api_path must start with '/', got: alibaba/order/get"
    );
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": "0"}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = create_client(&server.uri(), 1);
    let err = client
        .get("/slow", &business_params([("a", "1")]))
        .await
        .unwrap_err();

    assert!(matches!(err, AlibabaError::Network(_)));
    assert_eq!(err.message(), "Request timed out after 1s");
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let client = create_client("http://127.0.0.1:1", 5);
    let err = client
        .get("/alibaba/order/get", &business_params([("a", "1")]))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "network");
    assert!(err.message().starts_with("Network error"));
    assert_eq!(err.status_code(), None);
}
