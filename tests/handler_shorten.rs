mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use url_alias::config::ProbePolicy;

#[tokio::test]
async fn test_shorten_success() {
    let server = TestServer::new(common::alias_app(common::memory_state())).unwrap();

    let response = server
        .post("/add")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["shorted_url"], "http://localhost:8080/r/327c3fda87");
    assert_eq!(json["long_url"], "https://example.com");
    assert!(json.get("warning").is_none());
    assert!(response.headers().get("x-probe-warning").is_none());
}

#[tokio::test]
async fn test_shorten_same_url_twice_conflicts() {
    let server = TestServer::new(common::alias_app(common::memory_state())).unwrap();

    let first = server
        .post("/add")
        .json(&json!({ "url": "https://example.com" }))
        .await;
    assert_eq!(first.status_code(), StatusCode::CREATED);

    let second = server
        .post("/add")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    assert_eq!(second.status_code(), StatusCode::CONFLICT);
    let json = second.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "conflict");
    assert_eq!(json["error"]["details"]["reason"], "already_shortened");
    assert_eq!(json["error"]["details"]["code"], "327c3fda87");
}

#[tokio::test]
async fn test_shorten_empty_url() {
    let server = TestServer::new(common::alias_app(common::memory_state())).unwrap();

    let response = server.post("/add").json(&json!({ "url": "" })).await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let server = TestServer::new(common::alias_app(common::memory_state())).unwrap();

    let response = server
        .post("/add")
        .json(&json!({ "url": "not a url" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_shorten_missing_field() {
    let server = TestServer::new(common::alias_app(common::memory_state())).unwrap();

    let response = server.post("/add").json(&json!({ "link": "https://example.com" })).await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["message"], "Invalid request body");
}

#[tokio::test]
async fn test_shorten_non_json_body() {
    let server = TestServer::new(common::alias_app(common::memory_state())).unwrap();

    let response = server.post("/add").text("{ not json").await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_shorten_unreachable_target_warns() {
    let state = common::unreachable_state(ProbePolicy::Warn);
    let server = TestServer::new(common::alias_app(state)).unwrap();

    let response = server
        .post("/add")
        .json(&json!({ "url": "https://example.com/gone" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let warning = response.header("x-probe-warning");
    assert!(warning.to_str().unwrap().contains("404"));

    let json = response.json::<serde_json::Value>();
    assert!(json["warning"].as_str().unwrap().contains("not reachable"));

    // Stored despite the warning.
    let code = json["shorted_url"]
        .as_str()
        .unwrap()
        .rsplit('/')
        .next()
        .unwrap()
        .to_string();
    let redirect = server.get(&format!("/r/{}", code)).await;
    assert_eq!(redirect.status_code(), 307);
}

#[tokio::test]
async fn test_shorten_unreachable_target_strict_rejects() {
    let state = common::unreachable_state(ProbePolicy::Strict);
    let server = TestServer::new(common::alias_app(state)).unwrap();

    let response = server
        .post("/add")
        .json(&json!({ "url": "https://example.com/gone" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "upstream_unreachable");

    let redirect = server.get("/r/bedcecd695").await;
    redirect.assert_status_not_found();
}

#[tokio::test]
async fn test_shorten_rejects_control_characters() {
    let server = TestServer::new(common::alias_app(common::memory_state())).unwrap();

    let response = server
        .post("/add")
        .json(&json!({ "url": "https://example.com/a\nb" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");

    // Nothing was stored under the literal string's code.
    server.get("/r/ac2b8cc051").await.assert_status_not_found();
}

#[tokio::test]
async fn test_shorten_rejects_surrounding_whitespace() {
    let server = TestServer::new(common::alias_app(common::memory_state())).unwrap();

    let response = server
        .post("/add")
        .json(&json!({ "url": " https://example.com " }))
        .await;

    response.assert_status_bad_request();
}
