mod common;

use axum::body::Bytes;
use axum::http::StatusCode;
use serde_json::{Value, json};
use shortener_service::domain::repositories::UrlMappingRepository;
use std::sync::Arc;

#[tokio::test]
async fn test_generate_short_url_success() {
    let (state, repository) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .post("/generate_short_url")
        .json(&json!({ "long_url": "https://example.com/some/long/path" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    let short_url = json["short_url"].as_str().unwrap();
    let path = short_url.strip_prefix("http://svc.test/").unwrap();

    assert_eq!(path.len(), 5);
    assert!(path.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(repository.len(), 1);
}

#[tokio::test]
async fn test_generate_short_url_is_idempotent() {
    let (state, repository) = common::create_test_state();
    let server = common::create_test_server(state);
    let body = json!({ "long_url": "https://example.com/same" });

    let first = server.post("/generate_short_url").json(&body).await;
    let second = server.post("/generate_short_url").json(&body).await;

    first.assert_status_ok();
    second.assert_status_ok();
    assert_eq!(
        first.json::<Value>()["short_url"],
        second.json::<Value>()["short_url"]
    );
    assert_eq!(repository.len(), 1);
}

#[tokio::test]
async fn test_generate_distinct_urls_get_distinct_paths() {
    let (state, repository) = common::create_test_state();
    let server = common::create_test_server(state);

    let first = server
        .post("/generate_short_url")
        .json(&json!({ "long_url": "https://example.com/a" }))
        .await;
    let second = server
        .post("/generate_short_url")
        .json(&json!({ "long_url": "https://example.com/b" }))
        .await;

    assert_ne!(
        first.json::<Value>()["short_url"],
        second.json::<Value>()["short_url"]
    );
    assert_eq!(repository.len(), 2);
}

#[tokio::test]
async fn test_generate_missing_long_url() {
    let (state, repository) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server.post("/generate_short_url").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["details"]["errors"][0]["field"], "long_url");
    assert!(repository.is_empty());
}

#[tokio::test]
async fn test_generate_malformed_json() {
    let (state, _repository) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .post("/generate_short_url")
        .bytes(Bytes::from_static(b"{\"long_url\": "))
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(
        json["error"]["message"],
        "Invalid JSON data in the request body."
    );
}

#[tokio::test]
async fn test_generate_invalid_url() {
    let (state, repository) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .post("/generate_short_url")
        .json(&json!({ "long_url": "not a url" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(repository.is_empty());
}

#[tokio::test]
async fn test_generate_rejects_non_http_scheme() {
    let (state, repository) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .post("/generate_short_url")
        .json(&json!({ "long_url": "ftp://example.com/file" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["message"], "Invalid long_url");
    assert!(repository.is_empty());
}

#[tokio::test]
async fn test_generate_storage_failure_is_retried_then_hidden() {
    let repository = Arc::new(common::FailingRepository::default());
    let state = common::create_test_state_with(repository.clone());
    let server = common::create_test_server(state);

    let response = server
        .post("/generate_short_url")
        .json(&json!({ "long_url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "internal_error");
    assert_eq!(json["error"]["message"], "An internal server error occurred.");
    assert!(!response.text().contains("connection refused"));
    // One attempt per delay (1, 2, 4 ms) plus the first.
    assert_eq!(repository.calls(), 4);
}

#[tokio::test]
async fn test_generate_recovers_from_transient_failure() {
    let repository = Arc::new(common::FlakyRepository::new(2));
    let state = common::create_test_state_with(repository);
    let server = common::create_test_server(state);

    let response = server
        .post("/generate_short_url")
        .json(&json!({ "long_url": "https://example.com/flaky" }))
        .await;

    response.assert_status_ok();
    assert!(
        response.json::<Value>()["short_url"]
            .as_str()
            .unwrap()
            .starts_with("http://svc.test/")
    );
}

#[tokio::test]
async fn test_generate_rejects_url_with_stripped_characters() {
    let (state, repository) = common::create_test_state();
    let server = common::create_test_server(state);

    for long_url in ["https://example.com/a\nb", " https://a.example", "https://a.example\t"] {
        let response = server
            .post("/generate_short_url")
            .json(&json!({ "long_url": long_url }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"]["message"], "Invalid long_url");
    }

    assert!(repository.is_empty());
}

#[tokio::test]
async fn test_generated_url_redirects_with_location() {
    let (state, repository) = common::create_test_state();
    let server = common::create_test_server(state);

    let created = server
        .post("/generate_short_url")
        .json(&json!({ "long_url": "https://example.com/a%0Ab?q=1" }))
        .await;
    created.assert_status_ok();

    let short_url = created.json::<Value>()["short_url"]
        .as_str()
        .unwrap()
        .to_string();
    let path = short_url.rsplit('/').next().unwrap().to_string();

    let response = server.get(&format!("/{path}")).await;

    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/a%0Ab?q=1");
    assert_eq!(
        repository.find_visits_by_path(&path).await.unwrap(),
        Some(1)
    );
}
