mod common;

use serde_json::json;
use slug_shortener::api::dto::shorten::ShortenResponse;
use slug_shortener::domain::repositories::LinkRepository;

#[tokio::test]
async fn test_shorten_success() {
    let ctx = common::create_test_context();
    let server = common::create_test_server(ctx.state.clone());

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_ok();

    let body = response.json::<ShortenResponse>();
    assert_eq!(body.slug.len(), 10);
    assert_eq!(body.short_url, format!("{}/{}", common::BASE_URL, body.slug));

    let link = ctx.repo.get_by_slug(&body.slug).await.unwrap();
    assert_eq!(link.url, "https://example.com");
}

#[tokio::test]
async fn test_shorten_same_url_twice() {
    let ctx = common::create_test_context();
    let server = common::create_test_server(ctx.state.clone());

    let first = server
        .post("/shorten")
        .json(&json!({ "url": "https://dedup.com" }))
        .await
        .json::<ShortenResponse>();

    let second = server
        .post("/shorten")
        .json(&json!({ "url": "https://dedup.com" }))
        .await
        .json::<ShortenResponse>();

    assert_eq!(first.slug, second.slug);
    assert_eq!(ctx.repo.len().await, 1);
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let ctx = common::create_test_context();
    let server = common::create_test_server(ctx.state.clone());

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "not-a-valid-url" }))
        .await;

    response.assert_status_bad_request();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "validation_error");
    assert!(ctx.repo.is_empty().await);
}

#[tokio::test]
async fn test_shorten_empty_url() {
    let ctx = common::create_test_context();
    let server = common::create_test_server(ctx.state);

    let response = server.post("/shorten").json(&json!({ "url": "" })).await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_shorten_missing_field() {
    let ctx = common::create_test_context();
    let server = common::create_test_server(ctx.state);

    let response = server.post("/shorten").json(&json!({})).await;

    response.assert_status_bad_request();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_malformed_body() {
    let ctx = common::create_test_context();
    let server = common::create_test_server(ctx.state);

    let response = server.post("/shorten").text("{not json").await;

    response.assert_status_bad_request();
}
