mod common;

#[tokio::test]
async fn test_health_with_memory_backends() {
    let ctx = common::create_test_context();
    let server = common::create_test_server(ctx.state);

    let response = server.get("/health").await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["store"]["status"], "ok");
    assert_eq!(body["checks"]["cache"]["status"], "ok");
    assert!(body["version"].is_string());
}
