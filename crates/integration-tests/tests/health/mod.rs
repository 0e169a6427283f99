use indoc::{formatdoc, indoc};
use integration_tests::{TestServer, free_address, wait_until_reachable};

#[tokio::test]
async fn health_endpoint_enabled_by_default() {
    let server = TestServer::start("").await;

    let response = server.client.get("/health").await;
    assert_eq!(response.status(), 200);

    let body = response.text().await.unwrap();
    insta::assert_snapshot!(body, @r#"{"status":"healthy"}"#);
}

#[tokio::test]
async fn health_endpoint_disabled() {
    let config = indoc! {r#"
        [server.health]
        enabled = false
    "#};

    let server = TestServer::start(config).await;

    let response = server.client.get("/health").await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn health_endpoint_custom_path() {
    let config = indoc! {r#"
        [server.health]
        path = "/status"
    "#};

    let server = TestServer::start(config).await;

    let response = server.client.get("/status").await;
    assert_eq!(response.status(), 200);

    let body = response.text().await.unwrap();
    insta::assert_snapshot!(body, @r#"{"status":"healthy"}"#);

    let response = server.client.get("/health").await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn health_endpoint_separate_listener() {
    let health_address = free_address().await;

    let config = formatdoc! {r#"
        [server.health]
        listen = "{health_address}"
    "#, health_address = health_address};

    let server = TestServer::start(&config).await;

    let response = wait_until_reachable(&format!("http://{health_address}/health")).await;
    assert_eq!(response.status(), 200);

    let body = response.text().await.unwrap();
    insta::assert_snapshot!(body, @r#"{"status":"healthy"}"#);

    // Not exposed on the main listener
    let response = server.client.get("/health").await;
    assert_eq!(response.status(), 404);
}
