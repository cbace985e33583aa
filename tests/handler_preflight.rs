mod common;

use axum::http::{Method, StatusCode};
use common::{ALLOWED_ORIGIN, create_test_server};

#[tokio::test]
async fn test_preflight_allowed_origin() {
    let server = create_test_server(None);

    let response = server
        .method(Method::OPTIONS, "/api/contact")
        .add_header("Origin", ALLOWED_ORIGIN)
        .add_header("Access-Control-Request-Method", "POST")
        .await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert_eq!(response.header("access-control-allow-origin"), ALLOWED_ORIGIN);
    assert_eq!(response.header("access-control-allow-methods"), "POST, OPTIONS");
    assert_eq!(response.header("access-control-allow-headers"), "Content-Type");
    assert_eq!(response.header("access-control-max-age"), "86400");
    assert!(response.text().is_empty());
}

#[tokio::test]
async fn test_preflight_disallowed_origin() {
    let server = create_test_server(None);

    let response = server
        .method(Method::OPTIONS, "/api/contact")
        .add_header("Origin", "https://evil.example")
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert!(response.text().is_empty());
    assert!(response.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn test_preflight_without_origin_rejected() {
    let server = create_test_server(None);

    let response = server.method(Method::OPTIONS, "/api/contact").await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert!(response.text().is_empty());
}

#[tokio::test]
async fn test_origin_matching_is_exact() {
    let server = create_test_server(None);

    for origin in [
        "https://example.com/",
        "http://example.com",
        "https://sub.example.com",
        "https://EXAMPLE.com",
    ] {
        server
            .method(Method::OPTIONS, "/api/contact")
            .add_header("Origin", origin)
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
