mod common;

use common::{RecordingTransport, create_test_server};
use std::sync::Arc;

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = create_test_server(Some(Arc::new(RecordingTransport::default())));

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["rate_limiter"]["status"], "ok");
    assert_eq!(json["checks"]["rate_limiter"]["message"], "Backend: local");
    assert_eq!(json["checks"]["email"]["message"], "Transport configured");
}

#[tokio::test]
async fn test_health_endpoint_without_email() {
    let server = create_test_server(None);

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["checks"]["email"]["status"], "ok");
    assert!(json.get("version").is_some());
}
