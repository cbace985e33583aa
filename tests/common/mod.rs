#![allow(dead_code)]

use async_trait::async_trait;
use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use contact_relay::application::services::ContactService;
use contact_relay::domain::OriginPolicy;
use contact_relay::infrastructure::email::{EmailTransport, Notifier, NotifyError, OutgoingEmail};
use contact_relay::infrastructure::rate_limit::{LocalRateLimiter, RateLimitPolicy};
use contact_relay::routes::{DEFAULT_BODY_LIMIT, app_router};
use contact_relay::state::AppState;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const ALLOWED_ORIGIN: &str = "https://example.com";
pub const OPERATOR: &str = "operator@example.com";

/// Transport that records every message instead of sending it.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<OutgoingEmail>>,
    fail: bool,
}

impl RecordingTransport {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailTransport for RecordingTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(email.clone());

        if self.fail {
            Err(NotifyError::Rejected { status: 500 })
        } else {
            Ok(())
        }
    }
}

pub fn create_test_state(transport: Option<Arc<RecordingTransport>>, max_requests: u32) -> AppState {
    let origin_policy = OriginPolicy::new(&[ALLOWED_ORIGIN.to_string()], true);

    let rate_limiter = Arc::new(LocalRateLimiter::new(RateLimitPolicy {
        max_requests,
        window: Duration::from_secs(60),
    }));

    let transport = transport.map(|t| t as Arc<dyn EmailTransport>);
    let notifier = Arc::new(Notifier::new(
        transport,
        "Test <noreply@example.com>",
        OPERATOR,
    ));

    AppState::new(
        Arc::new(origin_policy),
        Arc::new(ContactService::new(rate_limiter, notifier)),
    )
}

/// Test server over the production router, path normalization included.
pub fn create_test_server_with_limit(state: AppState, body_limit: usize) -> TestServer {
    let app = app_router(state, body_limit);
    TestServer::new(ServiceExt::<Request>::into_make_service(app)).unwrap()
}

pub fn create_test_server(transport: Option<Arc<RecordingTransport>>) -> TestServer {
    create_test_server_with_limit(create_test_state(transport, 5), DEFAULT_BODY_LIMIT)
}

pub fn valid_submission() -> Value {
    json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "company": "Analytical Engines",
        "service": "fullstack",
        "budget": "25k-50k",
        "message": "We would like to discuss a new project."
    })
}
