//! Contact submission pipeline.

use crate::api::dto::contact::{ContactRequest, summarize_errors};
use crate::domain::ClientKey;
use crate::domain::entities::ValidatedSubmission;
use crate::error::AppError;
use crate::infrastructure::email::Notifier;
use crate::infrastructure::rate_limit::{RateDecision, RateLimiter};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

/// Runs the rate check, validation, logging and notification steps for one
/// submission. Origin policy is applied by the HTTP handler before this
/// service is called.
pub struct ContactService {
    rate_limiter: Arc<dyn RateLimiter>,
    notifier: Arc<Notifier>,
}

impl ContactService {
    pub fn new(rate_limiter: Arc<dyn RateLimiter>, notifier: Arc<Notifier>) -> Self {
        Self {
            rate_limiter,
            notifier,
        }
    }

    pub fn rate_limiter(&self) -> &dyn RateLimiter {
        self.rate_limiter.as_ref()
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Processes a raw request body from `client`.
    ///
    /// # Pipeline
    ///
    /// 1. Rate check for `client`
    /// 2. JSON parse and field validation
    /// 3. Metadata log (service, timestamp, client key)
    /// 4. Best-effort email notification
    ///
    /// # Errors
    ///
    /// Returns [`AppError::RateLimited`] when the client exhausted its window.
    /// Returns [`AppError::Validation`] for malformed JSON or rule violations.
    /// Notification failures are logged and never returned.
    pub async fn submit(
        &self,
        client: &ClientKey,
        body: &[u8],
    ) -> Result<ValidatedSubmission, AppError> {
        if let RateDecision::Limited { retry_after_secs } = self.rate_limiter.check(client).await {
            warn!(client = %client, retry_after_secs, "Contact submission rate limited");
            return Err(AppError::RateLimited { retry_after_secs });
        }

        let submission = parse_submission(body)?;

        info!(
            service = %submission.service,
            client = %client,
            submitted_at = %Utc::now().to_rfc3339(),
            "Contact form submission received"
        );

        if let Err(e) = self.notifier.send(&submission).await {
            warn!("Contact notification failed: {}", e);
        }

        Ok(submission)
    }
}

/// Deserializes and validates a submission body.
///
/// # Errors
///
/// Returns [`AppError::Validation`] whose reason names failing fields and
/// rules but never the submitted values.
pub fn parse_submission(body: &[u8]) -> Result<ValidatedSubmission, AppError> {
    let request: ContactRequest = serde_json::from_slice(body).map_err(|e| {
        warn!(
            line = e.line(),
            column = e.column(),
            "Contact form body is not valid JSON"
        );
        AppError::validation(format!("malformed body ({:?})", e.classify()))
    })?;

    request.into_validated().map_err(|errors| {
        let summary = summarize_errors(&errors);
        warn!(violations = %summary, "Contact form validation failed");
        AppError::validation(summary)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ServiceKind;
    use crate::infrastructure::rate_limit::{LocalRateLimiter, RateLimitPolicy};
    use serde_json::json;

    fn service() -> ContactService {
        ContactService::new(
            Arc::new(LocalRateLimiter::new(RateLimitPolicy::default())),
            Arc::new(Notifier::disabled()),
        )
    }

    fn body() -> Vec<u8> {
        serde_json::to_vec(&json!({
            "name": "Ada Lovelace",
            "email": "ADA@example.com",
            "service": "ai",
            "message": "Looking for help with an ML pipeline."
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_submit_success() {
        let submission = service()
            .submit(&ClientKey::new("203.0.113.7"), &body())
            .await
            .unwrap();

        assert_eq!(submission.service, ServiceKind::Ai);
        assert_eq!(submission.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let result = service()
            .submit(&ClientKey::new("203.0.113.7"), b"{not json")
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_wrong_json_type_is_validation_error() {
        let result = service()
            .submit(&ClientKey::new("203.0.113.7"), br#"{"name": 42}"#)
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_validation_reason_has_no_values() {
        let body = serde_json::to_vec(&json!({
            "name": "x",
            "email": "private@example",
            "service": "ai",
            "message": "short"
        }))
        .unwrap();

        match parse_submission(&body) {
            Err(AppError::Validation { reason }) => {
                assert!(reason.contains("name:length"));
                assert!(!reason.contains("private@example"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_precedes_validation() {
        let service = service();
        let client = ClientKey::new("203.0.113.7");

        for _ in 0..5 {
            let _ = service.submit(&client, b"garbage").await;
        }

        let result = service.submit(&client, &body()).await;
        assert!(matches!(result, Err(AppError::RateLimited { retry_after_secs }) if retry_after_secs > 0));
    }
}
