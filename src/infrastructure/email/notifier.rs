//! Best-effort submission notifier.

use super::templates::{operator_notification, submitter_acknowledgement};
use super::transport::{EmailTransport, NotifyError};
use crate::domain::entities::ValidatedSubmission;
use std::sync::Arc;
use tracing::{debug, warn};

pub const DEFAULT_CONTACT_EMAIL: &str = "contact@shibasoftwareconsulting.com";
pub const DEFAULT_EMAIL_FROM: &str = "Shiba Software <noreply@shibasoftwareconsulting.com>";

/// Sends the operator notification and the submitter acknowledgement.
///
/// Without a transport every send is a no-op success, so a missing API key
/// never blocks visitors.
pub struct Notifier {
    transport: Option<Arc<dyn EmailTransport>>,
    from: String,
    operator_mailbox: String,
}

impl Notifier {
    pub fn new(
        transport: Option<Arc<dyn EmailTransport>>,
        from: impl Into<String>,
        operator_mailbox: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            from: from.into(),
            operator_mailbox: operator_mailbox.into(),
        }
    }

    /// Notifier with no transport.
    pub fn disabled() -> Self {
        Self::new(None, DEFAULT_EMAIL_FROM, DEFAULT_CONTACT_EMAIL)
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    pub fn operator_mailbox(&self) -> &str {
        &self.operator_mailbox
    }

    /// Sends both messages for one submission.
    ///
    /// The acknowledgement is attempted whatever happened to the operator
    /// notification, and its own failure is only logged.
    ///
    /// # Errors
    ///
    /// Returns the operator notification's [`NotifyError`], if any.
    pub async fn send(&self, submission: &ValidatedSubmission) -> Result<(), NotifyError> {
        let Some(transport) = &self.transport else {
            debug!("Email transport not configured, skipping notification");
            return Ok(());
        };

        let result = match operator_notification(submission, &self.from, &self.operator_mailbox) {
            Ok(notification) => transport.send(&notification).await,
            Err(e) => Err(e),
        };

        let acknowledged = match submitter_acknowledgement(submission, &self.from) {
            Ok(acknowledgement) => transport.send(&acknowledgement).await,
            Err(e) => Err(e),
        };
        if let Err(e) = acknowledged {
            warn!("Acknowledgement email failed: {}", e);
        }

        result
    }
}
