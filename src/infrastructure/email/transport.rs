//! Email transport trait and error types.

use async_trait::async_trait;
use serde::Serialize;

/// Errors that can occur while handing a message to the email provider.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The request never completed (DNS, TLS, connection reset, timeout).
    #[error("Email transport error: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("Email provider rejected message with status {status}")]
    Rejected { status: u16 },

    /// The provider answered 2xx but the body was not what we expect.
    #[error("Malformed email provider response: {0}")]
    MalformedResponse(String),

    /// The message body could not be rendered from its template.
    #[error("Email template render error: {0}")]
    Render(String),
}

/// A fully rendered message, ready for the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

/// Outbound email sink.
///
/// One call is one delivery attempt; implementations must not retry.
///
/// # Implementations
///
/// - [`crate::infrastructure::email::ResendTransport`] - HTTP API transport
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailTransport: Send + Sync {
    /// Sends one message.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] when the provider cannot be reached or does not
    /// accept the message.
    async fn send(&self, email: &OutgoingEmail) -> Result<(), NotifyError>;
}
