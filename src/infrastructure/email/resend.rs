//! HTTP email transport for the Resend API.

use super::transport::{EmailTransport, NotifyError, OutgoingEmail};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Default Resend endpoint.
pub const DEFAULT_EMAIL_API_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

/// Posts messages as JSON to an HTTP email API with a bearer token.
///
/// Uses the client's default timeouts. Each [`EmailTransport::send`] is a
/// single request.
pub struct ResendTransport {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl ResendTransport {
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl EmailTransport for ResendTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
            });
        }

        let body: SendResponse = response
            .json()
            .await
            .map_err(|e| NotifyError::MalformedResponse(e.to_string()))?;

        debug!(message_id = %body.id, "Email accepted by provider");
        Ok(())
    }
}
