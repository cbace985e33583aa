//! Outbound email for contact submissions.
//!
//! - [`Notifier`] - Builds and sends the two messages per submission
//! - [`EmailTransport`] - Delivery trait
//! - [`ResendTransport`] - HTTP API implementation

mod notifier;
mod resend;
pub mod templates;
mod transport;

pub use notifier::{DEFAULT_CONTACT_EMAIL, DEFAULT_EMAIL_FROM, Notifier};
pub use resend::{DEFAULT_EMAIL_API_URL, ResendTransport};
pub use transport::{EmailTransport, NotifyError, OutgoingEmail};
