//! Helper functions shared across layers.
//!
//! - [`client_ip`] - Client key extraction from proxy headers
//! - [`html`] - HTML escaping for email bodies

pub mod client_ip;
pub mod html;
