//! Application layer services implementing the submission pipeline.
//!
//! Services consume the rate limiter and notifier through their traits and
//! expose a single entry point to HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::contact_service::ContactService`] - Rate check, validation, logging and notification

pub mod services;
