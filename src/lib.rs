//! # Contact Relay
//!
//! Contact form submission endpoint built with Axum: origin checks, per-client
//! rate limiting, strict field validation and best-effort email notification.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Submission entities, client keys and origin policy
//! - **Application Layer** ([`application`]) - The submission pipeline
//! - **Infrastructure Layer** ([`infrastructure`]) - Rate limiters, email transport, clock
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - CORS allow-list with a development origin outside production
//! - Sliding-window rate limiting in Redis, or in process when Redis is absent
//! - HTML-escaped operator notification plus a submitter acknowledgement
//! - Uniform JSON error bodies that never echo internal detail
//!
//! ## Quick Start
//!
//! ```bash
//! export RESEND_API_KEY="re_..."            # Optional
//! export REDIS_URL="redis://localhost:6379"  # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::ContactService;
    pub use crate::domain::entities::{BudgetRange, ServiceKind, ValidatedSubmission};
    pub use crate::domain::{ClientKey, OriginPolicy};
    pub use crate::error::AppError;
    pub use crate::infrastructure::email::{EmailTransport, Notifier, NotifyError, OutgoingEmail};
    pub use crate::infrastructure::rate_limit::{
        LocalRateLimiter, RateDecision, RateLimitPolicy, RateLimiter,
    };
    pub use crate::routes::app_router;
    pub use crate::state::AppState;
}
