//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`rate_limit`] - Redis and in-process rate limiters
//! - [`email`] - Outbound email transport and notifier
//! - [`clock`] - Time source abstraction

pub mod clock;
pub mod email;
pub mod rate_limit;
