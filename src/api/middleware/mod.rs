//! HTTP middleware for request processing and protection.
//!
//! Provides response hardening, panic recovery and observability middleware.

pub mod panic;
pub mod security_headers;
pub mod tracing;
