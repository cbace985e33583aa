//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into pipeline calls and formats
//! responses according to the contact form's API contract.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects and field validation
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Response hardening, panic recovery and tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
