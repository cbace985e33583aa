//! Domain layer: value types and pure policies of the contact pipeline.
//!
//! Nothing here performs I/O. Rate limiting and email delivery live in
//! [`crate::infrastructure`]; orchestration lives in
//! [`crate::application::services`].
//!
//! # Modules
//!
//! - [`entities`] - Validated submission and its closed enums
//! - [`client_key`] - Rate-limit bucket identifier
//! - [`origin_policy`] - CORS allow-list and header construction

pub mod client_key;
pub mod entities;
pub mod origin_policy;

pub use client_key::ClientKey;
pub use origin_policy::{OriginDecision, OriginPolicy};
