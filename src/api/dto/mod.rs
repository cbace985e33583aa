//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs use Serde for deserialization and validator for field rules.

pub mod contact;
pub mod health;
