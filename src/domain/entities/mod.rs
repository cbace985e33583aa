//! Core value types of the contact pipeline.

pub mod submission;

pub use submission::{BudgetRange, ServiceKind, UnknownVariant, ValidatedSubmission};
