//! DTOs for the contact form endpoint.

use crate::domain::entities::{BudgetRange, ServiceKind, ValidatedSubmission};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::{Validate, ValidationError, ValidationErrors};

/// Letters (any script), whitespace, hyphens, apostrophes and periods.
static NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\p{L}\s\-'.]+$").unwrap());

/// Raw contact form body as posted by the browser.
///
/// Every field defaults to empty so that a missing field is reported as a
/// rule violation alongside the others instead of aborting deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub service: String,
    pub budget: Option<String>,
    pub message: String,
}

/// Normalized form with field rules attached.
#[derive(Debug, Clone, Validate)]
pub struct ContactForm {
    #[validate(length(min = 2, max = 100))]
    #[validate(regex(path = "*NAME_REGEX", code = "name_charset"))]
    pub name: String,

    #[validate(email, length(max = 254))]
    pub email: String,

    #[validate(length(max = 200))]
    pub company: Option<String>,

    #[validate(custom(function = "validate_service"))]
    pub service: String,

    #[validate(custom(function = "validate_budget"))]
    pub budget: Option<String>,

    #[validate(length(min = 10, max = 5000))]
    pub message: String,
}

fn validate_service(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<ServiceKind>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("unknown_service"))
}

fn validate_budget(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<BudgetRange>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("unknown_budget"))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ContactRequest {
    /// Trims free-text fields, lower-cases `email` and drops a blank company.
    ///
    /// `service` and `budget` are enum values and stay verbatim; only an
    /// empty `budget` means "not given".
    pub fn normalize(self) -> ContactForm {
        ContactForm {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            company: non_blank(self.company),
            service: self.service,
            budget: self.budget.filter(|b| !b.is_empty()),
            message: self.message.trim().to_string(),
        }
    }

    /// Normalizes and validates, collecting every violated rule.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing each failing field. The errors
    /// carry the offending values; log them with [`summarize_errors`] only.
    pub fn into_validated(self) -> Result<ValidatedSubmission, ValidationErrors> {
        let form = self.normalize();
        form.validate()?;

        let service = form
            .service
            .parse::<ServiceKind>()
            .map_err(|_| single_error("service", "unknown_service"))?;
        let budget = form
            .budget
            .as_deref()
            .map(str::parse::<BudgetRange>)
            .transpose()
            .map_err(|_| single_error("budget", "unknown_budget"))?;

        Ok(ValidatedSubmission {
            name: form.name,
            email: form.email,
            company: form.company,
            service,
            budget,
            message: form.message,
        })
    }
}

fn single_error(field: &'static str, code: &'static str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, ValidationError::new(code));
    errors
}

/// Field and rule names of a validation failure, without the submitted values.
///
/// # Examples
///
/// ```ignore
/// // "email:email, name:length"
/// let summary = summarize_errors(&errors);
/// ```
pub fn summarize_errors(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| errs.iter().map(move |e| format!("{}:{}", field, e.code)))
        .collect();
    parts.sort();
    parts.join(", ")
}

/// Body of a successful submission response.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: &'static str,
}

impl ContactResponse {
    pub const RECEIVED: &'static str = "Message received successfully";

    pub fn received() -> Self {
        Self {
            success: true,
            message: Self::RECEIVED,
        }
    }
}
