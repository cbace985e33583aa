//! Rendering of the operator notification and the submitter acknowledgement.
//!
//! Bodies live in `templates/email/` and render with the `email` escaper
//! ([`crate::utils::html::EmailHtml`]), so every submitted field is escaped
//! by the template engine.

use super::transport::{NotifyError, OutgoingEmail};
use crate::domain::entities::ValidatedSubmission;
use askama::Template;

const SERVICE_LABELS: &[(&str, &str)] = &[
    ("fullstack", "Full-Stack Development"),
    ("microservices", "Microservices Architecture"),
    ("api", "API Development & Integration"),
    ("events", "Event-Driven Systems"),
    ("ai", "AI Integration"),
    ("mlops", "MLOps & Model Deployment"),
    ("consultation", "Technical Consultation"),
];

const BUDGET_LABELS: &[(&str, &str)] = &[
    ("under-25k", "Under $25,000"),
    ("25k-50k", "$25,000 - $50,000"),
    ("50k-100k", "$50,000 - $100,000"),
    ("over-100k", "Over $100,000"),
];

pub const FALLBACK_SERVICE_LABEL: &str = "Other";
pub const FALLBACK_BUDGET_LABEL: &str = "Not specified";

pub fn service_label(value: &str) -> &'static str {
    lookup(SERVICE_LABELS, value).unwrap_or(FALLBACK_SERVICE_LABEL)
}

pub fn budget_label(value: Option<&str>) -> &'static str {
    value
        .and_then(|v| lookup(BUDGET_LABELS, v))
        .unwrap_or(FALLBACK_BUDGET_LABEL)
}

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, label)| *label)
}

/// Template for the operator mailbox, `templates/email/operator.html`.
#[derive(Template)]
#[template(path = "email/operator.html", escape = "email")]
pub struct OperatorTemplate<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub company: Option<&'a str>,
    pub service_label: &'static str,
    pub budget_label: &'static str,
    pub message: &'a str,
}

impl<'a> OperatorTemplate<'a> {
    pub fn from_submission(submission: &'a ValidatedSubmission) -> Self {
        Self {
            name: &submission.name,
            email: &submission.email,
            company: submission.company.as_deref(),
            service_label: service_label(submission.service.as_str()),
            budget_label: budget_label(submission.budget.as_ref().map(|b| b.as_str())),
            message: &submission.message,
        }
    }
}

/// Template for the submitter, `templates/email/acknowledgement.html`.
#[derive(Template)]
#[template(path = "email/acknowledgement.html", escape = "email")]
pub struct AcknowledgementTemplate<'a> {
    pub name: &'a str,
    pub service_label: &'static str,
    pub message: &'a str,
}

impl<'a> AcknowledgementTemplate<'a> {
    pub fn from_submission(submission: &'a ValidatedSubmission) -> Self {
        Self {
            name: &submission.name,
            service_label: service_label(submission.service.as_str()),
            message: &submission.message,
        }
    }
}

fn render(template: &impl Template) -> Result<String, NotifyError> {
    template
        .render()
        .map_err(|e| NotifyError::Render(e.to_string()))
}

/// Message to the operator mailbox `to`. `reply_to` is the submitter, so the
/// operator can answer directly.
///
/// # Errors
///
/// Returns [`NotifyError::Render`] if the template fails to render.
pub fn operator_notification(
    submission: &ValidatedSubmission,
    from: &str,
    to: &str,
) -> Result<OutgoingEmail, NotifyError> {
    let template = OperatorTemplate::from_submission(submission);

    Ok(OutgoingEmail {
        from: from.to_string(),
        to: vec![to.to_string()],
        subject: format!("New Contact Form: {}", template.service_label),
        html: render(&template)?,
        reply_to: Some(submission.email.clone()),
    })
}

/// Acknowledgement sent back to the person who filled in the form.
///
/// # Errors
///
/// Returns [`NotifyError::Render`] if the template fails to render.
pub fn submitter_acknowledgement(
    submission: &ValidatedSubmission,
    from: &str,
) -> Result<OutgoingEmail, NotifyError> {
    let template = AcknowledgementTemplate::from_submission(submission);

    Ok(OutgoingEmail {
        from: from.to_string(),
        to: vec![submission.email.clone()],
        subject: "We received your message".to_string(),
        html: render(&template)?,
        reply_to: None,
    })
}
