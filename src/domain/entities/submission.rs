//! Validated contact form submission and its enumerated fields.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Service the visitor is enquiring about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Fullstack,
    Microservices,
    Api,
    Events,
    Ai,
    Mlops,
    Consultation,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 7] = [
        ServiceKind::Fullstack,
        ServiceKind::Microservices,
        ServiceKind::Api,
        ServiceKind::Events,
        ServiceKind::Ai,
        ServiceKind::Mlops,
        ServiceKind::Consultation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Fullstack => "fullstack",
            ServiceKind::Microservices => "microservices",
            ServiceKind::Api => "api",
            ServiceKind::Events => "events",
            ServiceKind::Ai => "ai",
            ServiceKind::Mlops => "mlops",
            ServiceKind::Consultation => "consultation",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or(UnknownVariant)
    }
}

/// Rough project budget bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BudgetRange {
    #[serde(rename = "under-25k")]
    Under25k,
    #[serde(rename = "25k-50k")]
    From25kTo50k,
    #[serde(rename = "50k-100k")]
    From50kTo100k,
    #[serde(rename = "over-100k")]
    Over100k,
}

impl BudgetRange {
    pub const ALL: [BudgetRange; 4] = [
        BudgetRange::Under25k,
        BudgetRange::From25kTo50k,
        BudgetRange::From50kTo100k,
        BudgetRange::Over100k,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetRange::Under25k => "under-25k",
            BudgetRange::From25kTo50k => "25k-50k",
            BudgetRange::From50kTo100k => "50k-100k",
            BudgetRange::Over100k => "over-100k",
        }
    }
}

impl fmt::Display for BudgetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetRange {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BudgetRange::ALL
            .into_iter()
            .find(|range| range.as_str() == s)
            .ok_or(UnknownVariant)
    }
}

/// Returned when a string is not a member of a closed enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("value is not a recognised option")]
pub struct UnknownVariant;

/// A contact form submission that passed every field rule.
///
/// Strings are trimmed, `email` is lower-cased, and optional fields that were
/// blank are `None`. Construct through
/// [`ContactRequest::into_validated`](crate::api::dto::contact::ContactRequest::into_validated).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubmission {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub service: ServiceKind,
    pub budget: Option<BudgetRange>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_kind_parses_every_variant() {
        for kind in ServiceKind::ALL {
            assert_eq!(kind.as_str().parse::<ServiceKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_service_kind_rejects_unknown() {
        assert_eq!("blockchain".parse::<ServiceKind>(), Err(UnknownVariant));
        assert_eq!("API".parse::<ServiceKind>(), Err(UnknownVariant));
        assert_eq!("".parse::<ServiceKind>(), Err(UnknownVariant));
    }

    #[test]
    fn test_budget_range_parses_every_variant() {
        for range in BudgetRange::ALL {
            assert_eq!(range.as_str().parse::<BudgetRange>(), Ok(range));
        }
        assert!("100k+".parse::<BudgetRange>().is_err());
    }

    #[test]
    fn test_serialize_matches_wire_names() {
        assert_eq!(
            serde_json::to_string(&ServiceKind::Mlops).unwrap(),
            "\"mlops\""
        );
        assert_eq!(
            serde_json::to_string(&BudgetRange::From50kTo100k).unwrap(),
            "\"50k-100k\""
        );
    }
}
