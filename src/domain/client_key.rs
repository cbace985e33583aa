//! Rate-limit bucket identifier.

use std::fmt;

/// Identifier used to bucket rate-limit counters.
///
/// Derived from proxy headers, so it is a hint rather than a verified
/// identity. When no header is present the key is [`ClientKey::UNKNOWN`],
/// which every limiter lets through.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientKey(String);

impl ClientKey {
    pub const UNKNOWN: &'static str = "unknown";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
