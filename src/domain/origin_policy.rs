//! CORS origin allow-list.

use axum::http::{HeaderMap, HeaderValue, header};

/// Production origins used when no explicit list is configured.
pub const DEFAULT_ORIGINS: [&str; 2] = [
    "https://shibasoftwareconsulting.com",
    "https://www.shibasoftwareconsulting.com",
];

/// Origin of the local development server, allowed outside production.
pub const DEV_ORIGIN: &str = "http://localhost:3000";

pub const ALLOW_METHODS: &str = "POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";
pub const PREFLIGHT_MAX_AGE_SECS: u32 = 86_400;

/// Outcome of checking a request's declared origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginDecision {
    pub allowed: bool,
    /// Value for `Access-Control-Allow-Origin`; `None` only with an empty allow-list.
    pub response_origin: Option<String>,
}

/// Static allow-list of browser origins permitted to post the contact form.
///
/// Matching is literal: no wildcards and no subdomain expansion.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    allowed: Vec<String>,
}

impl OriginPolicy {
    /// Builds the allow-list.
    ///
    /// `configured` replaces [`DEFAULT_ORIGINS`] when non-empty. The
    /// development origin is appended unless `production` is set. Duplicates
    /// are dropped, first occurrence wins.
    pub fn new(configured: &[String], production: bool) -> Self {
        let mut candidates: Vec<String> = if configured.is_empty() {
            DEFAULT_ORIGINS.iter().map(|s| s.to_string()).collect()
        } else {
            configured.to_vec()
        };

        if !production {
            candidates.push(DEV_ORIGIN.to_string());
        }

        let mut allowed = Vec::with_capacity(candidates.len());
        for origin in candidates {
            if !allowed.contains(&origin) {
                allowed.push(origin);
            }
        }

        Self { allowed }
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed
    }

    pub fn is_allowed(&self, origin: Option<&str>) -> bool {
        match origin {
            Some(origin) => self.allowed.iter().any(|o| o == origin),
            None => false,
        }
    }

    /// Origin to echo back: the request's own if allowed, else the first entry.
    pub fn resolve_response_origin(&self, origin: Option<&str>) -> Option<String> {
        match origin {
            Some(origin) if self.is_allowed(Some(origin)) => Some(origin.to_string()),
            _ => self.allowed.first().cloned(),
        }
    }

    pub fn decide(&self, origin: Option<&str>) -> OriginDecision {
        OriginDecision {
            allowed: self.is_allowed(origin),
            response_origin: self.resolve_response_origin(origin),
        }
    }

    /// CORS headers attached to every contact endpoint response.
    pub fn cors_headers(&self, origin: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Some(value) = self
            .resolve_response_origin(origin)
            .and_then(|o| HeaderValue::from_str(&o).ok())
        {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        }

        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        );
        headers.insert(header::VARY, HeaderValue::from_static("Origin"));

        headers
    }

    /// [`cors_headers`](Self::cors_headers) plus the preflight cache duration.
    pub fn preflight_headers(&self, origin: Option<&str>) -> HeaderMap {
        let mut headers = self.cors_headers(origin);
        headers.insert(
            header::ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from(PREFLIGHT_MAX_AGE_SECS),
        );
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn production() -> OriginPolicy {
        OriginPolicy::new(&[], true)
    }

    #[test]
    fn test_defaults_in_production() {
        let policy = production();
        assert_eq!(policy.allowed_origins(), &DEFAULT_ORIGINS.map(String::from));
        assert!(!policy.is_allowed(Some(DEV_ORIGIN)));
    }

    #[test]
    fn test_dev_origin_outside_production() {
        let policy = OriginPolicy::new(&[], false);
        assert!(policy.is_allowed(Some(DEV_ORIGIN)));
        assert_eq!(policy.allowed_origins().len(), 3);
    }

    #[test]
    fn test_configured_origins_replace_defaults() {
        let configured = vec!["https://example.org".to_string()];
        let policy = OriginPolicy::new(&configured, true);

        assert!(policy.is_allowed(Some("https://example.org")));
        assert!(!policy.is_allowed(Some(DEFAULT_ORIGINS[0])));
    }

    #[test]
    fn test_allow_list_is_deduplicated() {
        let configured = vec![
            "https://a.example".to_string(),
            DEV_ORIGIN.to_string(),
            "https://a.example".to_string(),
        ];
        let policy = OriginPolicy::new(&configured, false);

        assert_eq!(
            policy.allowed_origins(),
            &["https://a.example".to_string(), DEV_ORIGIN.to_string()]
        );
    }

    #[test]
    fn test_absent_origin_is_not_allowed() {
        assert!(!production().is_allowed(None));
    }

    #[test]
    fn test_matching_is_literal() {
        let policy = production();
        assert!(!policy.is_allowed(Some("https://evil.shibasoftwareconsulting.com")));
        assert!(!policy.is_allowed(Some("https://shibasoftwareconsulting.com/")));
        assert!(!policy.is_allowed(Some("http://shibasoftwareconsulting.com")));
    }

    #[test]
    fn test_resolve_echoes_allowed_origin() {
        let policy = production();
        assert_eq!(
            policy.resolve_response_origin(Some(DEFAULT_ORIGINS[1])),
            Some(DEFAULT_ORIGINS[1].to_string())
        );
    }

    #[test]
    fn test_resolve_falls_back_to_first_entry() {
        let policy = production();
        assert_eq!(
            policy.resolve_response_origin(Some("https://evil.example")),
            Some(DEFAULT_ORIGINS[0].to_string())
        );
        assert_eq!(
            policy.resolve_response_origin(None),
            Some(DEFAULT_ORIGINS[0].to_string())
        );
    }

    #[test]
    fn test_decide() {
        let decision = production().decide(Some("https://evil.example"));
        assert!(!decision.allowed);
        assert_eq!(
            decision.response_origin.as_deref(),
            Some(DEFAULT_ORIGINS[0])
        );
    }

    #[test]
    fn test_cors_headers() {
        let headers = production().cors_headers(Some(DEFAULT_ORIGINS[1]));

        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            DEFAULT_ORIGINS[1]
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], ALLOW_METHODS);
        assert_eq!(headers[header::VARY], "Origin");
        assert!(!headers.contains_key(header::ACCESS_CONTROL_MAX_AGE));
    }

    #[test]
    fn test_preflight_headers_include_max_age() {
        let headers = production().preflight_headers(Some(DEFAULT_ORIGINS[0]));
        assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "86400");
    }
}
