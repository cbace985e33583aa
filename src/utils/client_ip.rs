//! Client key extraction from proxy headers.

use crate::domain::ClientKey;
use axum::http::{HeaderMap, HeaderName};

/// Headers consulted in priority order.
pub const CLIENT_IP_HEADERS: [&str; 3] = ["cf-connecting-ip", "x-forwarded-for", "x-real-ip"];

/// Derives the rate-limit key for a request.
///
/// Takes the first populated of `CF-Connecting-IP`, `X-Forwarded-For`
/// (first hop only) and `X-Real-IP`. Values that are empty, whitespace or not
/// valid UTF-8 count as absent. With none present the key is
/// [`ClientKey::UNKNOWN`].
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// assert_eq!(client_key_from_headers(&headers).as_str(), "203.0.113.7");
/// ```
pub fn client_key_from_headers(headers: &HeaderMap) -> ClientKey {
    CLIENT_IP_HEADERS
        .into_iter()
        .find_map(|name| header_value(headers, name))
        .map(ClientKey::new)
        .unwrap_or_else(ClientKey::unknown)
}

fn header_value(headers: &HeaderMap, name: &'static str) -> Option<String> {
    let raw = headers.get(HeaderName::from_static(name))?.to_str().ok()?;
    let first = raw.split(',').next()?.trim();

    if first.is_empty() {
        None
    } else {
        Some(first.to_string())
    }
}
