//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//! Every integration is optional: without Redis the rate limiter runs in
//! process, and without an email API key notifications become no-ops.
//!
//! ## Redis (optional)
//!
//! ```bash
//! # Method 1: full URL
//! export REDIS_URL="redis://localhost:6379/0"
//!
//! # Method 2: individual components
//! export REDIS_HOST="localhost"
//! export REDIS_PORT="6379"
//! export REDIS_PASSWORD=""
//! export REDIS_DB="0"
//! ```
//!
//! ## Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `APP_ENV` - `production` or anything else; non-production also allows
//!   `http://localhost:3000` (default: `production`)
//! - `ALLOWED_ORIGINS` - Comma-separated origin allow-list override
//! - `RATE_LIMIT_MAX` - Submissions per window (default: 5)
//! - `RATE_LIMIT_WINDOW_SECONDS` - Window length (default: 60)
//! - `RESEND_API_KEY` - Email API key (notifications disabled if unset)
//! - `EMAIL_API_URL` - Email API endpoint (default: Resend)
//! - `EMAIL_FROM` - Sender address
//! - `CONTACT_EMAIL` - Operator mailbox receiving submissions
//! - `MAX_BODY_BYTES` - Request body limit (default: 2 MiB)

use crate::domain::OriginPolicy;
use crate::infrastructure::email::{DEFAULT_CONTACT_EMAIL, DEFAULT_EMAIL_API_URL, DEFAULT_EMAIL_FROM};
use crate::infrastructure::rate_limit::{DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW, RateLimitPolicy};
use crate::routes::DEFAULT_BODY_LIMIT;
use anyhow::Result;
use std::env;
use std::time::Duration;
use url::Url;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// True unless `APP_ENV` names a non-production environment.
    pub production: bool,
    /// Explicit allow-list; empty means the built-in production origins.
    pub allowed_origins: Vec<String>,
    pub redis_url: Option<String>,
    pub rate_limit_max: u32,
    pub rate_limit_window_seconds: u64,
    /// Loaded from `RESEND_API_KEY`. Never logged.
    pub email_api_key: Option<String>,
    pub email_api_url: String,
    pub email_from: String,
    pub contact_email: String,
    pub max_body_bytes: usize,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Currently infallible; kept fallible so required variables can be
    /// added without changing callers.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let production = env::var("APP_ENV")
            .map(|v| v.trim().eq_ignore_ascii_case("production"))
            .unwrap_or(true);

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|v| parse_origin_list(&v))
            .unwrap_or_default();

        let redis_url = Self::load_redis_url();

        let rate_limit_max = env::var("RATE_LIMIT_MAX")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_REQUESTS);

        let rate_limit_window_seconds = env::var("RATE_LIMIT_WINDOW_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_WINDOW.as_secs());

        let email_api_key = env::var("RESEND_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let email_api_url =
            env::var("EMAIL_API_URL").unwrap_or_else(|_| DEFAULT_EMAIL_API_URL.to_string());
        let email_from = env::var("EMAIL_FROM").unwrap_or_else(|_| DEFAULT_EMAIL_FROM.to_string());
        let contact_email =
            env::var("CONTACT_EMAIL").unwrap_or_else(|_| DEFAULT_CONTACT_EMAIL.to_string());

        let max_body_bytes = env::var("MAX_BODY_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_BODY_LIMIT);

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            production,
            allowed_origins,
            redis_url,
            rate_limit_max,
            rate_limit_window_seconds,
            email_api_key,
            email_api_url,
            email_from,
            contact_email,
            max_body_bytes,
        })
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    ///
    /// Returns `None` if Redis is not configured.
    fn load_redis_url() -> Option<String> {
        if let Ok(url) = env::var("REDIS_URL") {
            return Some(url);
        }

        let host = env::var("REDIS_HOST").ok()?;
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let password = env::var("REDIS_PASSWORD").ok();
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        let url = match password {
            // Empty password means no authentication
            Some(pwd) if !pwd.is_empty() => format!("redis://:{}@{}:{}/{}", pwd, host, port, db),
            _ => format!("redis://{}:{}/{}", host, port, db),
        };

        Some(url)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - an allowed origin is not a bare `http(s)://host[:port]` origin
    /// - the Redis or email API URL has the wrong scheme
    /// - rate limit, window or body limit is zero
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        for origin in &self.allowed_origins {
            validate_origin(origin)?;
        }

        if let Some(ref redis_url) = self.redis_url
            && !redis_url.starts_with("redis://")
            && !redis_url.starts_with("rediss://")
        {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                mask_connection_string(redis_url)
            );
        }

        if self.rate_limit_max == 0 {
            anyhow::bail!("RATE_LIMIT_MAX must be at least 1");
        }

        if self.rate_limit_window_seconds == 0 {
            anyhow::bail!("RATE_LIMIT_WINDOW_SECONDS must be greater than 0");
        }

        match Url::parse(&self.email_api_url) {
            Ok(url) if url.scheme() == "https" || url.scheme() == "http" => {}
            _ => anyhow::bail!(
                "EMAIL_API_URL must be an http(s) URL, got '{}'",
                self.email_api_url
            ),
        }

        if !self.contact_email.contains('@') {
            anyhow::bail!(
                "CONTACT_EMAIL must be an email address, got '{}'",
                self.contact_email
            );
        }

        if self.max_body_bytes == 0 {
            anyhow::bail!("MAX_BODY_BYTES must be greater than 0");
        }

        Ok(())
    }

    /// Returns whether the distributed rate limiter is configured.
    pub fn is_redis_enabled(&self) -> bool {
        self.redis_url.is_some()
    }

    /// Returns whether outbound email is configured.
    pub fn is_email_enabled(&self) -> bool {
        self.email_api_key.is_some()
    }

    pub fn rate_limit_policy(&self) -> RateLimitPolicy {
        RateLimitPolicy {
            max_requests: self.rate_limit_max,
            window: Duration::from_secs(self.rate_limit_window_seconds),
        }
    }

    pub fn origin_policy(&self) -> OriginPolicy {
        OriginPolicy::new(&self.allowed_origins, self.production)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!(
            "  Environment: {}",
            if self.production { "production" } else { "development" }
        );
        tracing::info!(
            "  Allowed origins: {}",
            self.origin_policy().allowed_origins().join(", ")
        );

        if let Some(ref redis_url) = self.redis_url {
            tracing::info!("  Rate limiter: redis {}", mask_connection_string(redis_url));
        } else {
            tracing::info!("  Rate limiter: local");
        }
        tracing::info!(
            "  Rate limit: {} per {}s",
            self.rate_limit_max,
            self.rate_limit_window_seconds
        );

        if self.is_email_enabled() {
            tracing::info!("  Email: enabled via {}", self.email_api_url);
            tracing::info!("  Notifications to: {}", self.contact_email);
        } else {
            tracing::info!("  Email: disabled (no RESEND_API_KEY)");
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Splits a comma-separated origin list, dropping blanks.
fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Checks that `origin` is exactly what a browser sends in `Origin`:
/// scheme and host, optional port, nothing else.
fn validate_origin(origin: &str) -> Result<()> {
    let url = Url::parse(origin)
        .map_err(|e| anyhow::anyhow!("ALLOWED_ORIGINS entry '{}' is not a URL: {}", origin, e))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("ALLOWED_ORIGINS entry '{}' must use http or https", origin);
    }

    if url.origin().ascii_serialization() != origin {
        anyhow::bail!(
            "ALLOWED_ORIGINS entry '{}' must be a bare origin like '{}'",
            origin,
            url.origin().ascii_serialization()
        );
    }

    Ok(())
}

/// Masks sensitive information in connection strings for logging.
///
/// Replaces password with `***` in URLs like:
/// - `redis://:password@host:port/db` → `redis://:***@host:port/db`
fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if variables are malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn test_config() -> Config {
        Config {
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            production: true,
            allowed_origins: Vec::new(),
            redis_url: None,
            rate_limit_max: 5,
            rate_limit_window_seconds: 60,
            email_api_key: None,
            email_api_url: DEFAULT_EMAIL_API_URL.to_string(),
            email_from: DEFAULT_EMAIL_FROM.to_string(),
            contact_email: DEFAULT_CONTACT_EMAIL.to_string(),
            max_body_bytes: DEFAULT_BODY_LIMIT,
        }
    }

    #[test]
    fn test_mask_connection_string() {
        assert_eq!(
            mask_connection_string("redis://:password@localhost:6379/0"),
            "redis://:***@localhost:6379/0"
        );

        assert_eq!(
            mask_connection_string("redis://localhost:6379/0"),
            "redis://localhost:6379/0"
        );
    }

    #[test]
    fn test_config_validation() {
        let mut config = test_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());
        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());
        config.listen_addr = "0.0.0.0:3000".to_string();

        config.redis_url = Some("http://localhost:6379".to_string());
        assert!(config.validate().is_err());
        config.redis_url = Some("rediss://localhost:6379".to_string());
        assert!(config.validate().is_ok());

        config.rate_limit_max = 0;
        assert!(config.validate().is_err());
        config.rate_limit_max = 5;

        config.rate_limit_window_seconds = 0;
        assert!(config.validate().is_err());
        config.rate_limit_window_seconds = 60;

        config.email_api_url = "ftp://mail.example".to_string();
        assert!(config.validate().is_err());
        config.email_api_url = DEFAULT_EMAIL_API_URL.to_string();

        config.contact_email = "nobody".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_origin_validation() {
        assert!(validate_origin("https://example.com").is_ok());
        assert!(validate_origin("http://localhost:3000").is_ok());
        assert!(validate_origin("https://example.com/").is_err());
        assert!(validate_origin("https://example.com/contact").is_err());
        assert!(validate_origin("ftp://example.com").is_err());
        assert!(validate_origin("example.com").is_err());
    }

    #[test]
    fn test_parse_origin_list() {
        assert_eq!(
            parse_origin_list(" https://a.example , ,https://b.example,"),
            vec!["https://a.example", "https://b.example"]
        );
        assert!(parse_origin_list("").is_empty());
    }

    #[test]
    fn test_origin_policy_from_config() {
        let mut config = test_config();
        config.production = false;
        config.allowed_origins = vec!["https://a.example".to_string()];

        let policy = config.origin_policy();
        assert!(policy.is_allowed(Some("https://a.example")));
        assert!(policy.is_allowed(Some("http://localhost:3000")));
    }

    #[test]
    #[serial]
    fn test_load_redis_url_from_components() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("REDIS_HOST", "redis-host");
            env::set_var("REDIS_PORT", "6380");
            env::set_var("REDIS_DB", "1");
        }

        let url = Config::load_redis_url().unwrap();
        assert_eq!(url, "redis://redis-host:6380/1");

        unsafe {
            env::set_var("REDIS_PASSWORD", "secret");
        }
        let url = Config::load_redis_url().unwrap();
        assert_eq!(url, "redis://:secret@redis-host:6380/1");

        // Empty password should be treated as no password
        unsafe {
            env::set_var("REDIS_PASSWORD", "");
        }
        let url = Config::load_redis_url().unwrap();
        assert_eq!(url, "redis://redis-host:6380/1");

        unsafe {
            env::remove_var("REDIS_HOST");
            env::remove_var("REDIS_PORT");
            env::remove_var("REDIS_DB");
            env::remove_var("REDIS_PASSWORD");
        }
    }

    #[test]
    #[serial]
    fn test_redis_url_priority() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("REDIS_URL", "redis://from-url:6379/0");
            env::set_var("REDIS_HOST", "from-components");
        }

        let url = Config::load_redis_url().unwrap();

        assert!(url.contains("from-url"));
        assert!(!url.contains("from-components"));

        unsafe {
            env::remove_var("REDIS_URL");
            env::remove_var("REDIS_HOST");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults_and_overrides() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("APP_ENV", "development");
            env::set_var("ALLOWED_ORIGINS", "https://a.example,https://b.example");
            env::set_var("RATE_LIMIT_MAX", "10");
            env::set_var("RESEND_API_KEY", "   ");
        }

        let config = Config::from_env().unwrap();
        assert!(!config.production);
        assert_eq!(config.allowed_origins.len(), 2);
        assert_eq!(config.rate_limit_max, 10);
        assert_eq!(config.rate_limit_window_seconds, 60);
        assert!(!config.is_email_enabled());

        unsafe {
            env::remove_var("APP_ENV");
            env::remove_var("ALLOWED_ORIGINS");
            env::remove_var("RATE_LIMIT_MAX");
            env::remove_var("RESEND_API_KEY");
        }

        let config = Config::from_env().unwrap();
        assert!(config.production);
        assert!(config.allowed_origins.is_empty());
    }
}
