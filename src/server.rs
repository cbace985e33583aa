//! HTTP server initialization and runtime setup.
//!
//! Handles rate limiter selection, email transport setup, and Axum server lifecycle.

use crate::application::services::ContactService;
use crate::config::Config;
use crate::infrastructure::email::{EmailTransport, Notifier, ResendTransport};
use crate::infrastructure::rate_limit::{LocalRateLimiter, RateLimiter, RedisRateLimiter};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Builds the application state from configuration.
///
/// Falls back to the in-process limiter when Redis is not configured or
/// cannot be reached at startup.
pub async fn build_state(config: &Config) -> AppState {
    let policy = config.rate_limit_policy();

    let rate_limiter: Arc<dyn RateLimiter> = if let Some(redis_url) = &config.redis_url {
        match RedisRateLimiter::connect(redis_url, policy).await {
            Ok(redis) => {
                tracing::info!("Rate limiter enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to connect to Redis: {}. Using in-process rate limiter.",
                    e
                );
                Arc::new(LocalRateLimiter::new(policy))
            }
        }
    } else {
        tracing::info!("Rate limiter: in-process");
        Arc::new(LocalRateLimiter::new(policy))
    };

    let transport: Option<Arc<dyn EmailTransport>> = match &config.email_api_key {
        Some(key) => {
            tracing::info!("Email notifications enabled");
            Some(Arc::new(ResendTransport::new(
                key.clone(),
                config.email_api_url.clone(),
            )))
        }
        None => {
            tracing::warn!("RESEND_API_KEY not set, email notifications disabled");
            None
        }
    };

    let notifier = Arc::new(Notifier::new(
        transport,
        config.email_from.clone(),
        config.contact_email.clone(),
    ));

    let contact_service = Arc::new(ContactService::new(rate_limiter, notifier));

    AppState::new(Arc::new(config.origin_policy()), contact_service)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Redis rate limiter (or in-process fallback)
/// - Email transport (or disabled notifier)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Listen address is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await;

    let app = app_router(state, config.max_body_bytes);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown signal received");
}
