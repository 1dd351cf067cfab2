//! # Quill Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();
    config.warn_insecure_defaults();

    tracing::info!("Starting Quill server on {}:{}", config.host, config.port);

    let state = AppState::new(&config).await?;

    #[cfg(feature = "rate-limit")]
    let limiter = editor_rate_limiter(&config);

    HttpServer::new(move || {
        let app = App::new();

        #[cfg(feature = "rate-limit")]
        let app = app.wrap(middleware::rate_limit::RateLimitMiddleware::new(
            limiter.clone(),
        ));

        app.wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}

/// Build the editor rate limiter and start its periodic cleanup.
#[cfg(feature = "rate-limit")]
fn editor_rate_limiter(config: &AppConfig) -> std::sync::Arc<dyn quill_core::ports::RateLimiter> {
    use std::sync::Arc;
    use std::time::Duration;

    use quill_infra::rate_limit::{InMemoryRateLimiter, RateLimitConfig};

    let limiter = Arc::new(InMemoryRateLimiter::new(RateLimitConfig {
        max_requests: config.throttle.max_requests,
        window: config.throttle.window,
    }));

    tracing::info!(
        max_requests = config.throttle.max_requests,
        window_secs = config.throttle.window.as_secs(),
        "Editor rate limiting enabled"
    );

    let pruned = Arc::clone(&limiter);
    actix_rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300));
        loop {
            interval.tick().await;
            pruned.prune();
        }
    });

    limiter
}
