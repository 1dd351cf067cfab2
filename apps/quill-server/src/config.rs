//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use quill_infra::auth::{AccessConfig, DEFAULT_ADMIN_TOKEN};
use quill_infra::database::DatabaseConfig;

/// Request throttling settings for mutating endpoints.
#[derive(Debug, Clone)]
pub struct ThrottleConfig {
    pub max_requests: u32,
    pub window: Duration,
}

/// Application configuration.
///
/// Built once at startup and handed to the components that need it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub access: AccessConfig,
    pub throttle: ThrottleConfig,
    pub production: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str, default: bool| {
            var(key)
                .map(|v| !matches!(v.trim().to_lowercase().as_str(), "false" | "0" | "no"))
                .unwrap_or(default)
        };

        let database = var("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| DatabaseConfig {
                url,
                max_connections: parsed(&var, "DB_MAX_CONNECTIONS").unwrap_or(10),
                min_connections: parsed(&var, "DB_MIN_CONNECTIONS").unwrap_or(1),
                auto_migrate: flag("AUTO_MIGRATE", true),
            });

        Self {
            host: var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parsed(&var, "PORT").unwrap_or(8080),
            database,
            access: AccessConfig {
                admin_token: var("ADMIN_TOKEN").unwrap_or_else(|| DEFAULT_ADMIN_TOKEN.to_string()),
            },
            throttle: ThrottleConfig {
                max_requests: parsed(&var, "RATE_LIMIT_MAX_REQUESTS").unwrap_or(30),
                window: Duration::from_secs(
                    parsed(&var, "RATE_LIMIT_WINDOW_SECS").unwrap_or(60),
                ),
            },
            production: var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false),
        }
    }

    /// Log configuration problems that should not stop startup.
    pub fn warn_insecure_defaults(&self) {
        if self.access.uses_default_token() {
            if self.production {
                tracing::error!(
                    "SECURITY: Using default admin token in production! Set ADMIN_TOKEN environment variable."
                );
            } else {
                tracing::warn!("Using default admin token. Set ADMIN_TOKEN for production use.");
            }
        }
    }
}

fn parsed<T, F>(var: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    var(key).and_then(|s| s.trim().parse().ok())
}
