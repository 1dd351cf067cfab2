#[cfg(feature = "database")]
use std::time::Duration;

#[cfg(feature = "database")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the post database.
///
/// The URL scheme selects the backend: `postgres://` or `sqlite://`.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Apply pending migrations at startup.
    pub auto_migrate: bool,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            auto_migrate: true,
        }
    }

    /// Backend name for logging, without credentials.
    pub fn backend(&self) -> &'static str {
        if self.url.starts_with("sqlite:") {
            "sqlite"
        } else if self.url.starts_with("postgres:") || self.url.starts_with("postgresql:") {
            "postgres"
        } else {
            "unknown"
        }
    }
}

/// Open the connection pool described by `config`.
#[cfg(feature = "database")]
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    tracing::info!(backend = config.backend(), "Connecting to database...");

    let opts = ConnectOptions::new(&config.url)
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .to_owned();

    let conn = Database::connect(opts).await?;
    tracing::info!(
        backend = config.backend(),
        "Database connected (pool: {})",
        config.max_connections
    );

    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_url() {
        assert_eq!(DatabaseConfig::new("sqlite://blog.sqlite3?mode=rwc").backend(), "sqlite");
        assert_eq!(DatabaseConfig::new("postgres://u:p@localhost/blog").backend(), "postgres");
        assert_eq!(DatabaseConfig::new("mysql://localhost").backend(), "unknown");
    }
}
