//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::PostService;
use quill_core::ports::{AccessGate, PostRepository};
use quill_infra::auth::SharedSecretGate;
use quill_infra::database::InMemoryPostRepository;

#[cfg(feature = "database")]
use anyhow::Context;
#[cfg(feature = "database")]
use migration::{Migrator, MigratorTrait};
#[cfg(feature = "database")]
use quill_infra::database::{DbConn, SqlPostRepository};

use crate::config::AppConfig;

/// Which store backs the post service.
#[derive(Clone)]
pub enum StoreHandle {
    InMemory,
    #[cfg(feature = "database")]
    Sql(DbConn),
}

impl StoreHandle {
    pub fn kind(&self) -> &'static str {
        match self {
            StoreHandle::InMemory => "in-memory",
            #[cfg(feature = "database")]
            StoreHandle::Sql(_) => "sql",
        }
    }

    /// Whether the store is currently reachable.
    pub async fn is_healthy(&self) -> bool {
        match self {
            StoreHandle::InMemory => true,
            #[cfg(feature = "database")]
            StoreHandle::Sql(conn) => match conn.ping().await {
                Ok(()) => true,
                Err(e) => {
                    tracing::error!(error = %e, "Database ping failed");
                    false
                }
            },
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub gate: Arc<dyn AccessGate>,
    pub store: StoreHandle,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let gate: Arc<dyn AccessGate> = Arc::new(SharedSecretGate::new(config.access.clone()));

        #[cfg(feature = "database")]
        let (repo, store): (Arc<dyn PostRepository>, StoreHandle) = match &config.database {
            Some(db_config) => {
                let conn = quill_infra::database::connect(db_config)
                    .await
                    .context("failed to connect to database")?;

                if db_config.auto_migrate {
                    Migrator::up(&conn, None)
                        .await
                        .context("failed to apply migrations")?;
                    tracing::info!("Database migrations applied");
                }

                (
                    Arc::new(SqlPostRepository::new(conn.clone())),
                    StoreHandle::Sql(conn),
                )
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Posts are kept in memory only.");
                (Arc::new(InMemoryPostRepository::new()), StoreHandle::InMemory)
            }
        };

        #[cfg(not(feature = "database"))]
        let (repo, store): (Arc<dyn PostRepository>, StoreHandle) = {
            if config.database.is_some() {
                tracing::warn!("Built without database feature - ignoring DATABASE_URL");
            }
            tracing::info!("Running with in-memory post repository");
            (Arc::new(InMemoryPostRepository::new()), StoreHandle::InMemory)
        };

        tracing::info!(store = store.kind(), "Application state initialized");

        Ok(Self::from_parts(repo, gate, store))
    }

    /// State over an in-memory store.
    #[cfg(test)]
    pub fn in_memory(access: quill_infra::auth::AccessConfig) -> Self {
        Self::from_parts(
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(SharedSecretGate::new(access)),
            StoreHandle::InMemory,
        )
    }

    fn from_parts(
        repo: Arc<dyn PostRepository>,
        gate: Arc<dyn AccessGate>,
        store: StoreHandle,
    ) -> Self {
        Self {
            posts: PostService::new(repo),
            gate,
            store,
        }
    }
}
