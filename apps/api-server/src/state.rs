//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::PostRepository;
use quill_infra::InMemoryPostRepository;
use quill_infra::database::DatabaseConfig;

/// Shared application state.
///
/// The repository is constructed once at startup and injected here, rather
/// than reached through a process-wide singleton, so handlers can be tested
/// against an in-memory store.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    /// Build the application state with the appropriate repository.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let posts: Arc<dyn PostRepository> = {
            if let Some(config) = db_config {
                match quill_infra::database::connect(config).await {
                    Ok(conn) => match quill_infra::database::ensure_tables(&conn).await {
                        Ok(()) => Arc::new(quill_infra::PostgresPostRepository::new(conn)),
                        Err(e) => {
                            tracing::error!(
                                "Failed to ensure schema: {}. Using in-memory fallback.",
                                e
                            );
                            Arc::new(InMemoryPostRepository::new())
                        }
                    },
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        Arc::new(InMemoryPostRepository::new())
                    }
                }
            } else {
                tracing::warn!("No database configured. Running in in-memory mode.");
                Arc::new(InMemoryPostRepository::new())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let posts: Arc<dyn PostRepository> = {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory repository");
            Arc::new(InMemoryPostRepository::new())
        };

        tracing::info!("Application state initialized");

        Self { posts }
    }

    /// State over an explicit repository - used by tests.
    #[cfg(test)]
    pub fn with_repository(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }
}
