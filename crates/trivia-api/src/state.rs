//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. Holds the catalog source and configuration;
//! there is no other server-side state.

use std::path::PathBuf;
use std::sync::Arc;

use trivia_core::{Catalog, FileSource, StaticSource, TriviaError, TriviaSource};

use crate::error::AppError;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// JSON catalog to serve instead of the bundled one. Re-read on every
    /// request when set.
    pub catalog_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PORT` (default: 8080)
    /// - `TRIVIA_CATALOG` (optional path to a `{"items": [...]}` document)
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            catalog_path: std::env::var("TRIVIA_CATALOG")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            catalog_path: None,
        }
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub source: Arc<dyn TriviaSource>,
    pub config: AppConfig,
}

impl AppState {
    /// State serving the bundled catalog with default configuration.
    pub fn new() -> Result<Self, TriviaError> {
        Self::with_config(AppConfig::default())
    }

    /// Build state from configuration.
    ///
    /// A configured catalog file is loaded once up front so a broken file
    /// is reported at startup rather than on the first request.
    pub fn with_config(config: AppConfig) -> Result<Self, TriviaError> {
        let source: Arc<dyn TriviaSource> = match &config.catalog_path {
            Some(path) => {
                let source = FileSource::new(path);
                let catalog = source.load()?;
                tracing::info!(path = %path.display(), items = catalog.len(), "serving catalog file");
                Arc::new(source)
            }
            None => {
                let source = StaticSource::bundled()?;
                tracing::info!(items = source.load()?.len(), "serving bundled catalog");
                Arc::new(source)
            }
        };
        Ok(Self { source, config })
    }

    /// Load the catalog on the blocking pool.
    ///
    /// File-backed sources read from disk on every call, so handlers never
    /// call [`TriviaSource::load`] on an async worker directly.
    pub async fn load_catalog(&self) -> Result<Arc<Catalog>, AppError> {
        let source = Arc::clone(&self.source);
        let loaded = tokio::task::spawn_blocking(move || source.load())
            .await
            .map_err(|e| AppError::Internal(format!("catalog load task failed: {e}")))?;
        Ok(loaded?)
    }

    /// State over an arbitrary source.
    pub fn with_source(source: Arc<dyn TriviaSource>) -> Self {
        Self {
            source,
            config: AppConfig::default(),
        }
    }
}
