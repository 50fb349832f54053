//! # Catalog Sources
//!
//! Where a service gets its catalog from. The bundled fixture never fails
//! to load once parsed; a file-backed source re-reads its file on every
//! load so operators can edit the collection without a restart, and any
//! read or parse failure is reported to the caller.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::error::TriviaError;

/// A provider of the read-only trivia catalog.
pub trait TriviaSource: Send + Sync + std::fmt::Debug {
    /// Return the current catalog.
    fn load(&self) -> Result<Arc<Catalog>, TriviaError>;
}

/// An in-memory catalog, loaded once.
#[derive(Debug, Clone)]
pub struct StaticSource {
    catalog: Arc<Catalog>,
}

impl StaticSource {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// The catalog compiled into the binary.
    pub fn bundled() -> Result<Self, TriviaError> {
        Catalog::bundled().map(Self::new)
    }
}

impl TriviaSource for StaticSource {
    fn load(&self) -> Result<Arc<Catalog>, TriviaError> {
        Ok(Arc::clone(&self.catalog))
    }
}

/// A catalog document on disk, re-read on every load.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TriviaSource for FileSource {
    fn load(&self) -> Result<Arc<Catalog>, TriviaError> {
        Catalog::from_path(&self.path).map(Arc::new)
    }
}
