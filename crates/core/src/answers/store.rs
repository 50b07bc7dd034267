//! Durable storage for the set of unanswered indices.
//!
//! The on-disk format is a JSON array of non-negative integers, rewritten
//! wholesale on every save. Readers accept any order and duplicates.

use std::path::{Path, PathBuf};

use crate::Error;

/// Storage backend for answer state.
pub trait AnswerStore: Send + Sync {
    /// Read the persisted indices. Order and uniqueness are not guaranteed.
    fn load(&self) -> Result<Vec<usize>, Error>;

    /// Overwrite the persisted indices.
    fn save(&self, indices: &[usize]) -> Result<(), Error>;
}

/// A single JSON file holding the wrong set.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AnswerStore for JsonFileStore {
    fn load(&self) -> Result<Vec<usize>, Error> {
        let bytes = std::fs::read(&self.path)
            .map_err(|e| Error::Persistence(format!("failed to read {}: {}", self.path.display(), e)))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| Error::Persistence(format!("failed to parse {}: {}", self.path.display(), e)))
    }

    fn save(&self, indices: &[usize]) -> Result<(), Error> {
        let bytes = serde_json::to_vec(indices).map_err(|e| Error::Persistence(e.to_string()))?;

        std::fs::write(&self.path, bytes)
            .map_err(|e| Error::Persistence(format!("failed to write {}: {}", self.path.display(), e)))?;

        tracing::debug!(count = indices.len(), path = %self.path.display(), "saved answer state");
        Ok(())
    }
}
