//! The poem source catalog.
//!
//! A flat text resource of URLs, one per line. Lines are trimmed and blank
//! lines skipped; an entry's index is its position among the kept lines.

use std::path::Path;

use crate::Error;

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoemEntry {
    pub index: usize,
    pub source_url: String,
}

/// Ordered, index-addressable list of poem URLs. Loaded once per process.
#[derive(Debug, Clone)]
pub struct SourceCatalog {
    entries: Vec<PoemEntry>,
}

impl SourceCatalog {
    /// Load the catalog from a file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Catalog` if the file cannot be read or holds no URLs.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Catalog(format!("failed to read {}: {}", path.display(), e)))?;

        let catalog = Self::parse(&contents)?;
        tracing::info!(entries = catalog.len(), path = %path.display(), "loaded catalog");
        Ok(catalog)
    }

    /// Build a catalog from the text of a catalog file.
    pub fn parse(contents: &str) -> Result<Self, Error> {
        let entries: Vec<PoemEntry> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(index, url)| PoemEntry { index, source_url: url.to_string() })
            .collect();

        if entries.is_empty() {
            return Err(Error::Catalog("catalog has no entries".into()));
        }

        Ok(Self { entries })
    }

    pub fn get(&self, index: usize) -> Option<&PoemEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PoemEntry] {
        &self.entries
    }
}
