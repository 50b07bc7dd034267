//! Unified error types for stanza.
//!
//! Every error is scoped to a single request except catalog failures at
//! startup. The upper-case prefix in each message doubles as a stable code.

use std::fmt;

/// The locator within an extraction rule that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractStage {
    Title,
    Author,
    Body,
    Markers,
}

impl fmt::Display for ExtractStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExtractStage::Title => "title",
            ExtractStage::Author => "author",
            ExtractStage::Body => "body",
            ExtractStage::Markers => "markers",
        };
        f.write_str(name)
    }
}

/// Unified error types for the quiz.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., an index outside the catalog).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Malformed catalog entry.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Network or transport failure.
    #[error("FETCH_FAILED: {0}")]
    FetchFailed(String),

    /// Fetch timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Fetch response too large.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// HTTP error response.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Markup could not be turned into a traversable document.
    #[error("PARSE_FAILED: {0}")]
    ParseFailed(String),

    /// No extraction rule is registered for the host.
    #[error("UNKNOWN_SOURCE: no extraction rule for host {0:?}")]
    UnknownSource(String),

    /// A rule's assumption about its source's markup no longer holds.
    #[error("EXTRACT_FAILED: {host} ({stage}): {cause}")]
    ExtractFailed { host: String, stage: ExtractStage, cause: String },

    /// HTML to plain-text rendering failed.
    #[error("RENDER_FAILED: {0}")]
    RenderFailed(String),

    /// Answer state could not be written. The in-memory change has already happened.
    #[error("PERSISTENCE_FAILED: {0}")]
    Persistence(String),

    /// The catalog could not be loaded.
    #[error("CATALOG_ERROR: {0}")]
    Catalog(String),
}

impl Error {
    /// True for failures talking to the remote site.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::FetchFailed(_) | Error::FetchTimeout(_) | Error::FetchTooLarge(_) | Error::HttpError(_)
        )
    }
}
