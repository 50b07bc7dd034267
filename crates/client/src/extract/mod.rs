//! Poem extraction from known source sites.
//!
//! ### Pipeline
//! 1. Parse the raw markup into a [`Page`] (`PARSE_FAILED` on empty input).
//! 2. Resolve the host from the URL (`INVALID_URL`).
//! 3. Dispatch the host in the [`AdapterRegistry`] (`UNKNOWN_SOURCE`).
//! 4. Run the rule's title, author and body locators (`EXTRACT_FAILED`).
//! 5. Render the body HTML to text unless the rule produced text directly
//!    (`RENDER_FAILED`).
//!
//! Extraction is pure and holds no shared mutable state, so independent
//! requests may run it concurrently.

pub mod dom;
pub mod registry;
pub mod rules;
pub mod sources;

pub use dom::{DomError, Fragment, FragmentQuery, Page};
pub use registry::AdapterRegistry;
pub use rules::{ExtractionRule, MarkerRule, PoemParts, RuleError, SelectorRule};

use serde::Serialize;
use stanza_core::Error;

use crate::fetch::source_host;
use crate::render::{Html2TextRenderer, TextRenderer};

/// A poem as extracted from its source page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoemContent {
    /// May be empty.
    pub title: String,
    /// May be empty; many sources do not publish one separately.
    pub author: String,
    /// Markup of the poem body, kept for the full-poem reveal.
    pub body_html: String,
    /// Plain-text rendering of the body, used for excerpts.
    pub body_text: String,
}

/// Turns fetched pages into [`PoemContent`].
pub struct ContentExtractor {
    registry: AdapterRegistry,
    renderer: Box<dyn TextRenderer>,
}

impl ContentExtractor {
    pub fn new(registry: AdapterRegistry, renderer: impl TextRenderer + 'static) -> Self {
        Self { registry, renderer: Box::new(renderer) }
    }

    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// Extract the poem on the page at `url` from its raw markup.
    pub fn extract(&self, url: &str, raw: &[u8]) -> Result<PoemContent, Error> {
        let page = Page::parse(raw)?;
        let host = source_host(url)?;
        let rule = self.registry.dispatch(&host)?;

        let parts = rule.extract(&page).map_err(|e| e.with_host(&host))?;

        let body_text = match parts.body_text {
            Some(text) => text,
            None => self.renderer.render(&parts.body_html)?,
        };

        tracing::debug!(%host, title = %parts.title, lines = body_text.lines().count(), "extracted poem");

        Ok(PoemContent { title: parts.title, author: parts.author, body_html: parts.body_html, body_text })
    }
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new(AdapterRegistry::default(), Html2TextRenderer)
    }
}
