//! Minimal document-tree interface used by extraction rules.
//!
//! Rules only ever ask for text at a position or for a serialized fragment
//! with some descendants stripped, so that is all this exposes. Everything
//! scraper-specific stays in this file.

use scraper::{ElementRef, Html, Selector};
use stanza_core::Error;

/// Errors raised while querying a parsed page.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomError {
    #[error("invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("matched node for {0:?} vanished while stripping")]
    Detached(String),
}

fn selector(css: &str) -> Result<Selector, DomError> {
    Selector::parse(css).map_err(|e| DomError::InvalidSelector { selector: css.to_string(), reason: e.to_string() })
}

/// Which fragment of the page to serialize, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentQuery {
    /// CSS selector for the fragment root.
    pub selector: String,
    /// Zero-based position among all matches, in document order.
    pub nth: usize,
    /// Selector list of descendants removed before serializing.
    pub strip: Option<String>,
    /// Wrap every `dt` and `dd` in its own `div` so each renders on its own line.
    pub wrap_definitions: bool,
}

impl FragmentQuery {
    pub fn new(selector: impl Into<String>) -> Self {
        Self { selector: selector.into(), nth: 0, strip: None, wrap_definitions: false }
    }
}

/// A serialized piece of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub outer_html: String,
    pub inner_html: String,
    pub text: String,
}

/// A parsed document plus the markup it came from.
pub struct Page {
    html: Html,
    raw: String,
}

impl Page {
    /// Parse raw page bytes. Invalid UTF-8 is replaced rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns `Error::ParseFailed` when there is no markup at all.
    pub fn parse(raw: &[u8]) -> Result<Self, Error> {
        let raw = String::from_utf8_lossy(raw).into_owned();
        if raw.trim().is_empty() {
            return Err(Error::ParseFailed("empty document".into()));
        }

        let html = Html::parse_document(&raw);
        Ok(Self { html, raw })
    }

    /// The markup exactly as received.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Text of the document `<title>`, trimmed. Empty when there is none.
    pub fn title(&self) -> String {
        self.nth_text("title", 0).ok().flatten().unwrap_or_default()
    }

    /// Trimmed text of the `n`th element matching `css`.
    pub fn nth_text(&self, css: &str, n: usize) -> Result<Option<String>, DomError> {
        let sel = selector(css)?;
        Ok(self
            .html
            .select(&sel)
            .nth(n)
            .map(|el| el.text().collect::<String>().trim().to_string()))
    }

    /// Serialize the fragment described by `query`, or `None` if nothing matches.
    pub fn fragment(&self, query: &FragmentQuery) -> Result<Option<Fragment>, DomError> {
        let target = selector(&query.selector)?;
        let Some(root) = self.html.select(&target).nth(query.nth).map(|el| el.id()) else {
            return Ok(None);
        };

        let mut html = self.html.clone();

        if let Some(strip) = &query.strip {
            let strip = selector(strip)?;
            let doomed: Vec<_> = html
                .tree
                .get(root)
                .and_then(ElementRef::wrap)
                .map(|el| el.select(&strip).map(|child| child.id()).collect::<Vec<_>>())
                .unwrap_or_default();

            for id in doomed {
                if let Some(mut node) = html.tree.get_mut(id) {
                    node.detach();
                }
            }
        }

        let el = html
            .tree
            .get(root)
            .and_then(ElementRef::wrap)
            .ok_or_else(|| DomError::Detached(query.selector.clone()))?;

        let mut outer_html = el.html();
        let mut inner_html = el.inner_html();
        if query.wrap_definitions {
            outer_html = wrap_definitions(&outer_html);
            inner_html = wrap_definitions(&inner_html);
        }

        Ok(Some(Fragment { outer_html, inner_html, text: el.text().collect() }))
    }
}

/// Serialized markup always closes `dt`/`dd`, so plain substitution is enough.
fn wrap_definitions(html: &str) -> String {
    html.replace("<dt", "<div><dt")
        .replace("</dt>", "</dt></div>")
        .replace("<dd", "<div><dd")
        .replace("</dd>", "</dd></div>")
}
