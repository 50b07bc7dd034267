//! Extraction rules: how one source site's markup maps onto a poem.
//!
//! Most sites are covered by a [`SelectorRule`], a declarative description of
//! where the title, author and body live. Sites that wrap the poem in literal
//! comment markers use a [`MarkerRule`] with a structural fallback.

use stanza_core::{Error, ExtractStage};

use super::dom::{DomError, FragmentQuery, Page};

/// What a rule pulls out of a page. The extractor derives missing body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoemParts {
    pub title: String,
    pub author: String,
    pub body_html: String,
    /// Plain text taken straight from the page, when the rule has it.
    pub body_text: Option<String>,
}

/// A locator failure inside a rule. The extractor attaches the host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{stage}: {cause}")]
pub struct RuleError {
    pub stage: ExtractStage,
    pub cause: String,
}

impl RuleError {
    pub fn new(stage: ExtractStage, cause: impl Into<String>) -> Self {
        Self { stage, cause: cause.into() }
    }

    fn dom(stage: ExtractStage, err: DomError) -> Self {
        Self::new(stage, err.to_string())
    }

    pub fn with_host(self, host: &str) -> Error {
        Error::ExtractFailed { host: host.to_string(), stage: self.stage, cause: self.cause }
    }
}

/// Turns one site's markup into poem parts.
pub trait ExtractionRule: Send + Sync {
    fn extract(&self, page: &Page) -> Result<PoemParts, RuleError>;
}

/// The `nth` element matching `selector`, read as trimmed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLocator {
    pub selector: String,
    pub nth: usize,
}

impl TextLocator {
    fn locate(&self, page: &Page, stage: ExtractStage) -> Result<String, RuleError> {
        page.nth_text(&self.selector, self.nth)
            .map(Option::unwrap_or_default)
            .map_err(|e| RuleError::dom(stage, e))
    }
}

/// Which serialization of the body fragment becomes `body_html`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    Inner,
    Outer,
}

/// Where body text comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyText {
    /// Render `body_html` to plain text.
    Rendered,
    /// Use the fragment's own text content.
    Direct,
}

/// Declarative selector-based rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorRule {
    title: Option<TextLocator>,
    author: Option<TextLocator>,
    body: FragmentQuery,
    markup: Markup,
    text: BodyText,
}

impl SelectorRule {
    /// Rule whose body is the outer HTML of the first match of `body_selector`.
    /// The title defaults to the document `<title>`; there is no author.
    pub fn new(body_selector: &str) -> Self {
        Self {
            title: None,
            author: None,
            body: FragmentQuery::new(body_selector),
            markup: Markup::Outer,
            text: BodyText::Rendered,
        }
    }

    /// Take the body from the `n`th match instead of the first.
    pub fn nth(mut self, n: usize) -> Self {
        self.body.nth = n;
        self
    }

    /// Remove descendants matching `selector` from the body.
    pub fn strip(mut self, selector: &str) -> Self {
        self.body.strip = Some(selector.to_string());
        self
    }

    pub fn wrap_definitions(mut self) -> Self {
        self.body.wrap_definitions = true;
        self
    }

    pub fn inner(mut self) -> Self {
        self.markup = Markup::Inner;
        self
    }

    pub fn direct_text(mut self) -> Self {
        self.text = BodyText::Direct;
        self
    }

    pub fn title(mut self, selector: &str, nth: usize) -> Self {
        self.title = Some(TextLocator { selector: selector.to_string(), nth });
        self
    }

    pub fn author(mut self, selector: &str) -> Self {
        self.author = Some(TextLocator { selector: selector.to_string(), nth: 0 });
        self
    }

    fn locate_title(&self, page: &Page) -> Result<String, RuleError> {
        match &self.title {
            Some(locator) => locator.locate(page, ExtractStage::Title),
            None => Ok(page.title()),
        }
    }

    fn locate_author(&self, page: &Page) -> Result<String, RuleError> {
        match &self.author {
            Some(locator) => locator.locate(page, ExtractStage::Author),
            None => Ok(String::new()),
        }
    }

    fn locate_body(&self, page: &Page) -> Result<(String, Option<String>), RuleError> {
        let fragment = page
            .fragment(&self.body)
            .map_err(|e| RuleError::dom(ExtractStage::Body, e))?
            .ok_or_else(|| {
                RuleError::new(
                    ExtractStage::Body,
                    format!("selector {:?} (match {}) found nothing", self.body.selector, self.body.nth),
                )
            })?;

        let html = match self.markup {
            Markup::Inner => fragment.inner_html,
            Markup::Outer => fragment.outer_html,
        };
        let text = match self.text {
            BodyText::Direct => Some(fragment.text),
            BodyText::Rendered => None,
        };
        Ok((html, text))
    }
}

impl ExtractionRule for SelectorRule {
    fn extract(&self, page: &Page) -> Result<PoemParts, RuleError> {
        let title = self.locate_title(page)?;
        let author = self.locate_author(page)?;
        let (body_html, body_text) = self.locate_body(page)?;
        Ok(PoemParts { title, author, body_html, body_text })
    }
}

/// Body delimited by two literal markers in the raw markup.
///
/// The span from the start marker up to the end marker is wrapped in a
/// `<table>`. When either marker is missing, or they appear out of order,
/// the structural fallback rule decides everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRule {
    start: String,
    end: String,
    fallback: SelectorRule,
}

impl MarkerRule {
    pub fn new(start: &str, end: &str, fallback: SelectorRule) -> Self {
        Self { start: start.to_string(), end: end.to_string(), fallback }
    }

    fn marked_span<'a>(&self, raw: &'a str) -> Option<&'a str> {
        let start = raw.find(&self.start)?;
        let end = raw.find(&self.end)?;
        (start < end).then(|| &raw[start..end])
    }
}

impl ExtractionRule for MarkerRule {
    fn extract(&self, page: &Page) -> Result<PoemParts, RuleError> {
        let Some(span) = self.marked_span(page.raw()) else {
            tracing::debug!(start = %self.start, "markers unusable, using structural fallback");
            return self.fallback.extract(page).map_err(|e| {
                RuleError::new(
                    ExtractStage::Markers,
                    format!("markers missing or out of order; fallback {} failed: {}", e.stage, e.cause),
                )
            });
        };

        Ok(PoemParts {
            title: self.fallback.locate_title(page)?,
            author: self.fallback.locate_author(page)?,
            body_html: format!("<table>{span}</table>"),
            body_text: None,
        })
    }
}
