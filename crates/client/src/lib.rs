//! Client code for stanza.
//!
//! This crate provides the page fetch pipeline, per-site poem extraction,
//! HTML-to-text rendering and excerpt selection shared by the server and CLI.

pub mod excerpt;
pub mod extract;
pub mod fetch;
pub mod render;

pub use excerpt::{DEFAULT_WINDOW, select_excerpt};
pub use extract::{AdapterRegistry, ContentExtractor, ExtractionRule, MarkerRule, PoemContent, SelectorRule};
pub use fetch::{FetchClient, FetchConfig, PageFetcher};
pub use render::{Html2TextRenderer, TextRenderer};
