//! HTML to plain-text rendering for poem bodies.
//!
//! Used only when a rule yields markup rather than text. Lines are rendered
//! at a very wide width so verse is never re-wrapped, then trailing padding
//! and long runs of blank lines are cleaned up.

use std::sync::LazyLock;

use regex::Regex;
use stanza_core::Error;

/// Wide enough that no line of verse gets wrapped.
const RENDER_WIDTH: usize = 10_000;

static BLANK_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid blank-run pattern"));

/// Renders an HTML fragment to plain text.
pub trait TextRenderer: Send + Sync {
    fn render(&self, html: &str) -> Result<String, Error>;
}

/// html2text-backed renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Html2TextRenderer;

impl TextRenderer for Html2TextRenderer {
    fn render(&self, html: &str) -> Result<String, Error> {
        let text = html2text::config::plain()
            .string_from_read(html.as_bytes(), RENDER_WIDTH)
            .map_err(|e| Error::RenderFailed(e.to_string()))?;

        Ok(tidy(&text))
    }
}

/// Strip trailing whitespace from each line and squeeze blank runs to one blank line.
fn tidy(text: &str) -> String {
    let trimmed: Vec<&str> = text.lines().map(str::trim_end).collect();
    let joined = trimmed.join("\n");
    BLANK_RUNS.replace_all(joined.trim_matches('\n'), "\n\n").into_owned()
}
