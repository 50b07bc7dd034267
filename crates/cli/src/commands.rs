//! Maintenance commands for the catalog and the source adapters.

use std::io::Write;

use anyhow::Result;
use rand::Rng;
use stanza_client::{AdapterRegistry, ContentExtractor, PageFetcher, select_excerpt};
use stanza_core::{AnswerState, AnswerStore, SourceCatalog};

pub fn hosts(registry: &AdapterRegistry, out: &mut impl Write) -> Result<()> {
    for host in registry.hosts() {
        writeln!(out, "{host}")?;
    }
    Ok(())
}

/// Fetch one page and print what the quiz would show for it.
pub async fn extract<R: Rng + ?Sized>(
    fetcher: &dyn PageFetcher, extractor: &ContentExtractor, url: &str, lines: usize, json: bool, rng: &mut R,
    out: &mut impl Write,
) -> Result<()> {
    let raw = fetcher.fetch_page(url).await?;
    tracing::debug!(%url, bytes = raw.len(), "fetched page");
    let content = extractor.extract(url, &raw)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&content)?)?;
        return Ok(());
    }

    writeln!(out, "title:  {}", content.title)?;
    writeln!(out, "author: {}", content.author)?;
    writeln!(out)?;
    writeln!(out, "{}", select_excerpt(&content.body_text, lines, rng))?;
    Ok(())
}

/// Fetch and extract every catalog entry. Returns the number that failed.
pub async fn check(
    catalog: &SourceCatalog, fetcher: &dyn PageFetcher, extractor: &ContentExtractor, out: &mut impl Write,
) -> Result<usize> {
    let mut failures = 0;
    for entry in catalog.entries() {
        let result = match fetcher.fetch_page(&entry.source_url).await {
            Ok(raw) => extractor.extract(&entry.source_url, &raw),
            Err(e) => Err(e),
        };

        match result {
            Ok(content) if content.body_text.trim().is_empty() => {
                tracing::warn!(index = entry.index, url = %entry.source_url, "extracted poem has no text");
                writeln!(out, "{:>4}  EMPTY  {}", entry.index, entry.source_url)?;
            }
            Ok(content) => writeln!(out, "{:>4}  ok     {}", entry.index, content.title)?,
            Err(e) => {
                tracing::warn!(index = entry.index, url = %entry.source_url, error = %e, "catalog entry failed");
                failures += 1;
                writeln!(out, "{:>4}  FAIL   {}  {}", entry.index, entry.source_url, e)?;
            }
        }
    }

    tracing::info!(failures, total = catalog.len(), "catalog check finished");
    writeln!(out, "{} of {} failed", failures, catalog.len())?;
    Ok(failures)
}

pub fn status(catalog: &SourceCatalog, store: Box<dyn AnswerStore>, out: &mut impl Write) -> Result<()> {
    let status = AnswerState::load(store, catalog.len()).status();
    writeln!(out, "{}/{}", status.correct, status.total)?;
    Ok(())
}

/// Mark every entry unanswered again.
pub fn reset(catalog: &SourceCatalog, store: Box<dyn AnswerStore>, out: &mut impl Write) -> Result<()> {
    let mut answers = AnswerState::load(store, catalog.len());
    answers.reset()?;
    tracing::info!(total = catalog.len(), "answer state reset");
    writeln!(out, "0/{}", catalog.len())?;
    Ok(())
}
