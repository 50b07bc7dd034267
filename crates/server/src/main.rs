//! stanza quiz server entry point.
//!
//! Loads config, the poem catalog and the persisted answers, then serves the
//! quiz over HTTP. Logs go to stderr as JSON.

use std::sync::Arc;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use stanza_client::{ContentExtractor, FetchClient, FetchConfig};
use stanza_core::{AnswerState, AppConfig, JsonFileStore, SourceCatalog};
use tracing_subscriber::EnvFilter;

mod error;
mod handler;
mod page;
mod quiz;

use quiz::Quiz;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let catalog = SourceCatalog::load(&config.catalog_path)?;
    let answers = AnswerState::load(Box::new(JsonFileStore::new(&config.state_path)), catalog.len());
    let fetcher = FetchClient::new(FetchConfig::from(&config))?;

    let quiz = Quiz::new(
        catalog,
        answers,
        Arc::new(fetcher),
        ContentExtractor::default(),
        Box::new(StdRng::from_entropy()),
        config.excerpt_lines,
    );

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    tracing::info!(addr = %config.listen_addr, poems = quiz.total(), "stanza listening");

    axum::serve(listener, handler::router(Arc::new(quiz))).await?;

    Ok(())
}
