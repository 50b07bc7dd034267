//! stanza-cli: catalog and adapter maintenance for the quiz.
//!
//! Reads the same configuration as the server (STANZA_* and
//! STANZA_CONFIG_FILE). Logs go to stderr; results go to stdout.

use std::io;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use stanza_client::{AdapterRegistry, ContentExtractor, DEFAULT_WINDOW, FetchClient, FetchConfig};
use stanza_core::{AppConfig, JsonFileStore, SourceCatalog};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "stanza-cli", about = "Maintenance tools for the stanza poem quiz", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the hosts that have an extraction rule.
    Hosts,

    /// Fetch and extract one page, printing title, author and an excerpt.
    Extract {
        url: String,

        /// Lines in the excerpt.
        #[arg(long, default_value_t = DEFAULT_WINDOW)]
        lines: usize,

        /// Print the full extracted content as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Fetch and extract every catalog entry, reporting failures.
    Check,

    /// Print correct/total for the catalog.
    Status,

    /// Mark every catalog entry unanswered.
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Hosts => commands::hosts(&AdapterRegistry::default(), &mut out)?,
        Commands::Extract { url, lines, json } => {
            let fetcher = FetchClient::new(FetchConfig::from(&config))?;
            commands::extract(
                &fetcher,
                &ContentExtractor::default(),
                &url,
                lines,
                json,
                &mut rand::thread_rng(),
                &mut out,
            )
            .await?;
        }
        Commands::Check => {
            let catalog = SourceCatalog::load(&config.catalog_path)?;
            let fetcher = FetchClient::new(FetchConfig::from(&config))?;
            let failures = commands::check(&catalog, &fetcher, &ContentExtractor::default(), &mut out).await?;
            if failures > 0 {
                bail!("{failures} catalog entries failed to extract");
            }
        }
        Commands::Status => {
            let catalog = SourceCatalog::load(&config.catalog_path)?;
            commands::status(&catalog, Box::new(JsonFileStore::new(&config.state_path)), &mut out)?;
        }
        Commands::Reset => {
            let catalog = SourceCatalog::load(&config.catalog_path)?;
            commands::reset(&catalog, Box::new(JsonFileStore::new(&config.state_path)), &mut out)?;
        }
    }

    Ok(())
}
