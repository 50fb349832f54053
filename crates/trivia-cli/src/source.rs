//! # Item Sources
//!
//! Where the CLI gets its trivia from: a remote trivia API (`--server`),
//! a catalog file (`--catalog`), or the catalog compiled into the binary.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use trivia_client::{ClientConfig, TriviaClient};
use trivia_core::{
    CountryFilter, FileSource, SessionSelection, StaticSource, TriviaItem, TriviaQuery,
    TriviaSource,
};

/// Flags selecting the item source. Shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Base URL of a trivia API server (e.g. http://localhost:8080).
    #[arg(long, conflicts_with = "catalog")]
    pub server: Option<String>,

    /// Path to a JSON catalog (`{"items": [...]}`) used instead of the
    /// bundled one.
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

/// A resolved item source.
#[derive(Debug)]
pub enum ItemSource {
    Local(Arc<dyn TriviaSource>),
    Remote(TriviaClient),
}

impl ItemSource {
    /// Resolve the source named by the flags.
    pub fn from_args(args: &SourceArgs) -> Result<Self> {
        if let Some(server) = &args.server {
            let config = ClientConfig::new(server)
                .with_context(|| format!("invalid server URL '{server}'"))?;
            tracing::debug!(server = %config.base_url, "using remote trivia API");
            return Ok(Self::Remote(TriviaClient::new(config)?));
        }
        match &args.catalog {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using catalog file");
                Ok(Self::Local(Arc::new(FileSource::new(path))))
            }
            None => Ok(Self::Local(Arc::new(
                StaticSource::bundled().context("bundled catalog is invalid")?,
            ))),
        }
    }

    /// Fetch the shuffled items for a playback selection, capped to its
    /// question count. An empty vector means nothing matched.
    pub async fn fetch(&self, selection: &SessionSelection) -> Result<Vec<TriviaItem>> {
        match self {
            Self::Local(source) => {
                let catalog = source.load()?;
                let query = selection.to_query()?;
                Ok(catalog.retrieve(&query, &mut rand::thread_rng()))
            }
            Self::Remote(client) => Ok(client.fetch(selection).await?),
        }
    }

    /// Retrieve items for raw `country`/`countries`/`period` parameters,
    /// at most `limit` of them.
    pub async fn query(
        &self,
        country: Option<&str>,
        countries: Option<&str>,
        period: Option<&str>,
        limit: usize,
    ) -> Result<Vec<TriviaItem>> {
        // Validates that at least one country was named, for both sources.
        let query = TriviaQuery::from_params(country, countries, period)?.with_limit(limit);
        match self {
            Self::Local(source) => {
                let catalog = source.load()?;
                Ok(catalog.retrieve(&query, &mut rand::thread_rng()))
            }
            Self::Remote(client) => {
                let names: Vec<&str> = query
                    .countries
                    .requested()
                    .iter()
                    .map(String::as_str)
                    .collect();
                let mut items = client
                    .fetch_countries(&names, Some(query.period.as_param()))
                    .await?;
                items.truncate(limit);
                Ok(items)
            }
        }
    }

    /// Countries available for selection.
    pub async fn countries(&self) -> Result<Vec<String>> {
        match self {
            Self::Local(source) => Ok(source.load()?.countries()),
            Self::Remote(client) => Ok(client.countries().await?),
        }
    }

    /// Period options, `Any Time` first.
    pub async fn periods(&self, country: Option<&str>) -> Result<Vec<String>> {
        match self {
            Self::Local(source) => {
                let filter = country
                    .filter(|c| !c.trim().is_empty())
                    .map(CountryFilter::single)
                    .transpose()?;
                Ok(source.load()?.periods(filter.as_ref()))
            }
            Self::Remote(client) => Ok(client.periods(country).await?),
        }
    }
}
