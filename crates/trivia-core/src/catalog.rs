//! # Trivia Catalog
//!
//! The read-only collection of trivia items that retrieval draws from,
//! plus the retrieval operation itself: filter by country and period,
//! shuffle uniformly, then cap to the requested count.
//!
//! Catalog documents are JSON objects of the form `{"items": [...]}`,
//! the same shape the retrieval endpoint returns.

use std::collections::BTreeSet;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::TriviaError;
use crate::filter::{CountryFilter, PeriodFilter, ANY_TIME_LABEL};
use crate::item::TriviaItem;
use crate::shuffle::shuffle;

const BUNDLED_CATALOG: &str = include_str!("../data/trivia.json");

/// A parsed retrieval request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriviaQuery {
    pub countries: CountryFilter,
    pub period: PeriodFilter,
    /// Maximum number of items to return. `None` returns every match.
    pub limit: Option<usize>,
}

impl TriviaQuery {
    /// Build a query from raw request parameters.
    ///
    /// # Errors
    ///
    /// Returns [`TriviaError::MissingCountry`] when neither `country` nor
    /// `countries` names a country.
    pub fn from_params(
        country: Option<&str>,
        countries: Option<&str>,
        period: Option<&str>,
    ) -> Result<Self, TriviaError> {
        Ok(Self {
            countries: CountryFilter::parse(country, countries)?,
            period: PeriodFilter::parse(period),
            limit: None,
        })
    }

    /// Cap the result to at most `limit` items.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether `item` satisfies both the country and period constraints.
    pub fn matches(&self, item: &TriviaItem) -> bool {
        self.countries.matches(&item.country) && self.period.matches(&item.period)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CatalogDocument {
    items: Vec<TriviaItem>,
}

/// Immutable collection of trivia items.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    items: Vec<TriviaItem>,
}

impl Catalog {
    /// Build a catalog, rejecting items with a blank required field.
    pub fn from_items(items: Vec<TriviaItem>) -> Result<Self, TriviaError> {
        if let Some((index, field)) = items
            .iter()
            .enumerate()
            .find_map(|(i, item)| item.blank_field().map(|f| (i, f)))
        {
            return Err(TriviaError::InvalidItem {
                index,
                reason: format!("{field} is blank"),
            });
        }
        Ok(Self { items })
    }

    /// Parse a `{"items": [...]}` catalog document.
    pub fn from_json(json: &str) -> Result<Self, TriviaError> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        Self::from_items(doc.items)
    }

    /// Read and parse a catalog document from disk.
    pub fn from_path(path: &Path) -> Result<Self, TriviaError> {
        let raw = std::fs::read_to_string(path).map_err(|source| TriviaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// The catalog compiled into the binary.
    pub fn bundled() -> Result<Self, TriviaError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn items(&self) -> &[TriviaItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Filter, shuffle, and cap.
    ///
    /// The returned order is a uniform random permutation of the matching
    /// items. An empty vector means nothing matched.
    pub fn retrieve<R: Rng + ?Sized>(&self, query: &TriviaQuery, rng: &mut R) -> Vec<TriviaItem> {
        let mut matched: Vec<TriviaItem> = self
            .items
            .iter()
            .filter(|item| query.matches(item))
            .cloned()
            .collect();
        shuffle(&mut matched, rng);
        if let Some(limit) = query.limit {
            matched.truncate(limit);
        }
        tracing::debug!(
            countries = %query.countries.display(),
            period = query.period.label(),
            returned = matched.len(),
            "retrieved trivia"
        );
        matched
    }

    /// Distinct countries, sorted. The first spelling seen wins when two
    /// entries differ only in case.
    pub fn countries(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        for item in &self.items {
            if seen.insert(item.country.to_lowercase()) {
                out.push(item.country.clone());
            }
        }
        out.sort_by_key(|c| c.to_lowercase());
        out
    }

    /// The period choices for the selection screen: the `"Any Time"` label
    /// first, then every distinct period (optionally restricted to the
    /// given countries), sorted.
    pub fn periods(&self, countries: Option<&CountryFilter>) -> Vec<String> {
        let distinct: BTreeSet<&str> = self
            .items
            .iter()
            .filter(|item| countries.map_or(true, |f| f.matches(&item.country)))
            .map(|item| item.period.as_str())
            .collect();
        std::iter::once(ANY_TIME_LABEL.to_string())
            .chain(distinct.into_iter().map(str::to_string))
            .collect()
    }
}
