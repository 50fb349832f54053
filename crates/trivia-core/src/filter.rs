//! # Country and Period Filters
//!
//! Parsed forms of the retrieval request parameters. Country matching is
//! case-insensitive; period matching is exact unless the sentinel period
//! is requested, in which case every period matches.

use serde::{Deserialize, Serialize};

use crate::error::TriviaError;

/// Display label of the sentinel period on the selection screen.
pub const ANY_TIME_LABEL: &str = "Any Time";

/// Query-parameter form of the sentinel period.
pub const ANY_PERIOD_PARAM: &str = "any";

/// One or more requested countries, stored lowercased for matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryFilter {
    requested: Vec<String>,
    normalized: Vec<String>,
}

impl CountryFilter {
    /// Build a filter from the `country` / `countries` request parameters.
    ///
    /// `countries` is a comma-separated list and takes precedence when it
    /// names at least one country. Entries are trimmed and blanks dropped.
    pub fn parse(country: Option<&str>, countries: Option<&str>) -> Result<Self, TriviaError> {
        let from_list: Vec<String> = countries
            .into_iter()
            .flat_map(|list| list.split(','))
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        let requested = if from_list.is_empty() {
            country
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(|c| vec![c.to_string()])
                .ok_or(TriviaError::MissingCountry)?
        } else {
            from_list
        };

        Ok(Self::from_names(requested))
    }

    /// Build a filter for a single country.
    pub fn single(country: impl Into<String>) -> Result<Self, TriviaError> {
        let country = country.into();
        Self::parse(Some(&country), None)
    }

    fn from_names(requested: Vec<String>) -> Self {
        let normalized = requested.iter().map(|c| c.to_lowercase()).collect();
        Self {
            requested,
            normalized,
        }
    }

    /// Whether `country` equals any requested country, ignoring case.
    pub fn matches(&self, country: &str) -> bool {
        let candidate = country.trim().to_lowercase();
        self.normalized.iter().any(|c| *c == candidate)
    }

    /// The requested countries as given (trimmed).
    pub fn requested(&self) -> &[String] {
        &self.requested
    }

    /// Human-readable form, e.g. `"USA"` or `"USA, Japan"`.
    pub fn display(&self) -> String {
        self.requested.join(", ")
    }
}

/// Period constraint of a retrieval request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodFilter {
    /// The sentinel period: no period filtering.
    Any,
    /// Only items whose period equals this value exactly.
    Exact(String),
}

impl PeriodFilter {
    /// Parse the optional `period` parameter.
    ///
    /// Absent, blank, `"any"` and `"Any Time"` (ASCII case-insensitive)
    /// all mean [`PeriodFilter::Any`].
    pub fn parse(period: Option<&str>) -> Self {
        match period.map(str::trim) {
            None | Some("") => Self::Any,
            Some(p) if is_sentinel(p) => Self::Any,
            Some(p) => Self::Exact(p.to_string()),
        }
    }

    pub fn matches(&self, period: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(expected) => expected == period,
        }
    }

    /// Value to place in a navigation query string.
    pub fn as_param(&self) -> &str {
        match self {
            Self::Any => ANY_PERIOD_PARAM,
            Self::Exact(p) => p,
        }
    }

    /// Value to show to the user.
    pub fn label(&self) -> &str {
        match self {
            Self::Any => ANY_TIME_LABEL,
            Self::Exact(p) => p,
        }
    }
}

/// Whether `period` is one of the sentinel spellings.
pub fn is_sentinel(period: &str) -> bool {
    let period = period.trim();
    period.eq_ignore_ascii_case(ANY_PERIOD_PARAM) || period.eq_ignore_ascii_case(ANY_TIME_LABEL)
}
