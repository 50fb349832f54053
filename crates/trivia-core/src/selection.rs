//! # Session Selection
//!
//! The choices collected on the selection screen and the query-string
//! encoding used to hand them to the playback screen.
//!
//! ```text
//! ?country=USA&period=any&count=10
//! ```
//!
//! The `"Any Time"` label travels as `"any"`. `count` falls back to
//! [`DEFAULT_QUESTION_COUNT`] when absent, unparseable, or zero.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::TriviaQuery;
use crate::error::TriviaError;
use crate::filter::{CountryFilter, PeriodFilter};

/// Question count used when the navigation query carries none.
pub const DEFAULT_QUESTION_COUNT: usize = 10;

/// Question counts offered on the selection screen.
pub const QUESTION_COUNT_OPTIONS: [usize; 4] = [5, 10, 15, 20];

/// A user's country/period/count choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSelection {
    pub country: String,
    pub period: PeriodFilter,
    pub question_count: usize,
}

impl SessionSelection {
    pub fn new(country: impl Into<String>, period: Option<&str>, question_count: usize) -> Self {
        Self {
            country: country.into(),
            period: PeriodFilter::parse(period),
            question_count,
        }
    }

    /// Encode as navigation query parameters.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("country", &self.country)
            .append_pair("period", self.period.as_param())
            .append_pair("count", &self.question_count.to_string())
            .finish()
    }

    /// Decode navigation query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`TriviaError::MissingCountry`] when `country` is absent or blank.
    fn from_query_pairs<I, K, V>(pairs: I) -> Result<Self, TriviaError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut country = None;
        let mut period = None;
        let mut count = None;
        for (key, value) in pairs {
            match key.as_ref() {
                "country" => country = Some(value.as_ref().trim().to_string()),
                "period" => period = Some(value.as_ref().to_string()),
                "count" => count = Some(value.as_ref().to_string()),
                _ => {}
            }
        }
        let country = country
            .filter(|c| !c.is_empty())
            .ok_or(TriviaError::MissingCountry)?;
        Ok(Self {
            country,
            period: PeriodFilter::parse(period.as_deref()),
            question_count: parse_count(count.as_deref()),
        })
    }

    /// Decode an encoded query string (without the leading `?`).
    pub fn from_query_string(query: &str) -> Result<Self, TriviaError> {
        Self::from_query_pairs(url::form_urlencoded::parse(query.as_bytes()))
    }

    /// The retrieval query for this selection, capped to the question count.
    pub fn to_query(&self) -> Result<TriviaQuery, TriviaError> {
        Ok(TriviaQuery {
            countries: CountryFilter::single(self.country.as_str())?,
            period: self.period.clone(),
            limit: Some(self.question_count),
        })
    }
}

/// Parse a `count` parameter, falling back to the default.
pub fn parse_count(raw: Option<&str>) -> usize {
    raw.and_then(|c| c.trim().parse::<usize>().ok())
        .filter(|&c| c > 0)
        .unwrap_or(DEFAULT_QUESTION_COUNT)
}

/// Contrast preference of the presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Contrast {
    #[default]
    Normal,
    High,
}

/// Text size preference of the presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl TextSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for TextSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            other => Err(format!("unknown text size '{other}' (expected small, medium or large)")),
        }
    }
}

/// Display preferences chosen alongside the session selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPreferences {
    pub contrast: Contrast,
    pub text_size: TextSize,
}
