//! # Trivia Items
//!
//! A trivia item is one question/answer record tagged with a country and a
//! time period. Items are never created or mutated at runtime; they are
//! only selected, filtered, and reordered.

use serde::{Deserialize, Serialize};

/// One question/answer/optional-fun-fact record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriviaItem {
    /// Country tag, e.g. `"USA"`.
    pub country: String,
    /// Time period tag, e.g. `"20th Century"`.
    pub period: String,
    pub question: String,
    pub answer: String,
    /// Optional extra narration after the answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fun_fact: Option<String>,
}

impl TriviaItem {
    /// Return the name of the first blank required field, if any.
    pub(crate) fn blank_field(&self) -> Option<&'static str> {
        [
            ("country", &self.country),
            ("period", &self.period),
            ("question", &self.question),
            ("answer", &self.answer),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }

    /// The fun fact, if present and non-blank.
    pub fn fun_fact(&self) -> Option<&str> {
        self.fun_fact
            .as_deref()
            .map(str::trim)
            .filter(|fact| !fact.is_empty())
    }
}
