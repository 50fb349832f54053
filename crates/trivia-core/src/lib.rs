//! # trivia-core — Foundational Types for the Trivia Stack
//!
//! Defines the data every other crate in the workspace speaks: the
//! immutable [`TriviaItem`], the bundled [`Catalog`] it is drawn from,
//! and the retrieval pipeline that turns a country/period request into a
//! randomly ordered list of items.
//!
//! ## Retrieval Pipeline
//!
//! ```text
//! country / countries / period ──▶ TriviaQuery ──▶ filter ──▶ shuffle ──▶ cap
//! ```
//!
//! - Country matching is case-insensitive; `countries` accepts a
//!   comma-separated list and matches any entry.
//! - The sentinel period (`"any"` / `"Any Time"`) disables period filtering.
//! - Ordering is a uniform Fisher–Yates permutation.
//! - An empty result is a valid answer, never an error.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `trivia-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod catalog;
pub mod error;
pub mod filter;
pub mod item;
pub mod selection;
pub mod shuffle;
pub mod source;

pub use catalog::{Catalog, TriviaQuery};
pub use error::TriviaError;
pub use filter::{CountryFilter, PeriodFilter, ANY_PERIOD_PARAM, ANY_TIME_LABEL};
pub use item::TriviaItem;
pub use selection::{
    parse_count, Contrast, DisplayPreferences, SessionSelection, TextSize,
    DEFAULT_QUESTION_COUNT, QUESTION_COUNT_OPTIONS,
};
pub use shuffle::shuffle;
pub use source::{FileSource, StaticSource, TriviaSource};
