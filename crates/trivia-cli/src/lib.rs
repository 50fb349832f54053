//! # trivia-cli — Terminal Presentation for the Trivia Stack
//!
//! Provides the `trivia` command-line interface.
//!
//! ## Subcommands
//!
//! - `trivia play`: Timed question/answer playback with narration.
//! - `trivia query`: Print shuffled items for a filter.
//! - `trivia options`: List countries, periods, and question counts.
//!
//! Every subcommand reads from the bundled catalog by default, from a
//! catalog file with `--catalog`, or from a running trivia API with
//! `--server`:
//!
//! ```bash
//! trivia play --country USA --period "20th Century" --count 5
//! trivia play --country Japan --speech-command espeak --high-contrast
//! trivia play --selection "country=Peru&period=Ancient&count=15"
//! trivia query --countries "France, Japan" --json
//! trivia options --server http://localhost:8080 periods --country Egypt
//! ```

pub mod narrator;
pub mod options;
pub mod play;
pub mod query;
pub mod render;
pub mod source;
