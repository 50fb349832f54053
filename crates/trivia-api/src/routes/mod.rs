//! # Route Modules
//!
//! Each module exposes a `router()` returning `Router<AppState>`.
//!
//! - [`trivia`]: `GET /api/trivia`, the retrieval endpoint.
//! - [`catalog`]: `GET /api/countries` and `GET /api/periods`, the
//!   option lists behind the selection screen.

pub mod catalog;
pub mod trivia;
