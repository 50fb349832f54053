//! # Custom Extractors
//!
//! Maps query-string rejections to [`AppError::BadRequest`] so malformed
//! requests get the same `{"error": ...}` body as every other failure.

use axum::extract::rejection::QueryRejection;
use axum::extract::Query;

use crate::error::AppError;

/// Unwrap a query extraction result.
///
/// Handlers take `Result<Query<T>, QueryRejection>` and call this first:
/// ```ignore
/// async fn handler(query: Result<Query<T>, QueryRejection>) -> Result<..., AppError> {
///     let params = extract_query(query)?;
/// }
/// ```
pub fn extract_query<T>(result: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    result
        .map(|Query(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Parse an optional positive count parameter. Zero, negative, and
/// unparseable values are treated as absent.
pub fn parse_positive(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&v| v > 0)
}
