//! # Trivia Retrieval API
//!
//! `GET /api/trivia` returns every catalog item matching the requested
//! countries and period, in uniformly random order. An empty match is a
//! successful response with `items: []`; deciding what "nothing found"
//! means is the player's job.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use trivia_core::{TriviaItem, TriviaQuery};

use crate::error::{AppError, ErrorBody};
use crate::extractors::{extract_query, parse_positive};
use crate::state::AppState;

/// Query parameters accepted by the retrieval endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TriviaParams {
    /// Single country name (case-insensitive).
    pub country: Option<String>,
    /// Comma-separated country list. Takes precedence over `country`.
    pub countries: Option<String>,
    /// Period label. Absent, blank, `any`, or `Any Time` means no filter.
    pub period: Option<String>,
    /// Maximum number of items to return. Non-positive values are ignored.
    pub count: Option<String>,
}

/// Documented shape of a returned item.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TriviaItemDoc {
    pub country: String,
    pub period: String,
    pub question: String,
    pub answer: String,
    pub fun_fact: Option<String>,
}

/// Retrieval response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TriviaResponse {
    #[schema(value_type = Vec<TriviaItemDoc>)]
    pub items: Vec<TriviaItem>,
}

/// Build the retrieval router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/trivia", get(get_trivia))
}

/// GET /api/trivia: Shuffled items for a country/period filter.
#[utoipa::path(
    get,
    path = "/api/trivia",
    params(TriviaParams),
    responses(
        (status = 200, description = "Matching items in random order", body = TriviaResponse),
        (status = 400, description = "No country supplied", body = ErrorBody),
        (status = 500, description = "Catalog unavailable", body = ErrorBody),
    ),
    tag = "trivia"
)]
async fn get_trivia(
    State(state): State<AppState>,
    query: Result<Query<TriviaParams>, QueryRejection>,
) -> Result<Json<TriviaResponse>, AppError> {
    let params = extract_query(query)?;
    let mut query = TriviaQuery::from_params(
        params.country.as_deref(),
        params.countries.as_deref(),
        params.period.as_deref(),
    )?;
    if let Some(limit) = parse_positive(params.count.as_deref()) {
        query = query.with_limit(limit);
    }

    let catalog = state.load_catalog().await?;
    let items = catalog.retrieve(&query, &mut rand::thread_rng());
    tracing::info!(
        countries = ?params.countries.as_deref().or(params.country.as_deref()),
        period = params.period.as_deref().unwrap_or(""),
        returned = items.len(),
        "trivia retrieved"
    );
    Ok(Json(TriviaResponse { items }))
}
