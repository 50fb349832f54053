//! # Selection Options API
//!
//! Read-only listings that populate the selection screen: the countries
//! present in the catalog and the periods available for a country.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use trivia_core::CountryFilter;

use crate::error::{AppError, ErrorBody};
use crate::extractors::extract_query;
use crate::state::AppState;

/// Country listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CountriesResponse {
    pub countries: Vec<String>,
}

/// Period listing. The first entry is always `Any Time`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PeriodsResponse {
    pub periods: Vec<String>,
}

/// Optional country restriction for the period listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PeriodsParams {
    /// Only list periods that have items for this country.
    pub country: Option<String>,
}

/// Build the options router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/countries", get(list_countries))
        .route("/api/periods", get(list_periods))
}

/// GET /api/countries: Distinct countries in the catalog.
#[utoipa::path(
    get,
    path = "/api/countries",
    responses(
        (status = 200, description = "Countries, sorted", body = CountriesResponse),
        (status = 500, description = "Catalog unavailable", body = ErrorBody),
    ),
    tag = "catalog"
)]
async fn list_countries(State(state): State<AppState>) -> Result<Json<CountriesResponse>, AppError> {
    let catalog = state.load_catalog().await?;
    Ok(Json(CountriesResponse {
        countries: catalog.countries(),
    }))
}

/// GET /api/periods: Periods, optionally narrowed to one country.
#[utoipa::path(
    get,
    path = "/api/periods",
    params(PeriodsParams),
    responses(
        (status = 200, description = "Any Time followed by sorted periods", body = PeriodsResponse),
        (status = 500, description = "Catalog unavailable", body = ErrorBody),
    ),
    tag = "catalog"
)]
async fn list_periods(
    State(state): State<AppState>,
    query: Result<Query<PeriodsParams>, QueryRejection>,
) -> Result<Json<PeriodsResponse>, AppError> {
    let params = extract_query(query)?;
    // A blank country is the same as no country here, not a 400.
    let filter = params
        .country
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .map(CountryFilter::single)
        .transpose()?;
    let catalog = state.load_catalog().await?;
    Ok(Json(PeriodsResponse {
        periods: catalog.periods(filter.as_ref()),
    }))
}
