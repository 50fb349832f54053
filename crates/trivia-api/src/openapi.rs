//! # OpenAPI Document Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI 3.1
//! document served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI document for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Trivia API",
        version = "0.1.0",
        description = "Country and period filtered trivia retrieval with uniform shuffling.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::trivia::get_trivia,
        crate::routes::catalog::list_countries,
        crate::routes::catalog::list_periods,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::routes::trivia::TriviaItemDoc,
        crate::routes::trivia::TriviaResponse,
        crate::routes::catalog::CountriesResponse,
        crate::routes::catalog::PeriodsResponse,
    )),
    tags(
        (name = "trivia", description = "Trivia retrieval"),
        (name = "catalog", description = "Selection screen options"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
