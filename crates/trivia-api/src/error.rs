//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every error response carries a flat JSON body: `{"error": "<message>"}`.
//! Internal failures are logged with their cause and answered with a
//! fixed message so nothing about the failure leaks to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use trivia_core::TriviaError;

/// Message returned for every 500 response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error while fetching trivia";

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Required parameter missing or malformed (400).
    #[error("{0}")]
    BadRequest(String),

    /// Unexpected failure (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::BadRequest(msg) => msg.clone(),
            Self::Internal(_) => {
                tracing::error!(error = %self, "internal server error");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Missing-country errors are the caller's fault; everything else is ours.
impl From<TriviaError> for AppError {
    fn from(err: TriviaError) -> Self {
        match err {
            TriviaError::MissingCountry => Self::BadRequest(err.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}
