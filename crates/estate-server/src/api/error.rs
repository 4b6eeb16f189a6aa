//! Mapping of core errors onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use estate_core::EstateError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body or query could not be parsed
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Estate(#[from] EstateError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Estate(err) if err.is_validation() => StatusCode::BAD_REQUEST,
            Self::Estate(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            Self::Estate(EstateError::PlotOccupied(_)) => StatusCode::BAD_REQUEST,
            Self::Estate(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            // storage details stay in the logs
            Self::Estate(EstateError::StorageFailure(_)) => "Internal storage error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Estate(EstateError::StorageFailure(detail)) => {
                tracing::error!("Request failed with storage error: {}", detail);
            }
            _ => tracing::debug!(status = %status, "Request rejected: {}", self.message()),
        }
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}
