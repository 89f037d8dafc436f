use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::model::ReadingError;

const INTERNAL_MESSAGE: &str = "Error interno del servidor";

/// Errors a handler can return; mapped to a status code and JSON body
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Client sent incomplete input (400)
    #[error("{0}")]
    Validation(String),

    /// Anything else that went wrong while handling the request (500)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal(e: impl std::fmt::Display) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<ReadingError> for ApiError {
    fn from(e: ReadingError) -> Self {
        match e {
            ReadingError::Missing(_) => ApiError::Validation(e.to_string()),
            ReadingError::NotNumeric { .. } => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(message) => {
                warn!("Rejected prediction request: {}", message);
                (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({ "error": message })),
                )
                    .into_response()
            }
            ApiError::Internal(details) => {
                error!("Prediction error: {}", details);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({
                        "error": INTERNAL_MESSAGE,
                        "details": details,
                    })),
                )
                    .into_response()
            }
        }
    }
}
