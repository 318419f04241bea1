use crate::error::RelayError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub mod chat;

/// JSON body of every error response.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            RelayError::Validation => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                self.to_string(),
            ),
            RelayError::Completion(_) | RelayError::EmptyCompletion => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "completion_error",
                "failed to get a reply from the model".to_owned(),
            ),
            RelayError::HistoryUnavailable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "history_unavailable",
                "failed to load chat history".to_owned(),
            ),
        };

        (status, Json(ErrorBody { code, message })).into_response()
    }
}
