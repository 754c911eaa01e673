use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use backend_application::AppError;

/// Fixed text for every backend failure; details stay in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    Internal,
}

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        match value {
            AppError::Validation(err) => HttpError::BadRequest(err.to_string()),
            AppError::Backend(_) => HttpError::Internal,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE.to_string(),
            ),
        };
        (status, Json(ErrorBody { message })).into_response()
    }
}
