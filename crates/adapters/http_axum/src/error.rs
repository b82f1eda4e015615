//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use hearth_domain::error::HearthError;

use crate::response::Envelope;

/// Maps [`HearthError`] to an HTTP response with appropriate status code
/// and the standard envelope body.
pub struct ApiError(HearthError);

impl From<HearthError> for ApiError {
    fn from(err: HearthError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, envelope) = match &self.0 {
            HearthError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                Envelope::failure("Invalid request.", Some(err.to_string())),
            ),
            HearthError::NotFound(err) => (
                StatusCode::NOT_FOUND,
                Envelope::failure(format!("{} not found.", err.entity), None),
            ),
            HearthError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Envelope::failure("Internal server error.", None),
                )
            }
        };

        (status, Json(envelope)).into_response()
    }
}
