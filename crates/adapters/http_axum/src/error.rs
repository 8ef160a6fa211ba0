//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use people_domain::error::PeopleError;

/// JSON error body returned by API endpoints.
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Maps handler failures to an HTTP response with appropriate status code.
pub enum ApiError {
    /// A service call failed.
    Domain(PeopleError),
    /// The request was malformed (e.g. a non-numeric id in the path).
    BadRequest(String),
}

impl From<PeopleError> for ApiError {
    fn from(err: PeopleError) -> Self {
        Self::Domain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Domain(PeopleError::NotFound(err)) => {
                tracing::debug!(error = %err, "not found");
                (StatusCode::NOT_FOUND, err.to_string())
            }
            Self::Domain(PeopleError::Storage(err)) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
