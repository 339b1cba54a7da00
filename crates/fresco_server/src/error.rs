//! Mapping pipeline errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fresco_error::{FrescoError, FrescoErrorKind};
use serde_json::json;
use tracing::error;

/// A [`FrescoError`] on its way out as an HTTP response.
///
/// Bad input answers 400, unknown jobs and files 404, everything else 500.
#[derive(Debug)]
pub struct ApiError(FrescoError);

impl ApiError {
    /// Status code this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            FrescoErrorKind::Validation(_) => StatusCode::BAD_REQUEST,
            _ if self.0.is_not_found() => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FrescoError> for ApiError {
    fn from(err: FrescoError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
