use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

use crate::models::error::{ErrorKind, ServiceError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// The only place error kinds are turned into HTTP statuses.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Io => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        match kind {
            ErrorKind::Io => error!("Location store failure: {}", self),
            ErrorKind::Validation => warn!("Rejected submission: {}", self),
            ErrorKind::NotFound => {}
        }

        let body = ErrorResponse {
            detail: self.to_string(),
        };
        (status_for(kind), Json(body)).into_response()
    }
}
