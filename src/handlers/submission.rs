use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::handlers::AppState;
use crate::models::error::ServiceError;
use crate::models::location_record::LocationRecord;

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub message: &'static str,
}

/// The body is parsed as JSON whatever `Content-Type` the client sent.
pub async fn submit_data(State(state): State<AppState>, body: Bytes) -> Result<Json<SubmitResponse>, ServiceError> {
    let record: LocationRecord = serde_json::from_slice(&body)
        .map_err(|e| ServiceError::Validation(format!("Failed to parse the request body: {}", e)))?;

    state.store.append(&record).await?;

    Ok(Json(SubmitResponse {
        message: "Data received successfully",
    }))
}
