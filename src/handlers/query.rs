use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;

use crate::handlers::AppState;
use crate::models::error::ServiceError;
use crate::models::location_record::LocationRecord;

pub async fn get_csv(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let contents = state.store.read_all().await?;
    let disposition = format!("attachment; filename=\"{}\"", state.store.file_name());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        contents,
    ))
}

pub async fn latest_location(State(state): State<AppState>) -> Result<Json<LocationRecord>, ServiceError> {
    Ok(Json(state.store.read_latest().await?))
}
