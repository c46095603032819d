pub mod error_response;
pub mod page;
pub mod query;
pub mod submission;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::store::RecordStore;

/// Shared by every handler; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/submit-data", post(submission::submit_data))
        .route("/get-csv", get(query::get_csv))
        .route("/latest-location", get(query::latest_location))
        .with_state(state)
}
