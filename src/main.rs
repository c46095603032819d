//! Location tracking service.
//!
//! Devices POST their position to `/submit-data`; every submission is appended
//! to a CSV file. `/latest-location` returns the newest row, `/get-csv` the
//! whole file, and `/` serves a map that follows the latest position.
//!
//! Run the server with
//! ```not_rust
//! PORT=8000 DATA_FILE=data.csv cargo run
//! ```

mod app_config;
mod handlers;
mod logging;
mod models;
mod store;

use std::sync::Arc;

use axum::Server;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing::{error, info};

use crate::app_config::AppConfig;
use crate::handlers::AppState;
use crate::store::CsvRecordStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = AppConfig::load()?;
    let store = CsvRecordStore::ensure_initialized(config.data_file()).await?;

    let app = handlers::router(AppState::new(Arc::new(store))).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default().include_headers(true))),
    );

    let addr = config.socket_addr();
    info!("listening on {}, storing locations in {}", addr, config.data_file().display());

    Server::try_bind(&addr)?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("unable to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
