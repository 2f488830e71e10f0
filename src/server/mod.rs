//! # HTTP Server for recap report generation
//!
//! Serves the submission frontend, accepts order-dump batches on
//! `POST /api/report`, and serves generated report images.
//!
//! ## Usage
//!
//! ```bash
//! recap serve --listen 0.0.0.0:8080 --data-dir data
//! ```
//!
//! Then open http://localhost:8080 in a browser to build a recap.

mod handlers;
mod state;
mod static_files;

pub use state::{AppState, ServerConfig};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::error::RecapError;
use crate::report::instructions;

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use recap::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), recap::error::RecapError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     data_dir: "data".into(),
///     report_year: 2021,
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), RecapError> {
    prepare_data_dir(&config)?;
    let app_state = Arc::new(AppState::new(config.clone()));
    let app = router(app_state);

    info!(listen = %config.listen_addr, "recap HTTP server starting");
    info!(data_dir = %config.data_dir.display(), year = config.report_year, "serving reports");

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            RecapError::Server(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| RecapError::Server(format!("Server error: {}", e)))?;

    Ok(())
}

/// Build the application router. Shared with the test suite, which binds
/// its own listener.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Frontend
        .route("/", get(static_files::index_handler))
        .route("/assets/*path", get(static_files::asset_handler))
        // Report API
        .route("/api/report", post(handlers::report::generate))
        // On-disk assets: placeholder image and generated reports
        .nest_service(
            "/static",
            ServeDir::new(state.config.data_dir.join("static")),
        )
        .nest_service(
            "/reports",
            ServeDir::new(state.config.data_dir.join("reports")),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create the data directories and the instructions placeholder.
///
/// The placeholder must be servable before any submission; it is rendered
/// once and kept across restarts.
pub fn prepare_data_dir(config: &ServerConfig) -> Result<(), RecapError> {
    let static_dir = config.data_dir.join("static");
    std::fs::create_dir_all(&static_dir)?;
    std::fs::create_dir_all(config.data_dir.join("reports"))?;

    let placeholder = static_dir.join("instructions.jpg");
    if !placeholder.exists() {
        instructions::write_jpg(&placeholder)?;
        info!(path = %placeholder.display(), "wrote instructions placeholder");
    }
    Ok(())
}
