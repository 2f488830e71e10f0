//! Embedded frontend serving.
//!
//! The single-page frontend is compiled into the binary so the server is
//! one self-contained executable. Asset links in the index are rewritten
//! with a boot-time version parameter, which lets the assets themselves be
//! served with a long-lived cache header.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use include_dir::{Dir, include_dir};
use std::sync::Arc;

use super::state::AppState;

static FRONTEND_DIST: Dir = include_dir!("$CARGO_MANIFEST_DIR/frontend/dist");

/// GET / - the submission page, with cache-busted asset links.
pub async fn index_handler(State(state): State<Arc<AppState>>) -> Response {
    let Some(file) = FRONTEND_DIST.get_file("index.html") else {
        return (StatusCode::NOT_FOUND, "Frontend not built").into_response();
    };

    let version = format!("?v={}", state.boot_time);
    let page = String::from_utf8_lossy(file.contents())
        .replace(".js\"", &format!(".js{}\"", version))
        .replace(".css\"", &format!(".css{}\"", version));

    Html(page).into_response()
}

/// GET /assets/*path - embedded frontend assets.
pub async fn asset_handler(Path(path): Path<String>) -> Response {
    // The version parameter is only there to defeat stale caches.
    let clean_path = path.split('?').next().unwrap_or(&path);

    let Some(file) = FRONTEND_DIST.get_file(format!("assets/{}", clean_path)) else {
        return (StatusCode::NOT_FOUND, "Asset not found").into_response();
    };

    let mime = mime_guess::from_path(clean_path)
        .first_or_octet_stream()
        .to_string();
    (
        [
            (header::CONTENT_TYPE, mime),
            (header::CACHE_CONTROL, "public, max-age=31536000".to_string()),
        ],
        file.contents().to_vec(),
    )
        .into_response()
}
