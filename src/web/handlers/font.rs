// GET /font: the Hangul font discovered at startup.
//
// Read from disk on each request; the browser caches it via
// Cache-Control, so it is fetched once per client in practice.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::web::AppState;

pub async fn serve_font(State(state): State<AppState>) -> Response {
    let Some(ref face) = state.cloud.font else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match tokio::fs::read(&face.path).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, face.mime_type()),
                (header::CACHE_CONTROL, "public, max-age=86400"),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, path = %face.path.display(), "Failed to read font file");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
