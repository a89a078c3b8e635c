//! Application shell and liveness handlers.

use std::io;

use axum::{
    extract::{OriginalUri, State},
    response::Html,
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Serve the single-page application shell.
///
/// GET /
///
/// Reads `index.html` from the static directory on every request, so the
/// shell can be rebuilt without restarting the server. The bytes are sent
/// as-is; they need not be valid UTF-8.
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>) -> Result<Html<Vec<u8>>> {
    let path = state.config().index_file();

    match tokio::fs::read(&path).await {
        Ok(html) => Ok(Html(html)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "Application shell missing");
            Err(AppError::NotFound("/".to_string()))
        }
        Err(e) => Err(AppError::Internal(format!(
            "reading {}: {e}",
            path.display()
        ))),
    }
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
pub async fn health() -> &'static str {
    "ok"
}

/// Fallback for unknown `/api/*` paths so they never fall through to static files.
pub async fn api_not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
