//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Application shell (static/index.html)
//! GET  /health                 - Health check
//!
//! # API
//! GET  /api/users              - Every stored user, in submission order
//! POST /api/user               - Store `{ "user": ... }`, answers "user added"
//!
//! # Everything else
//! GET  /*                      - Files from the static directory (404 if absent)
//! ```

pub mod shell;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list))
        .route("/user", post(users::create))
        .fallback(shell::api_not_found)
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(shell::index))
        .route("/health", get(shell::health))
        .nest("/api", api_routes())
}
