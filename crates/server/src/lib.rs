//! Roster server library.
//!
//! Serves a single-page form that submits user records and a list view that
//! reads them back. Records live in an in-memory [`store::UserStore`] owned by
//! the [`state::AppState`] handed to [`app`]; nothing is persisted.
//!
//! The binary in `main.rs` adds configuration loading, Sentry and the tracing
//! subscriber around the router built here, so tests can drive [`app`]
//! directly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;

use axum::Router;
use tower_http::services::ServeDir;

use state::AppState;

/// Build the full router: API, shell, static assets and per-request middleware.
///
/// Sentry layers are left to the caller so tests run without a Sentry hub.
pub fn app(state: AppState) -> Router {
    let assets = ServeDir::new(&state.config().static_dir);

    routes::routes()
        .fallback_service(assets)
        .layer(axum::middleware::from_fn(
            middleware::request_id_middleware,
        ))
        .layer(middleware::trace_layer())
        .with_state(state)
}
