//! User list and user creation handlers.
//!
//! These two routes are the whole synchronization contract between the form
//! and the list view: the form posts `{ "user": {...} }`, the list view reads
//! everything back in submission order.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, header::CONTENT_TYPE},
};
use roster_core::{admit, is_json_media_type};
use serde_json::Value;
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// Acknowledgement returned (as a JSON string) by `POST /api/user`.
pub const USER_ADDED: &str = "user added";

/// List every stored user.
///
/// GET /api/users
///
/// Always 200 with a JSON array, oldest submission first. No pagination.
#[instrument(skip_all)]
pub async fn list(State(state): State<AppState>) -> Json<Vec<Value>> {
    let users = state.users().list().await;
    tracing::debug!(count = users.len(), "Listing users");
    Json(users)
}

/// Store the `user` value from the request body.
///
/// POST /api/user
///
/// Only a JSON `Content-Type` gets the body parsed. Any other or missing
/// media type is read as an empty object, so the request still succeeds and
/// stores `null` under the permissive policy. What gets stored is decided by
/// the configured [`IntakePolicy`](roster_core::IntakePolicy).
#[instrument(skip_all, fields(bytes = body.len()))]
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<&'static str>> {
    let policy = state.config().intake_policy;

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let body: &[u8] = if is_json_media_type(content_type) {
        &body
    } else {
        tracing::debug!(content_type, "Body is not JSON, reading it as empty");
        &[]
    };

    let record = admit(body, policy).inspect_err(|e| {
        tracing::warn!(error = %e, %policy, "User submission refused");
    })?;

    if record.is_null() {
        tracing::debug!("Submission had no user, storing null");
    }

    let count = state.users().append(record).await;
    tracing::info!(count, "User added");

    Ok(Json(USER_ADDED))
}
