//! Integration test support for Roster.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p roster-integration-tests
//! ```
//!
//! Each test starts its own server on an ephemeral port with a fresh store,
//! so tests never observe each other's users.
//!
//! # Pieces
//!
//! - [`UsersClient`] - typed client for the user API, the Rust counterpart of
//!   the shell's `fetchUsers` / `createUser`
//! - [`TestContext`] - a running server plus a client pointed at it

use std::path::PathBuf;

use reqwest::{Client, Response, StatusCode};
use roster_core::{IntakePolicy, USER_KEY, UserRecord};
use roster_server::config::ServerConfig;
use roster_server::state::AppState;
use roster_server::store::UserStore;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Errors returned by [`UsersClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport or decoding failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Typed client for the user API.
#[derive(Debug, Clone)]
pub struct UsersClient {
    http: Client,
    base_url: String,
}

impl UsersClient {
    /// Create a client for a server rooted at `base_url` (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Absolute URL for a server path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET /api/users`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, a non-2xx status, or a
    /// body that is not a JSON array.
    pub async fn fetch_users(&self) -> Result<Vec<Value>, ClientError> {
        let response = self.http.get(self.url("/api/users")).send().await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    /// `POST /api/user` with `{ "user": user }`, returning the acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-2xx status.
    pub async fn create_user(&self, user: &UserRecord) -> Result<String, ClientError> {
        let body = serde_json::json!({ USER_KEY: user });
        let response = self
            .http
            .post(self.url("/api/user"))
            .json(&body)
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    /// `POST /api/user` with an arbitrary body declared as JSON.
    ///
    /// # Errors
    ///
    /// Returns a `reqwest::Error` on transport failure only; any status is
    /// handed back to the caller.
    pub async fn post_raw(&self, body: impl Into<reqwest::Body>) -> reqwest::Result<Response> {
        self.post_as("application/json", body).await
    }

    /// `POST /api/user` with an arbitrary body and `Content-Type`.
    ///
    /// # Errors
    ///
    /// Returns a `reqwest::Error` on transport failure only.
    pub async fn post_as(
        &self,
        content_type: &str,
        body: impl Into<reqwest::Body>,
    ) -> reqwest::Result<Response> {
        self.http
            .post(self.url("/api/user"))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
    }

    /// Plain `GET` of any server path.
    ///
    /// # Errors
    ///
    /// Returns a `reqwest::Error` on transport failure only.
    pub async fn get(&self, path: &str) -> reqwest::Result<Response> {
        self.http.get(self.url(path)).send().await
    }
}

async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}

/// A server running on an ephemeral local port, stopped on drop.
pub struct TestContext {
    pub client: UsersClient,
    pub base_url: String,
    server: JoinHandle<()>,
}

impl TestContext {
    /// Start a server with the permissive policy and the bundled shell.
    pub async fn start() -> Self {
        Self::with_config(test_config(IntakePolicy::Permissive)).await
    }

    /// Start a server with the given intake policy and the bundled shell.
    pub async fn with_policy(policy: IntakePolicy) -> Self {
        Self::with_config(test_config(policy)).await
    }

    /// Start a server with an explicit configuration. Host and port are ignored.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn with_config(config: ServerConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener
            .local_addr()
            .expect("Test listener has no local address");

        let app = roster_server::app(AppState::new(config, UserStore::new()));
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        let base_url = format!("http://{addr}");
        Self {
            client: UsersClient::new(base_url.clone()),
            base_url,
            server,
        }
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Static directory shipped with the server crate.
#[must_use]
pub fn bundled_static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../server/static")
}

fn test_config(policy: IntakePolicy) -> ServerConfig {
    ServerConfig {
        static_dir: bundled_static_dir(),
        intake_policy: policy,
        ..ServerConfig::default()
    }
}
