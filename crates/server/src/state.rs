//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::store::UserStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It owns the user store for the
/// lifetime of the server; nothing outside the router touches the store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    users: UserStore,
}

impl AppState {
    /// Create a new application state around an existing store.
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `users` - Store that `POST /api/user` appends to
    #[must_use]
    pub fn new(config: ServerConfig, users: UserStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, users }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the user store.
    #[must_use]
    pub fn users(&self) -> &UserStore {
        &self.inner.users
    }
}
