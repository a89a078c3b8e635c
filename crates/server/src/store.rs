//! In-memory user store.
//!
//! Holds every admitted user value for the lifetime of the process, in the
//! order it was appended. There is no persistence, eviction, deduplication or
//! indexing; restarting the server empties the store.

use serde_json::Value;
use tokio::sync::RwLock;

/// Append-only, insertion-ordered list of user values.
///
/// Owned by [`AppState`](crate::state::AppState); handlers reach it only
/// through the state they are given.
#[derive(Debug, Default)]
pub struct UserStore {
    records: RwLock<Vec<Value>>,
}

impl UserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value and return the number of stored values afterwards.
    ///
    /// Never fails and never inspects the value.
    pub async fn append(&self, record: Value) -> usize {
        let mut records = self.records.write().await;
        records.push(record);
        records.len()
    }

    /// Snapshot of every stored value, oldest first.
    pub async fn list(&self) -> Vec<Value> {
        self.records.read().await.clone()
    }
}
