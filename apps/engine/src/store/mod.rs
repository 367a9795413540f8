//! Conversation persistence — a narrow load/save interface owned by the
//! caller, plus a JSON-file-backed implementation.
//!
//! The router itself never persists. Concurrent turns for the same user
//! must be serialized by the caller; the file store serializes writes
//! behind a mutex but imposes no ordering on turns.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use crate::models::ConversationState;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Keyed conversation persistence.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    async fn load(&self, user_id: &str) -> Result<Option<ConversationState>, StoreError>;
    async fn save(&self, user_id: &str, state: &ConversationState) -> Result<(), StoreError>;
}

/// File-backed store: one pretty-printed JSON file holding a
/// user-id to conversation map.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<HashMap<String, ConversationState>, StoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[async_trait]
impl ConversationStore for JsonFileStore {
    async fn load(&self, user_id: &str) -> Result<Option<ConversationState>, StoreError> {
        let mut all = self.read_all().await?;
        Ok(all.remove(user_id))
    }

    async fn save(&self, user_id: &str, state: &ConversationState) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut all = self.read_all().await?;
        all.insert(user_id.to_string(), state.clone());
        let raw = serde_json::to_string_pretty(&all)?;
        tokio::fs::write(&self.path, raw).await?;
        debug!("saved conversation for user {user_id}");
        Ok(())
    }
}
