//! Persistence boundary - the external "apply changes" operation

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

/// Partial document update: dotted path → new value
pub type ChangeSet = BTreeMap<String, Value>;

/// Failure reported by the external persistence or roll system
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("document update rejected: {0}")]
    Rejected(String),
    #[error("roll dispatch failed: {0}")]
    Dispatch(String),
    #[error("failed to encode document value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Applies a change set atomically to the character document
#[async_trait]
pub trait Persistence: Send + Sync {
    async fn apply_changes(&self, changes: ChangeSet) -> Result<(), PersistenceError>;
}

/// In-memory document store; records every change set it receives
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<ChangeSet>,
    history: Mutex<Vec<ChangeSet>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value stored at a path
    pub fn get(&self, path: &str) -> Option<Value> {
        self.document
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    /// Number of change sets applied so far
    pub fn update_count(&self) -> usize {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl Persistence for MemoryStore {
    async fn apply_changes(&self, changes: ChangeSet) -> Result<(), PersistenceError> {
        let mut document = self.document.lock().unwrap_or_else(PoisonError::into_inner);
        for (path, value) in &changes {
            document.insert(path.clone(), value.clone());
        }
        drop(document);
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(changes);
        Ok(())
    }
}
