//! The outbound sync queue.
//!
//! Closed operations wait here until `opslog sync` pushes them to the remote
//! mirror. The queue is its own document, deliberately decoupled from the
//! interactive history: the mirror is an eventually-consistent copy, never a
//! source of truth.

use crate::libs::data_storage::DataStorage;
use crate::libs::operation::Operation;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub const QUEUE_FILE_NAME: &str = "sync_queue.json";

pub struct SyncQueue {
    path: PathBuf,
    items: Vec<Operation>,
}

impl SyncQueue {
    pub fn load() -> Result<Self> {
        let path = DataStorage::new().get_path(QUEUE_FILE_NAME)?;
        if !path.exists() {
            return Ok(SyncQueue { path, items: Vec::new() });
        }
        let raw = fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
        let items = serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(SyncQueue { path, items })
    }

    pub fn save(&self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.items)?;
        fs::write(&self.path, raw).with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }

    pub fn push(&mut self, operation: Operation) {
        self.items.push(operation);
    }

    /// Takes every queued item, leaving the queue empty; items that fail to
    /// push are handed back with `requeue`.
    pub fn take_all(&mut self) -> Vec<Operation> {
        std::mem::take(&mut self.items)
    }

    pub fn requeue(&mut self, operation: Operation) {
        self.items.push(operation);
    }

    pub fn items(&self) -> &[Operation] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
