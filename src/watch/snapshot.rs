//! Snapshot persistence
//!
//! The watcher keeps the last-observed identifier lists between polls.
//! `SnapshotStore` persists them as a JSON file with atomic writes, or holds
//! them in memory for tests and one-shot runs.

use super::WatchedResource;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Last-observed identifiers per watched resource
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchState {
    /// Database names from the previous poll
    #[serde(default)]
    pub databases: Vec<String>,

    /// Group names from the previous poll
    #[serde(default)]
    pub groups: Vec<String>,

    /// Member usernames from the previous poll
    #[serde(default)]
    pub members: Vec<String>,

    /// When the last poll completed
    #[serde(default)]
    pub last_poll: Option<DateTime<Utc>>,
}

impl WatchState {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the snapshot for a resource
    pub fn names(&self, resource: WatchedResource) -> &[String] {
        match resource {
            WatchedResource::Databases => &self.databases,
            WatchedResource::Groups => &self.groups,
            WatchedResource::Members => &self.members,
        }
    }

    /// Replace the snapshot for a resource wholesale
    pub fn replace(&mut self, resource: WatchedResource, names: Vec<String>) {
        match resource {
            WatchedResource::Databases => self.databases = names,
            WatchedResource::Groups => self.groups = names,
            WatchedResource::Members => self.members = names,
        }
    }
}

/// Snapshot store for persisting watch state between polls
#[derive(Debug)]
pub struct SnapshotStore {
    /// Path to the state file (empty in memory mode)
    path: PathBuf,
    /// Current state (cached)
    state: Arc<RwLock<WatchState>>,
}

impl SnapshotStore {
    /// Create an in-memory store (no file persistence)
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::new(),
            state: Arc::new(RwLock::new(WatchState::new())),
        }
    }

    /// Create a store backed by a file, loading existing state if present
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| Error::snapshot(format!("Failed to read snapshot file: {e}")))?;
            serde_json::from_str(&contents)
                .map_err(|e| Error::snapshot(format!("Failed to parse snapshot file: {e}")))?
        } else {
            WatchState::new()
        };

        Ok(Self {
            path,
            state: Arc::new(RwLock::new(state)),
        })
    }

    /// Get a copy of the snapshot for a resource
    pub async fn names(&self, resource: WatchedResource) -> Vec<String> {
        self.state.read().await.names(resource).to_vec()
    }

    /// Replace a resource's snapshot, stamp the poll time, and persist
    pub async fn replace(&self, resource: WatchedResource, names: Vec<String>) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.replace(resource, names);
            state.last_poll = Some(Utc::now());
        }
        self.save().await
    }

    /// When the last poll completed
    pub async fn last_poll(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.last_poll
    }

    /// Save current state to the backing file
    pub async fn save(&self) -> Result<()> {
        if self.is_in_memory() {
            return Ok(());
        }

        let contents = {
            let state = self.state.read().await;
            serde_json::to_string_pretty(&*state)
                .map_err(|e| Error::snapshot(format!("Failed to serialize snapshot: {e}")))?
        };

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents)
            .await
            .map_err(|e| Error::snapshot(format!("Failed to write snapshot file: {e}")))?;

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| Error::snapshot(format!("Failed to rename snapshot file: {e}")))?;

        Ok(())
    }

    /// Get the snapshot file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if using in-memory mode
    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str().is_empty()
    }
}

impl Clone for SnapshotStore {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            state: Arc::clone(&self.state),
        }
    }
}
