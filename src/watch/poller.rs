//! Polling watcher
//!
//! Synthesizes created/deleted events for databases, groups, and
//! organization members by listing the resource on every poll and diffing
//! the identifier list against the persisted snapshot. The very first poll
//! only seeds the snapshot: emitting "created" for every pre-existing
//! entity would flood the consumer.

use super::diff::diff_snapshots;
use super::snapshot::SnapshotStore;
use crate::api::TursoClient;
use crate::error::{Error, Result};
use crate::types::Record;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

// ============================================================================
// Watched resources and events
// ============================================================================

/// Resource type a watcher polls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchedResource {
    Databases,
    Groups,
    Members,
}

impl WatchedResource {
    /// Field holding the identifier inside one record
    pub fn id_field(self) -> &'static str {
        match self {
            // The databases endpoint capitalizes its field names.
            Self::Databases => "Name",
            Self::Groups => "name",
            Self::Members => "username",
        }
    }

    /// JSON key used for the full entity in a created/added event
    fn entity_key(self) -> &'static str {
        match self {
            Self::Databases => "database",
            Self::Groups => "group",
            Self::Members => "member",
        }
    }

    /// JSON key used for the bare identifier in a deleted/removed event
    fn removed_key(self) -> &'static str {
        match self {
            Self::Databases => "databaseName",
            Self::Groups => "groupName",
            Self::Members => "username",
        }
    }
}

/// Event kind a watcher emits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEvent {
    DatabaseCreated,
    DatabaseDeleted,
    GroupCreated,
    GroupDeleted,
    MemberAdded,
    MemberRemoved,
}

impl WatchEvent {
    /// All supported events, for help text and validation messages
    pub const ALL: [WatchEvent; 6] = [
        Self::DatabaseCreated,
        Self::DatabaseDeleted,
        Self::GroupCreated,
        Self::GroupDeleted,
        Self::MemberAdded,
        Self::MemberRemoved,
    ];

    /// The wire name of this event
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DatabaseCreated => "database.created",
            Self::DatabaseDeleted => "database.deleted",
            Self::GroupCreated => "group.created",
            Self::GroupDeleted => "group.deleted",
            Self::MemberAdded => "member.added",
            Self::MemberRemoved => "member.removed",
        }
    }

    /// The resource this event watches
    pub fn resource(self) -> WatchedResource {
        match self {
            Self::DatabaseCreated | Self::DatabaseDeleted => WatchedResource::Databases,
            Self::GroupCreated | Self::GroupDeleted => WatchedResource::Groups,
            Self::MemberAdded | Self::MemberRemoved => WatchedResource::Members,
        }
    }

    /// Whether this event fires on additions (as opposed to removals)
    fn is_addition(self) -> bool {
        matches!(
            self,
            Self::DatabaseCreated | Self::GroupCreated | Self::MemberAdded
        )
    }
}

impl std::fmt::Display for WatchEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WatchEvent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| Error::InvalidConfigValue {
                field: "event".to_string(),
                message: format!(
                    "unknown event '{s}', expected one of: {}",
                    Self::ALL.map(WatchEvent::as_str).join(", ")
                ),
            })
    }
}

// ============================================================================
// Listing seam
// ============================================================================

/// Source of current resource listings for a watcher.
///
/// `TursoClient` is the real implementation; tests substitute a canned one.
#[async_trait]
pub trait ResourceLister: Send + Sync {
    /// List all records of the given resource (un-paginated endpoints)
    async fn list_records(&self, resource: WatchedResource) -> Result<Vec<Record>>;
}

#[async_trait]
impl ResourceLister for TursoClient {
    async fn list_records(&self, resource: WatchedResource) -> Result<Vec<Record>> {
        match resource {
            WatchedResource::Databases => self.list_database_records(None, None).await,
            WatchedResource::Groups => self.list_group_records().await,
            WatchedResource::Members => self.list_member_records().await,
        }
    }
}

// ============================================================================
// Watcher
// ============================================================================

/// Polls one resource and emits change events
pub struct Watcher<L> {
    lister: L,
    store: SnapshotStore,
    event: WatchEvent,
}

impl<L: ResourceLister> Watcher<L> {
    /// Create a watcher for the given event
    pub fn new(lister: L, store: SnapshotStore, event: WatchEvent) -> Self {
        Self {
            lister,
            store,
            event,
        }
    }

    /// The event this watcher emits
    pub fn event(&self) -> WatchEvent {
        self.event
    }

    /// Run one poll cycle, returning the synthesized events.
    ///
    /// The snapshot is replaced wholesale on every poll, including the
    /// first one (which emits nothing).
    pub async fn poll(&self) -> Result<Vec<Record>> {
        let resource = self.event.resource();
        let records = self.lister.list_records(resource).await?;

        let current: Vec<String> = records
            .iter()
            .filter_map(|r| r.get(resource.id_field()).and_then(Value::as_str))
            .map(str::to_string)
            .collect();

        let previous = self.store.names(resource).await;

        let mut events = Vec::new();
        if previous.is_empty() {
            debug!(event = %self.event, "first observation, seeding snapshot");
        } else {
            let changes = diff_snapshots(&previous, &current);
            let timestamp = Utc::now().to_rfc3339();

            if self.event.is_addition() {
                for name in &changes.added {
                    let entity = records
                        .iter()
                        .find(|r| r.get(resource.id_field()).and_then(Value::as_str) == Some(name))
                        .cloned()
                        .unwrap_or_else(|| json!({ resource.id_field(): name }));
                    events.push(json!({
                        "event": self.event.as_str(),
                        resource.entity_key(): entity,
                        "timestamp": timestamp,
                    }));
                }
            } else {
                for name in &changes.removed {
                    events.push(json!({
                        "event": self.event.as_str(),
                        resource.removed_key(): name,
                        "timestamp": timestamp,
                    }));
                }
            }
        }

        self.store.replace(resource, current).await?;

        debug!(
            event = %self.event,
            emitted = events.len(),
            "poll cycle complete"
        );
        Ok(events)
    }

    /// Poll at a fixed interval, feeding every event to the callback
    pub async fn run<F>(&self, interval: Duration, mut emit: F) -> Result<()>
    where
        F: FnMut(&Record),
    {
        info!(event = %self.event, ?interval, "watching for changes");
        loop {
            for event in self.poll().await? {
                emit(&event);
            }
            tokio::time::sleep(interval).await;
        }
    }
}
