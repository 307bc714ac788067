//! Change detection for Turso platform resources
//!
//! A [`Watcher`] periodically lists a resource, compares the identifier
//! set against the snapshot of the previous poll, and synthesizes
//! created/deleted events for the differences. Snapshots persist through
//! a [`SnapshotStore`] so a restarted watcher does not re-announce
//! entities it has already seen.

mod diff;
mod poller;
mod snapshot;

pub use diff::{diff_snapshots, ChangeSet};
pub use poller::{ResourceLister, WatchEvent, WatchedResource, Watcher};
pub use snapshot::{SnapshotStore, WatchState};
