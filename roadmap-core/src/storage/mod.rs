//! Storage backends for roadmap documents.
//!
//! Backends own all synchronization. The engine only ever sees the snapshot
//! returned by [`RoadmapStore::list`].

mod file;

pub use file::FileStore;

use anyhow::Result;

use crate::models::{Roadmap, StoredRoadmap};

/// A collection of validated roadmaps supporting create, read and delete.
///
/// Roadmaps are immutable once stored; there is no update.
pub trait RoadmapStore: Send + Sync {
    /// Store a validated roadmap under a freshly assigned ID.
    fn create(&self, roadmap: Roadmap, file_name: &str) -> Result<StoredRoadmap>;

    fn get(&self, id: &str) -> Result<Option<StoredRoadmap>>;

    /// Every stored roadmap, ordered by creation time then ID.
    fn list(&self) -> Result<Vec<StoredRoadmap>>;

    /// Returns `false` when no roadmap had this ID.
    fn delete(&self, id: &str) -> Result<bool>;
}

pub(crate) fn sort_snapshot(roadmaps: &mut [StoredRoadmap]) {
    roadmaps.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}
