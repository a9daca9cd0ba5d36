//! Directory-backed roadmap storage.
//!
//! Layout under the data directory:
//!
//! ```text
//! yaml/<id>.yaml   canonical roadmap document
//! meta/<id>.json   StoredRoadmap record
//! ```
//!
//! The metadata file is the source of truth; a roadmap exists exactly when
//! its metadata file does.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use parking_lot::RwLock;
use uuid::Uuid;

use super::{sort_snapshot, RoadmapStore};
use crate::models::{Roadmap, StoredRoadmap};
use crate::parser;

pub struct FileStore {
    data_dir: PathBuf,
    lock: RwLock<()>,
}

impl FileStore {
    /// Open a store rooted at `data_dir`, creating its directories.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        for dir in [data_dir.join("yaml"), data_dir.join("meta")] {
            fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create directory {}", dir.display()))?;
        }
        tracing::debug!(data_dir = %data_dir.display(), "opened file store");

        Ok(Self {
            data_dir,
            lock: RwLock::new(()),
        })
    }

    fn yaml_path(&self, id: &str) -> PathBuf {
        self.data_dir.join("yaml").join(format!("{id}.yaml"))
    }

    fn meta_path(&self, id: &str) -> PathBuf {
        self.data_dir.join("meta").join(format!("{id}.json"))
    }

    fn read_meta(path: &Path) -> Result<StoredRoadmap> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read metadata {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("failed to parse metadata {}", path.display()))
    }
}

/// Store IDs are UUIDs; anything else cannot name a file we wrote.
fn is_store_id(id: &str) -> bool {
    Uuid::parse_str(id).is_ok()
}

/// Write to a sibling temp file, then rename over the target.
fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let temp_path = path.with_extension("tmp");
    {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(contents)?;
        file.sync_all()?;
    }
    fs::rename(&temp_path, path)
}

impl RoadmapStore for FileStore {
    fn create(&self, roadmap: Roadmap, file_name: &str) -> Result<StoredRoadmap> {
        let _guard = self.lock.write();

        let stored = StoredRoadmap::new(roadmap, file_name);
        let yaml = parser::serialize_roadmap(&stored.roadmap)?;
        let yaml_path = self.yaml_path(&stored.id);
        write_atomic(&yaml_path, yaml.as_bytes())
            .with_context(|| format!("failed to write yaml file {}", yaml_path.display()))?;

        let meta = serde_json::to_vec_pretty(&stored).context("failed to serialize metadata")?;
        let meta_path = self.meta_path(&stored.id);
        if let Err(err) = write_atomic(&meta_path, &meta) {
            let _ = fs::remove_file(&yaml_path);
            return Err(err)
                .with_context(|| format!("failed to write metadata file {}", meta_path.display()));
        }

        tracing::info!(id = %stored.id, name = %stored.name(), "stored roadmap");
        Ok(stored)
    }

    fn get(&self, id: &str) -> Result<Option<StoredRoadmap>> {
        if !is_store_id(id) {
            return Ok(None);
        }
        let _guard = self.lock.read();

        let path = self.meta_path(id);
        if !path.exists() {
            return Ok(None);
        }
        Self::read_meta(&path).map(Some)
    }

    fn list(&self) -> Result<Vec<StoredRoadmap>> {
        let _guard = self.lock.read();

        let meta_dir = self.data_dir.join("meta");
        let entries = fs::read_dir(&meta_dir)
            .with_context(|| format!("failed to read metadata directory {}", meta_dir.display()))?;

        let mut roadmaps = Vec::new();
        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable directory entry");
                    continue;
                }
            };
            if !path.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match Self::read_meta(&path) {
                Ok(stored) => roadmaps.push(stored),
                Err(err) => tracing::warn!(error = %format!("{err:#}"), "skipping roadmap metadata"),
            }
        }

        sort_snapshot(&mut roadmaps);
        Ok(roadmaps)
    }

    fn delete(&self, id: &str) -> Result<bool> {
        if !is_store_id(id) {
            return Ok(false);
        }
        let _guard = self.lock.write();

        let meta_path = self.meta_path(id);
        if !meta_path.exists() {
            return Ok(false);
        }

        let yaml_path = self.yaml_path(id);
        match fs::remove_file(&yaml_path) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to delete yaml file {}", yaml_path.display()))
            }
        }
        fs::remove_file(&meta_path)
            .with_context(|| format!("failed to delete metadata file {}", meta_path.display()))?;

        tracing::info!(id, "deleted roadmap");
        Ok(true)
    }
}
