//! SQLite-backed roadmap storage.
//!
//! Each roadmap is kept as its canonical YAML document alongside the
//! columns needed for listing. Documents are re-validated on the way out,
//! so a row edited by hand cannot smuggle an invalid roadmap into a pass.

mod schema;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use directories::ProjectDirs;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::models::{Roadmap, StoredRoadmap};
use crate::parser;
use crate::storage::RoadmapStore;

pub use schema::SCHEMA;

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

/// A `roadmaps` row before its document has been parsed.
struct RoadmapRow {
    id: String,
    file_name: String,
    document: String,
    created_at: String,
    updated_at: String,
}

impl RoadmapRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            file_name: row.get("file_name")?,
            document: row.get("document")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    fn into_stored(self) -> Result<StoredRoadmap> {
        let roadmap = parser::parse_roadmap(self.document.as_bytes())
            .with_context(|| format!("stored document for roadmap {} is invalid", self.id))?;
        Ok(StoredRoadmap {
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
            id: self.id,
            roadmap,
            file_name: self.file_name,
        })
    }
}

fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|at| at.with_timezone(&Utc))
        .with_context(|| format!("invalid timestamp '{s}'"))
}

impl Database {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database {}", path.display()))?;
        tracing::debug!(path = %path.display(), "opened database");
        Ok(Self::from_connection(conn))
    }

    pub fn open_memory() -> Result<Self> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    /// Open the database in the platform data directory.
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "roadmap-visualizer")
            .ok_or_else(|| anyhow!("could not determine a data directory"))?;
        Ok(dirs.data_dir().join("roadmap.db"))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    pub fn migrate(&self) -> Result<()> {
        self.conn
            .lock()
            .execute_batch(SCHEMA)
            .context("failed to apply schema")
    }
}

impl RoadmapStore for Database {
    fn create(&self, roadmap: Roadmap, file_name: &str) -> Result<StoredRoadmap> {
        let stored = StoredRoadmap::new(roadmap, file_name);
        let document = parser::serialize_roadmap(&stored.roadmap)?;

        self.conn.lock().execute(
            "INSERT INTO roadmaps (id, name, service_line, file_name, document, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                stored.id,
                stored.roadmap.name,
                stored.roadmap.service_line,
                stored.file_name,
                document,
                format_timestamp(&stored.created_at),
                format_timestamp(&stored.updated_at),
            ],
        )?;

        tracing::info!(id = %stored.id, name = %stored.name(), "stored roadmap");
        Ok(stored)
    }

    fn get(&self, id: &str) -> Result<Option<StoredRoadmap>> {
        let row = self
            .conn
            .lock()
            .query_row(
                "SELECT id, file_name, document, created_at, updated_at FROM roadmaps WHERE id = ?1",
                params![id],
                RoadmapRow::from_row,
            )
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };
        match row.into_stored() {
            Ok(stored) => Ok(Some(stored)),
            Err(err) => {
                tracing::warn!(id, error = %format!("{err:#}"), "ignoring stored roadmap");
                Ok(None)
            }
        }
    }

    fn list(&self) -> Result<Vec<StoredRoadmap>> {
        let rows = {
            let conn = self.conn.lock();
            let mut stmt = conn.prepare(
                "SELECT id, file_name, document, created_at, updated_at FROM roadmaps
                 ORDER BY created_at, id",
            )?;
            let rows = stmt
                .query_map([], RoadmapRow::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        };

        let mut roadmaps = Vec::with_capacity(rows.len());
        for row in rows {
            match row.into_stored() {
                Ok(stored) => roadmaps.push(stored),
                Err(err) => tracing::warn!(error = %format!("{err:#}"), "skipping stored roadmap"),
            }
        }
        Ok(roadmaps)
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let deleted = self
            .conn
            .lock()
            .execute("DELETE FROM roadmaps WHERE id = ?1", params![id])?;
        if deleted > 0 {
            tracing::info!(id, "deleted roadmap");
        }
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_db() -> Database {
        let db = Database::open_memory().expect("Failed to create test database");
        db.migrate().expect("Failed to migrate test database");
        db
    }

    fn roadmap(name: &str) -> Roadmap {
        let yaml = format!(
            "roadmap:\n  name: {name}\n  service_line: Platform\n  items:\n    - {{id: a, name: A, start: 2025-Q1, end: 2025-Q2, status: blocked}}\n"
        );
        parser::parse_roadmap(yaml.as_bytes()).unwrap()
    }

    #[test]
    fn migrate_is_idempotent() {
        let db = setup_db();
        db.migrate().unwrap();
    }

    #[test]
    fn create_then_get() {
        let db = setup_db();
        let stored = db.create(roadmap("Alpha"), "alpha.yaml").unwrap();

        let fetched = db.get(&stored.id).unwrap().unwrap();

        assert_eq!(fetched.id, stored.id);
        assert_eq!(fetched.roadmap, stored.roadmap);
        assert_eq!(fetched.file_name, "alpha.yaml");
        assert_eq!(
            fetched.created_at.timestamp_micros(),
            stored.created_at.timestamp_micros()
        );
    }

    #[test]
    fn get_unknown_returns_none() {
        let db = setup_db();
        assert!(db.get("nope").unwrap().is_none());
    }

    #[test]
    fn list_returns_all_in_creation_order() {
        let db = setup_db();
        let first = db.create(roadmap("Alpha"), "a.yaml").unwrap();
        let second = db.create(roadmap("Beta"), "b.yaml").unwrap();

        let listed = db.list().unwrap();

        assert_eq!(listed.len(), 2);
        let names: Vec<_> = listed.iter().map(|r| r.name().to_string()).collect();
        if first.created_at.timestamp_micros() == second.created_at.timestamp_micros() {
            assert!(names.contains(&"Alpha".to_string()));
            assert!(names.contains(&"Beta".to_string()));
        } else {
            assert_eq!(names, vec!["Alpha", "Beta"]);
        }
    }

    #[test]
    fn rows_with_invalid_documents_are_skipped() {
        let db = setup_db();
        db.create(roadmap("Alpha"), "a.yaml").unwrap();
        db.conn
            .lock()
            .execute(
                "INSERT INTO roadmaps VALUES ('bad', 'Bad', 'x', 'bad.yaml', 'roadmap: {}', ?1, ?1)",
                params![format_timestamp(&Utc::now())],
            )
            .unwrap();

        let listed = db.list().unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name(), "Alpha");
        assert!(db.get("bad").unwrap().is_none());
    }

    #[test]
    fn delete_reports_whether_a_row_existed() {
        let db = setup_db();
        let stored = db.create(roadmap("Alpha"), "a.yaml").unwrap();

        assert!(db.delete(&stored.id).unwrap());
        assert!(!db.delete(&stored.id).unwrap());
        assert!(db.list().unwrap().is_empty());
    }

    #[test]
    fn file_database_persists_across_opens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("roadmap.db");
        let stored = {
            let db = Database::open(&path).unwrap();
            db.migrate().unwrap();
            db.create(roadmap("Alpha"), "a.yaml").unwrap()
        };

        let db = Database::open(&path).unwrap();
        db.migrate().unwrap();

        assert_eq!(db.get(&stored.id).unwrap().unwrap().roadmap, stored.roadmap);
    }
}
