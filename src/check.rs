//! Offline dependency check over local roadmap files.
//!
//! Builds an in-memory corpus from the given files, with freshly assigned
//! IDs, and runs the same resolution pass the server runs.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use roadmap_core::engine::{self, ValidationReport};
use roadmap_core::models::StoredRoadmap;
use roadmap_core::parser;

/// A file that could not be ingested.
#[derive(Debug, Serialize)]
pub struct Rejection {
    pub file: PathBuf,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub roadmaps: usize,
    pub rejected: Vec<Rejection>,
    pub dependencies: ValidationReport,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty() && self.dependencies.is_clean()
    }
}

pub fn check_files(paths: &[PathBuf]) -> CheckReport {
    let mut corpus = Vec::new();
    let mut rejected = Vec::new();

    for path in paths {
        match load(path) {
            Ok(roadmaps) => corpus.extend(roadmaps),
            Err(err) => {
                let error = format!("{err:#}");
                tracing::warn!(file = %path.display(), %error, "rejected roadmap file");
                rejected.push(Rejection {
                    file: path.clone(),
                    error,
                });
            }
        }
    }

    CheckReport {
        roadmaps: corpus.len(),
        rejected,
        dependencies: engine::validate_external_dependencies(&corpus).into(),
    }
}

fn load(path: &Path) -> Result<Vec<StoredRoadmap>> {
    let data = fs::read(path).context("failed to read file")?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    // Parse errors already carry their causes in the message.
    let roadmaps = parser::parse_roadmaps(&data).map_err(anyhow::Error::msg)?;
    Ok(roadmaps
        .into_iter()
        .map(|roadmap| StoredRoadmap::new(roadmap, file_name.clone()))
        .collect())
}
