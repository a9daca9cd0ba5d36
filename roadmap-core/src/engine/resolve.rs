use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::CorpusIndex;
use crate::models::{ExternalDependency, Item, StoredRoadmap, ValidationResult};

/// Why an external dependency does not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("roadmap with ID '{0}' not found")]
    RoadmapIdNotFound(String),
    #[error("roadmap named '{0}' not found")]
    RoadmapNameNotFound(String),
    #[error("item '{item}' not found in roadmap '{roadmap}'")]
    ItemNotFound { item: String, roadmap: String },
}

/// Resolve every external dependency declared anywhere in the corpus.
///
/// Produces exactly one result per declared dependency, ordered by corpus
/// position, then item position, then dependency position. Dangling
/// references are reported as invalid results, never as errors.
pub fn validate_external_dependencies(corpus: &[StoredRoadmap]) -> Vec<ValidationResult> {
    let index = CorpusIndex::build(corpus);
    let mut results = Vec::new();

    for stored in corpus {
        for item in &stored.roadmap.items {
            for dep in &item.external_dependencies {
                results.push(judge(&index, stored, item, dep));
            }
        }
    }

    tracing::debug!(
        roadmaps = index.len(),
        dependencies = results.len(),
        invalid = results.iter().filter(|r| !r.valid).count(),
        "resolved external dependencies"
    );

    results
}

fn judge(
    index: &CorpusIndex<'_>,
    stored: &StoredRoadmap,
    item: &Item,
    dep: &ExternalDependency,
) -> ValidationResult {
    let error = resolve(index, dep).err().map(|e| e.to_string());
    ValidationResult {
        source_reference: format!("{}:{}", stored.name(), item.id),
        target_reference: dep.declared_reference(),
        valid: error.is_none(),
        error,
    }
}

fn resolve<'a>(
    index: &CorpusIndex<'a>,
    dep: &ExternalDependency,
) -> Result<&'a Item, ResolutionError> {
    let target = match dep.roadmap_id() {
        Some(id) => index
            .roadmap_by_id(id)
            .ok_or_else(|| ResolutionError::RoadmapIdNotFound(id.to_string()))?,
        None => {
            let name = dep.roadmap_name().unwrap_or_default();
            index
                .roadmap_by_name(name)
                .ok_or_else(|| ResolutionError::RoadmapNameNotFound(name.to_string()))?
        }
    };

    index
        .item(&target.id, &dep.target_item_id)
        .ok_or_else(|| ResolutionError::ItemNotFound {
            item: dep.target_item_id.clone(),
            roadmap: target.name().to_string(),
        })
}

/// Counts over one resolution pass, in the shape returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub results: Vec<ValidationResult>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.invalid == 0
    }
}

impl From<Vec<ValidationResult>> for ValidationReport {
    fn from(results: Vec<ValidationResult>) -> Self {
        let valid = results.iter().filter(|r| r.valid).count();
        Self {
            total: results.len(),
            valid,
            invalid: results.len() - valid,
            results,
        }
    }
}
