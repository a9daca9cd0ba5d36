use super::CorpusIndex;
use crate::models::{DependentEdge, ItemDependencies, StoredRoadmap};

/// Find items in other roadmaps whose external dependencies point at
/// `target_roadmap_id`.
///
/// A dependency matches when its roadmap ID equals the target ID or its
/// roadmap name equals the target's current name. The target roadmap is
/// never scanned, so self-references are not reported. An unknown target
/// yields an empty list. Target item IDs are not checked here.
pub fn get_external_dependents(
    target_roadmap_id: &str,
    corpus: &[StoredRoadmap],
) -> Vec<DependentEdge> {
    let index = CorpusIndex::build(corpus);
    let Some(target) = index.roadmap_by_id(target_roadmap_id) else {
        tracing::debug!(roadmap_id = target_roadmap_id, "dependents requested for unknown roadmap");
        return Vec::new();
    };

    let mut dependents = Vec::new();
    for stored in corpus.iter().filter(|r| r.id != target.id) {
        for item in &stored.roadmap.items {
            for dep in &item.external_dependencies {
                let by_id = dep.target_roadmap_id.as_deref() == Some(target_roadmap_id);
                let by_name = dep.target_roadmap_name.as_deref() == Some(target.name());
                if by_id || by_name {
                    dependents.push(DependentEdge {
                        source_roadmap_id: stored.id.clone(),
                        source_roadmap_name: stored.name().to_string(),
                        source_item_id: item.id.clone(),
                        source_item_name: item.name.clone(),
                        target_item_id: dep.target_item_id.clone(),
                    });
                }
            }
        }
    }

    dependents
}

/// The external dependencies each item of one roadmap declares, skipping
/// items that declare none.
pub fn declared_dependencies(stored: &StoredRoadmap) -> Vec<ItemDependencies> {
    stored
        .roadmap
        .items
        .iter()
        .filter(|item| !item.external_dependencies.is_empty())
        .map(|item| ItemDependencies {
            item_id: item.id.clone(),
            item_name: item.name.clone(),
            external_dependencies: item.external_dependencies.clone(),
        })
        .collect()
}
