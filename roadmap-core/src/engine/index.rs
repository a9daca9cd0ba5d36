use std::collections::HashMap;

use crate::models::{Item, StoredRoadmap};

/// Lookup maps over one corpus snapshot.
///
/// Roadmap names are not unique. When several roadmaps share a name, the
/// one appearing last in the snapshot is the one found by name.
#[derive(Debug, Default)]
pub struct CorpusIndex<'a> {
    by_id: HashMap<&'a str, &'a StoredRoadmap>,
    by_name: HashMap<&'a str, &'a StoredRoadmap>,
    items: HashMap<&'a str, HashMap<&'a str, &'a Item>>,
}

impl<'a> CorpusIndex<'a> {
    pub fn build(corpus: &'a [StoredRoadmap]) -> Self {
        let mut index = Self {
            by_id: HashMap::with_capacity(corpus.len()),
            by_name: HashMap::with_capacity(corpus.len()),
            items: HashMap::with_capacity(corpus.len()),
        };

        for stored in corpus {
            index.by_id.insert(stored.id.as_str(), stored);
            index.by_name.insert(stored.name(), stored);
            let items = stored
                .roadmap
                .items
                .iter()
                .map(|item| (item.id.as_str(), item))
                .collect();
            index.items.insert(stored.id.as_str(), items);
        }

        index
    }

    pub fn roadmap_by_id(&self, id: &str) -> Option<&'a StoredRoadmap> {
        self.by_id.get(id).copied()
    }

    pub fn roadmap_by_name(&self, name: &str) -> Option<&'a StoredRoadmap> {
        self.by_name.get(name).copied()
    }

    pub fn item(&self, roadmap_id: &str, item_id: &str) -> Option<&'a Item> {
        self.items.get(roadmap_id)?.get(item_id).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemStatus, Roadmap};

    fn stored(id: &str, name: &str, items: &[&str]) -> StoredRoadmap {
        let mut stored = StoredRoadmap::new(
            Roadmap {
                name: name.to_string(),
                service_line: "platform".to_string(),
                owner: None,
                notes: None,
                items: items
                    .iter()
                    .map(|id| Item {
                        id: id.to_string(),
                        name: id.to_uppercase(),
                        start: "2025-Q1".to_string(),
                        end: "2025-Q2".to_string(),
                        status: ItemStatus::Planned,
                        description: None,
                        notes: None,
                        dependencies: Vec::new(),
                        external_dependencies: Vec::new(),
                    })
                    .collect(),
            },
            "test.yaml",
        );
        stored.id = id.to_string();
        stored
    }

    #[test]
    fn indexes_roadmaps_and_items() {
        let corpus = vec![stored("r1", "Alpha", &["a", "b"]), stored("r2", "Beta", &["c"])];
        let index = CorpusIndex::build(&corpus);

        assert_eq!(index.len(), 2);
        assert_eq!(index.roadmap_by_id("r2").map(|r| r.name()), Some("Beta"));
        assert_eq!(index.roadmap_by_name("Alpha").map(|r| r.id.as_str()), Some("r1"));
        assert_eq!(index.item("r1", "b").map(|i| i.name.as_str()), Some("B"));
        assert!(index.item("r2", "a").is_none());
        assert!(index.item("missing", "a").is_none());
    }

    #[test]
    fn duplicate_names_resolve_to_last_indexed() {
        let corpus = vec![stored("first", "Shared", &["a"]), stored("second", "Shared", &["b"])];
        let index = CorpusIndex::build(&corpus);

        assert_eq!(index.roadmap_by_name("Shared").map(|r| r.id.as_str()), Some("second"));
        assert!(index.roadmap_by_id("first").is_some());
    }

    #[test]
    fn empty_corpus_builds_empty_index() {
        let index = CorpusIndex::build(&[]);
        assert!(index.is_empty());
        assert!(index.roadmap_by_name("anything").is_none());
    }
}
