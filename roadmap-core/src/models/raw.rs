//! Roadmaps exactly as uploaded, before any ingestion rule has run.
//!
//! Every field is optional or defaulted here so that a document missing a
//! required value still deserializes and reaches [`RawRoadmap::validate`],
//! which reports the violation in a fixed rule order. Only a validated
//! [`Roadmap`] ever enters a store.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Criticality, ExternalDependency, Item, ItemStatus, Roadmap};
use crate::error::{ExternalDependencyError, ItemError, ValidationError};

/// Top-level shape of a roadmap YAML document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoadmapFile {
    #[serde(default)]
    pub roadmap: RawRoadmap,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRoadmap {
    pub name: String,
    pub service_line: String,
    pub owner: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<RawItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawItem {
    pub id: String,
    pub name: String,
    pub start: String,
    pub end: String,
    pub status: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub dependencies: Vec<String>,
    pub external_dependencies: Vec<RawExternalDependency>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawExternalDependency {
    pub roadmap: Option<String>,
    pub roadmap_id: Option<String>,
    pub item: String,
    pub reason: Option<String>,
    pub criticality: Option<String>,
}

impl RawRoadmap {
    /// Apply the ingestion rules and produce a [`Roadmap`].
    ///
    /// Rules run in order: roadmap fields, item presence, each item's own
    /// fields in declaration order, item ID uniqueness, then internal
    /// dependency targets. The first violation is returned and nothing of the
    /// document is kept.
    pub fn validate(self) -> Result<Roadmap, ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.service_line.is_empty() {
            return Err(ValidationError::MissingServiceLine);
        }
        if self.items.is_empty() {
            return Err(ValidationError::NoItems);
        }

        let items = self
            .items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                item.validate()
                    .map_err(|source| ValidationError::Item { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut ids = HashSet::with_capacity(items.len());
        for item in &items {
            if !ids.insert(item.id.as_str()) {
                return Err(ValidationError::DuplicateItemId(item.id.clone()));
            }
        }

        for item in &items {
            if let Some(missing) = item
                .dependencies
                .iter()
                .find(|dep| !ids.contains(dep.as_str()))
            {
                return Err(ValidationError::UnknownDependency {
                    item: item.id.clone(),
                    dependency: missing.clone(),
                });
            }
        }

        Ok(Roadmap {
            name: self.name,
            service_line: self.service_line,
            owner: non_empty(self.owner),
            notes: non_empty(self.notes),
            items,
        })
    }
}

impl RawItem {
    fn validate(self) -> Result<Item, ItemError> {
        if self.id.is_empty() {
            return Err(ItemError::MissingId);
        }
        if self.name.is_empty() {
            return Err(ItemError::MissingName);
        }
        if self.start.is_empty() {
            return Err(ItemError::MissingStart);
        }
        if self.end.is_empty() {
            return Err(ItemError::MissingEnd);
        }
        let status =
            ItemStatus::from_str(&self.status).ok_or(ItemError::InvalidStatus(self.status))?;

        let external_dependencies = self
            .external_dependencies
            .into_iter()
            .enumerate()
            .map(|(index, dep)| {
                dep.validate()
                    .map_err(|source| ItemError::ExternalDependency { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Item {
            id: self.id,
            name: self.name,
            start: self.start,
            end: self.end,
            status,
            description: non_empty(self.description),
            notes: non_empty(self.notes),
            dependencies: self.dependencies,
            external_dependencies,
        })
    }
}

impl RawExternalDependency {
    fn validate(self) -> Result<ExternalDependency, ExternalDependencyError> {
        let target_roadmap_name = non_empty(self.roadmap);
        let target_roadmap_id = non_empty(self.roadmap_id);
        if target_roadmap_name.is_none() && target_roadmap_id.is_none() {
            return Err(ExternalDependencyError::MissingTarget);
        }
        if self.item.is_empty() {
            return Err(ExternalDependencyError::MissingItem);
        }
        let criticality = match non_empty(self.criticality) {
            Some(value) => Some(
                Criticality::from_str(&value)
                    .ok_or(ExternalDependencyError::InvalidCriticality(value))?,
            ),
            None => None,
        };

        Ok(ExternalDependency {
            target_roadmap_name,
            target_roadmap_id,
            target_item_id: self.item,
            reason: non_empty(self.reason),
            criticality,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
