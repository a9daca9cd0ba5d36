use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Item;

/// A validated roadmap: one service line's timeline of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roadmap {
    pub name: String,
    pub service_line: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub items: Vec<Item>,
}

/// A roadmap as held by a storage backend, with its assigned identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRoadmap {
    pub id: String,
    pub roadmap: Roadmap,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub file_name: String,
}

impl StoredRoadmap {
    /// Assign a fresh identity to a validated roadmap.
    pub fn new(roadmap: Roadmap, file_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            roadmap,
            created_at: now,
            updated_at: now,
            file_name: file_name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.roadmap.name
    }
}
