use serde::{Deserialize, Serialize};

/// A reference from an item to an item in another roadmap.
///
/// The target roadmap is named by ID, by name, or both. When both are given
/// the ID wins during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalDependency {
    #[serde(rename = "roadmap", default, skip_serializing_if = "Option::is_none")]
    pub target_roadmap_name: Option<String>,
    #[serde(rename = "roadmap_id", default, skip_serializing_if = "Option::is_none")]
    pub target_roadmap_id: Option<String>,
    #[serde(rename = "item")]
    pub target_item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criticality: Option<Criticality>,
}

impl ExternalDependency {
    /// The declared target roadmap ID, if non-empty.
    pub fn roadmap_id(&self) -> Option<&str> {
        self.target_roadmap_id.as_deref().filter(|id| !id.is_empty())
    }

    /// The declared target roadmap name, if non-empty.
    pub fn roadmap_name(&self) -> Option<&str> {
        self.target_roadmap_name
            .as_deref()
            .filter(|name| !name.is_empty())
    }

    /// `roadmap:item` as written by the author. Falls back to the roadmap ID
    /// when no name was declared.
    pub fn declared_reference(&self) -> String {
        let roadmap = self
            .roadmap_name()
            .or_else(|| self.roadmap_id())
            .unwrap_or_default();
        format!("{}:{}", roadmap, self.target_item_id)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Criticality {
    Low,
    Medium,
    High,
    Critical,
}

impl Criticality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}
