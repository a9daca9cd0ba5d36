use serde::{Deserialize, Serialize};

use super::ExternalDependency;

/// Outcome of resolving one declared external dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationResult {
    /// `roadmap-name:item-id` of the declaring item.
    pub source_reference: String,
    /// `roadmap:item` as declared.
    pub target_reference: String,
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// An item elsewhere in the corpus that depends on the queried roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependentEdge {
    pub source_roadmap_id: String,
    pub source_roadmap_name: String,
    pub source_item_id: String,
    pub source_item_name: String,
    /// Item ID within the queried roadmap.
    pub target_item_id: String,
}

/// The external dependencies one item declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDependencies {
    pub item_id: String,
    pub item_name: String,
    pub external_dependencies: Vec<ExternalDependency>,
}
