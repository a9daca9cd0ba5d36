use thiserror::Error;

/// The first ingestion rule a candidate roadmap violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("roadmap name is required")]
    MissingName,
    #[error("service_line is required")]
    MissingServiceLine,
    #[error("roadmap must have at least one item")]
    NoItems,
    #[error("item {index}: {source}")]
    Item { index: usize, source: ItemError },
    #[error("duplicate item id: {0}")]
    DuplicateItemId(String),
    #[error("item {item}: dependency {dependency} does not exist")]
    UnknownDependency { item: String, dependency: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("item id is required")]
    MissingId,
    #[error("item name is required")]
    MissingName,
    #[error("item start is required")]
    MissingStart,
    #[error("item end is required")]
    MissingEnd,
    #[error("invalid status: {0} (must be planned, in-progress, completed, or blocked)")]
    InvalidStatus(String),
    #[error("external dependency {index}: {source}")]
    ExternalDependency {
        index: usize,
        source: ExternalDependencyError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExternalDependencyError {
    #[error("either roadmap name or roadmap_id is required")]
    MissingTarget,
    #[error("item id is required")]
    MissingItem,
    #[error("invalid criticality '{0}' (must be low, medium, high, or critical)")]
    InvalidCriticality(String),
}

/// Failure to turn uploaded YAML into validated roadmaps.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[source] serde_yaml::Error),
    #[error("failed to parse YAML document {document}: {source}")]
    YamlDocument {
        document: usize,
        source: serde_yaml::Error,
    },
    #[error("validation failed: {0}")]
    Invalid(#[from] ValidationError),
    #[error("validation failed for roadmap {document} ({name}): {source}")]
    InvalidDocument {
        document: usize,
        name: String,
        source: ValidationError,
    },
    #[error("no roadmaps found in file")]
    Empty,
    #[error("failed to serialize YAML: {0}")]
    Serialize(#[source] serde_yaml::Error),
}
