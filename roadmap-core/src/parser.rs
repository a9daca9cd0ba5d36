//! YAML ingestion and serialization of roadmap documents.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::models::{Roadmap, RoadmapFile};

#[derive(Serialize)]
struct RoadmapFileRef<'a> {
    roadmap: &'a Roadmap,
}

/// Parse and validate a single roadmap document.
pub fn parse_roadmap(data: &[u8]) -> Result<Roadmap, ParseError> {
    let file: RoadmapFile = serde_yaml::from_slice(data).map_err(ParseError::Yaml)?;
    Ok(file.roadmap.validate()?)
}

/// Parse and validate a `---` separated stream of roadmap documents.
///
/// The stream is accepted only if every document is valid. Empty documents,
/// such as a trailing `---`, are skipped.
pub fn parse_roadmaps(data: &[u8]) -> Result<Vec<Roadmap>, ParseError> {
    let mut roadmaps = Vec::new();

    for document in serde_yaml::Deserializer::from_slice(data) {
        let number = roadmaps.len() + 1;
        let file = Option::<RoadmapFile>::deserialize(document).map_err(|source| {
            ParseError::YamlDocument {
                document: number,
                source,
            }
        })?;
        let Some(file) = file else {
            continue;
        };

        let name = file.roadmap.name.clone();
        let roadmap = file
            .roadmap
            .validate()
            .map_err(|source| ParseError::InvalidDocument {
                document: number,
                name,
                source,
            })?;
        roadmaps.push(roadmap);
    }

    if roadmaps.is_empty() {
        return Err(ParseError::Empty);
    }

    Ok(roadmaps)
}

/// Render a roadmap in its canonical document form.
pub fn serialize_roadmap(roadmap: &Roadmap) -> Result<String, ParseError> {
    serde_yaml::to_string(&RoadmapFileRef { roadmap }).map_err(ParseError::Serialize)
}
