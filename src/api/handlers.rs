use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};

use roadmap_core::engine::{self, ValidationReport};
use roadmap_core::models::{DependentEdge, ItemDependencies, StoredRoadmap};
use roadmap_core::parser;

use super::{ApiError, AppState, FILE_NAME_HEADER};

const DEFAULT_FILE_NAME: &str = "uploaded.yaml";

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchResponse {
    pub count: usize,
    pub roadmaps: Vec<StoredRoadmap>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DependenciesResponse {
    pub roadmap_id: String,
    pub roadmap_name: String,
    pub dependencies: Vec<ItemDependencies>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DependentsResponse {
    pub roadmap_id: String,
    pub roadmap_name: String,
    pub dependents: Vec<DependentEdge>,
    pub count: usize,
}

fn file_name(headers: &HeaderMap) -> &str {
    headers
        .get(FILE_NAME_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_FILE_NAME)
}

pub async fn health() -> &'static str {
    "OK"
}

pub async fn ready() -> &'static str {
    "READY"
}

/// POST /api/roadmaps
pub async fn create_roadmap(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<StoredRoadmap>), ApiError> {
    let roadmap = parser::parse_roadmap(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid roadmap: {e}")))?;

    let stored = state.store.create(roadmap, file_name(&headers))?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// POST /api/roadmaps/batch
///
/// Every document must validate before any is stored.
pub async fn create_roadmaps(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<BatchResponse>), ApiError> {
    let roadmaps = parser::parse_roadmaps(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid roadmap file: {e}")))?;

    let base = file_name(&headers);
    let stem = base.strip_suffix(".yaml").unwrap_or(base);

    let mut stored = Vec::with_capacity(roadmaps.len());
    for (index, roadmap) in roadmaps.into_iter().enumerate() {
        let name = roadmap.name.clone();
        let part = format!("{}-part{}.yaml", stem, index + 1);
        let created = state.store.create(roadmap, &part).map_err(|e| {
            ApiError::Internal(e.context(format!(
                "Failed to store roadmap {} ({})",
                index + 1,
                name
            )))
        })?;
        stored.push(created);
    }

    tracing::info!(count = stored.len(), "stored roadmap batch");
    Ok((
        StatusCode::CREATED,
        Json(BatchResponse {
            count: stored.len(),
            roadmaps: stored,
        }),
    ))
}

/// GET /api/roadmaps
pub async fn list_roadmaps(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredRoadmap>>, ApiError> {
    Ok(Json(state.store.list()?))
}

/// GET /api/roadmaps/{id}
pub async fn get_roadmap(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StoredRoadmap>, ApiError> {
    state
        .store
        .get(&id)?
        .map(Json)
        .ok_or_else(ApiError::roadmap_not_found)
}

/// DELETE /api/roadmaps/{id}
pub async fn delete_roadmap(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::roadmap_not_found())
    }
}

/// GET /api/roadmaps/{id}/dependencies
pub async fn get_dependencies(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DependenciesResponse>, ApiError> {
    let stored = state
        .store
        .get(&id)?
        .ok_or_else(ApiError::roadmap_not_found)?;

    Ok(Json(DependenciesResponse {
        dependencies: engine::declared_dependencies(&stored),
        roadmap_id: stored.id,
        roadmap_name: stored.roadmap.name,
    }))
}

/// GET /api/roadmaps/{id}/dependents
///
/// The engine answers an unknown ID with no dependents; this endpoint needs
/// the roadmap's name for its envelope and reports 404 instead.
pub async fn get_dependents(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DependentsResponse>, ApiError> {
    let corpus = state.store.list()?;
    let target = corpus
        .iter()
        .find(|stored| stored.id == id)
        .ok_or_else(ApiError::roadmap_not_found)?;

    let dependents = engine::get_external_dependents(&id, &corpus);
    Ok(Json(DependentsResponse {
        roadmap_id: target.id.clone(),
        roadmap_name: target.roadmap.name.clone(),
        count: dependents.len(),
        dependents,
    }))
}

/// GET /api/dependencies/validate
pub async fn validate_dependencies(
    State(state): State<AppState>,
) -> Result<Json<ValidationReport>, ApiError> {
    let corpus = state.store.list()?;
    Ok(Json(engine::validate_external_dependencies(&corpus).into()))
}
