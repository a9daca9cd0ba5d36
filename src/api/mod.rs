//! HTTP API over the roadmap store and dependency engine.

mod error;
mod handlers;

use std::sync::Arc;

use axum::http::{header, HeaderName, Method};
use axum::routing::{get, post};
use axum::Router;
use roadmap_core::RoadmapStore;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use handlers::{BatchResponse, DependenciesResponse, DependentsResponse};

/// Header carrying the uploaded file's original name.
pub const FILE_NAME_HEADER: &str = "x-file-name";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RoadmapStore>,
}

pub fn create_router(store: Arc<dyn RoadmapStore>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(FILE_NAME_HEADER)]);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready))
        .route(
            "/api/roadmaps",
            get(handlers::list_roadmaps).post(handlers::create_roadmap),
        )
        .route("/api/roadmaps/batch", post(handlers::create_roadmaps))
        .route(
            "/api/roadmaps/{id}",
            get(handlers::get_roadmap).delete(handlers::delete_roadmap),
        )
        .route(
            "/api/roadmaps/{id}/dependencies",
            get(handlers::get_dependencies),
        )
        .route("/api/roadmaps/{id}/dependents", get(handlers::get_dependents))
        .route(
            "/api/dependencies/validate",
            get(handlers::validate_dependencies),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(AppState { store })
}
