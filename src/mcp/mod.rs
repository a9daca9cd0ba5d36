use std::sync::Arc;

use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerInfo},
    tool, tool_handler, tool_router,
    schemars::JsonSchema,
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use serde::{Deserialize, Serialize};

use roadmap_core::engine::{self, ValidationReport};
use roadmap_core::models::{DependentEdge, StoredRoadmap};
use roadmap_core::RoadmapStore;

#[derive(Clone)]
pub struct McpServer {
    store: Arc<dyn RoadmapStore>,
    tool_router: ToolRouter<Self>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RoadmapRequest {
    #[schemars(description = "The roadmap ID")]
    pub roadmap_id: String,
}

/// One line per roadmap, without its items.
#[derive(Debug, Serialize)]
pub struct RoadmapSummary {
    pub id: String,
    pub name: String,
    pub service_line: String,
    pub owner: Option<String>,
    pub items: usize,
}

impl From<&StoredRoadmap> for RoadmapSummary {
    fn from(stored: &StoredRoadmap) -> Self {
        Self {
            id: stored.id.clone(),
            name: stored.roadmap.name.clone(),
            service_line: stored.roadmap.service_line.clone(),
            owner: stored.roadmap.owner.clone(),
            items: stored.roadmap.items.len(),
        }
    }
}

impl McpServer {
    pub fn new(store: Arc<dyn RoadmapStore>) -> Self {
        Self {
            store,
            tool_router: Self::tool_router(),
        }
    }

    fn snapshot(&self) -> Result<Vec<StoredRoadmap>, McpError> {
        self.store
            .list()
            .map_err(|e| McpError::internal_error(e.to_string(), None))
    }

    fn summaries(&self) -> Result<Vec<RoadmapSummary>, McpError> {
        Ok(self.snapshot()?.iter().map(RoadmapSummary::from).collect())
    }

    fn roadmap(&self, roadmap_id: &str) -> Result<StoredRoadmap, McpError> {
        self.store
            .get(roadmap_id)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?
            .ok_or_else(|| McpError::invalid_params("Roadmap not found", None))
    }

    fn report(&self) -> Result<ValidationReport, McpError> {
        Ok(engine::validate_external_dependencies(&self.snapshot()?).into())
    }

    fn dependents(&self, roadmap_id: &str) -> Result<Vec<DependentEdge>, McpError> {
        Ok(engine::get_external_dependents(roadmap_id, &self.snapshot()?))
    }

    fn json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_router]
impl McpServer {
    #[tool(description = "List stored roadmaps with their IDs, names and item counts")]
    async fn list_roadmaps(&self) -> Result<CallToolResult, McpError> {
        Self::json(&self.summaries()?)
    }

    #[tool(description = "Get a stored roadmap including all items and dependencies")]
    async fn get_roadmap(
        &self,
        params: Parameters<RoadmapRequest>,
    ) -> Result<CallToolResult, McpError> {
        Self::json(&self.roadmap(&params.0.roadmap_id)?)
    }

    #[tool(description = "Check every external dependency across all roadmaps and report dangling references")]
    async fn validate_dependencies(&self) -> Result<CallToolResult, McpError> {
        Self::json(&self.report()?)
    }

    #[tool(description = "List items in other roadmaps that depend on the given roadmap")]
    async fn get_dependents(
        &self,
        params: Parameters<RoadmapRequest>,
    ) -> Result<CallToolResult, McpError> {
        Self::json(&self.dependents(&params.0.roadmap_id)?)
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some("Roadmap MCP server for cross-roadmap dependency questions".into()),
            ..Default::default()
        }
    }
}

pub async fn run_stdio_server(store: Arc<dyn RoadmapStore>) -> anyhow::Result<()> {
    use tokio::io::{stdin, stdout};

    tracing::info!("Starting MCP server via stdio");

    let service = McpServer::new(store);
    let server = service.serve((stdin(), stdout())).await?;

    let quit_reason = server.waiting().await?;
    tracing::info!("MCP server stopped: {:?}", quit_reason);

    Ok(())
}
