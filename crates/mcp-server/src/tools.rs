//! MCP tools for SDLC Assist.
//!
//! Six read-only tools over the project store plus one delegated
//! estimation. Argument validation happens here, before any backend
//! I/O; handlers fetch through the [`ProjectStore`] seam and render
//! results with [`crate::render`]. Domain failures come back as error
//! tool results carrying one typed condition (see [`ToolFailure`]).

use std::str::FromStr;
use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;

use sdlc_estimation::{
    build_context, missing_required_artifacts, parse_estimation, GenerativeBackend,
    ESTIMATION_SYSTEM_PROMPT,
};
use sdlc_store::{ArtifactType, ProjectStatus, ProjectStore};

use crate::failure::ToolFailure;
use crate::render;

/// SDLC Assist MCP service.
#[derive(Clone)]
pub struct SdlcAssistService {
    store: Arc<dyn ProjectStore>,
    backend: Arc<dyn GenerativeBackend>,
    tool_router: ToolRouter<Self>,
}

impl SdlcAssistService {
    pub fn new(store: Arc<dyn ProjectStore>, backend: Arc<dyn GenerativeBackend>) -> Self {
        Self {
            store,
            backend,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_handler]
impl ServerHandler for SdlcAssistService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "SDLC Assist exposes read-only access to software-delivery projects. \
                 Use 'list_projects' to discover project IDs, 'get_project_summary' for \
                 one project's artifact status, 'get_artifact' for document content, \
                 'get_screens' for the UI screen inventory, 'get_tech_preferences' for \
                 stack choices, and 'generate_estimation' for a Traditional vs \
                 AI-Assisted cost estimate (requires all core artifacts to exist)."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }
}

// ============================================================================
// Tool input schemas
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListProjectsRequest {
    /// Optional lifecycle filter.
    #[schemars(
        description = "Filter projects by status. Valid values: 'DRAFT', 'ACTIVE', 'COMPLETED', 'ARCHIVED'. Omit to return all projects."
    )]
    pub status_filter: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetProjectSummaryRequest {
    #[schemars(description = "UUID of the project. Get this from the list_projects tool.")]
    pub project_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetArtifactRequest {
    #[schemars(description = "UUID of the project. Get this from the list_projects tool.")]
    pub project_id: String,

    #[schemars(
        description = "The artifact to retrieve. One of: 'prd', 'design_system', 'architecture', 'data_model', 'api_contract', 'sequence_diagrams', 'implementation_plan', 'claude_md', 'corporate_guidelines'."
    )]
    pub artifact_type: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetScreensRequest {
    #[schemars(description = "UUID of the project. Get this from the list_projects tool.")]
    pub project_id: String,

    /// HTML prototypes can be very large; they are fetched and returned
    /// only on request.
    #[serde(default)]
    #[schemars(
        description = "If true, include the full HTML prototype content for each screen (default false)."
    )]
    pub include_html: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetTechPreferencesRequest {
    #[schemars(description = "UUID of the project. Get this from the list_projects tool.")]
    pub project_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GenerateEstimationRequest {
    #[schemars(
        description = "UUID of the project to estimate. Requires the PRD, architecture, data model, API contract and implementation plan artifacts to exist."
    )]
    pub project_id: String,
}

// ============================================================================
// Tools
// ============================================================================

#[tool_router]
impl SdlcAssistService {
    #[tool(
        description = "List all SDLC Assist projects with status and per-artifact completion. Use this first to discover project IDs for the other tools."
    )]
    pub async fn list_projects(
        &self,
        Parameters(request): Parameters<ListProjectsRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.list_projects_impl(request).await)
    }

    #[tool(
        description = "Detailed summary of one project: artifact completion, tech preferences, screen and file counts. Does not return artifact content; use get_artifact for that."
    )]
    pub async fn get_project_summary(
        &self,
        Parameters(request): Parameters<GetProjectSummaryRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.get_project_summary_impl(request).await)
    }

    #[tool(
        description = "Fetch the full content of one artifact (PRD, architecture overview, data model, API contract, sequence diagrams, implementation plan, CLAUDE.md or corporate guidelines)."
    )]
    pub async fn get_artifact(
        &self,
        Parameters(request): Parameters<GetArtifactRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.get_artifact_impl(request).await)
    }

    #[tool(
        description = "List the UI screens defined for a project with their metadata, grouped by epic. Optionally includes HTML prototype content."
    )]
    pub async fn get_screens(
        &self,
        Parameters(request): Parameters<GetScreensRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.get_screens_impl(request).await)
    }

    #[tool(description = "Fetch the technology stack preferences chosen for a project.")]
    pub async fn get_tech_preferences(
        &self,
        Parameters(request): Parameters<GetTechPreferencesRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.get_tech_preferences_impl(request).await)
    }

    #[tool(
        description = "Generate a Traditional vs AI-Assisted cost estimate for a project from its artifacts. All core artifacts (PRD, architecture, data model, API contract, implementation plan) must exist first."
    )]
    pub async fn generate_estimation(
        &self,
        Parameters(request): Parameters<GenerateEstimationRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.generate_estimation_impl(request).await)
    }
}

fn respond(outcome: Result<String, ToolFailure>) -> Result<CallToolResult, McpError> {
    Ok(match outcome {
        Ok(document) => CallToolResult::success(vec![Content::text(document)]),
        Err(failure) => failure.into_call_result(),
    })
}

// ============================================================================
// Handlers
// ============================================================================

impl SdlcAssistService {
    async fn list_projects_impl(&self, request: ListProjectsRequest) -> Result<String, ToolFailure> {
        let status = parse_status_filter(request.status_filter.as_deref())?;
        let projects = self.store.list_projects(status).await?;
        Ok(render::project_list(&projects))
    }

    async fn get_project_summary_impl(
        &self,
        request: GetProjectSummaryRequest,
    ) -> Result<String, ToolFailure> {
        let project_id = parse_project_id(&request.project_id)?;

        let meta = self
            .store
            .fetch_project(&project_id)
            .await?
            .ok_or_else(|| project_not_found(&project_id))?;

        // Independent reads; await them jointly.
        let (completion, screen_count, files) = tokio::join!(
            self.store.fetch_completion(&project_id),
            self.store.count_screens(&project_id),
            self.store.fetch_files(&project_id),
        );
        let completion = completion?.unwrap_or_default();
        let screen_count = screen_count?;
        let files = files?;

        Ok(render::project_summary(&meta, &completion, screen_count, &files))
    }

    async fn get_artifact_impl(&self, request: GetArtifactRequest) -> Result<String, ToolFailure> {
        // Both arguments are checked before the store sees anything.
        let artifact = parse_artifact_type(&request.artifact_type)?;
        let project_id = parse_project_id(&request.project_id)?;

        let stored = self
            .store
            .fetch_artifact(&project_id, artifact)
            .await?
            .ok_or_else(|| project_not_found(&project_id))?;

        let content = stored.content.ok_or_else(|| {
            ToolFailure::NotFound(format!(
                "the {} artifact has not been generated yet for project '{}'; \
                 generate it in the SDLC Assist application first",
                artifact.label(),
                stored.project_name
            ))
        })?;

        Ok(render::artifact(artifact, &stored.project_name, &content))
    }

    async fn get_screens_impl(&self, request: GetScreensRequest) -> Result<String, ToolFailure> {
        let project_id = parse_project_id(&request.project_id)?;

        let meta = self
            .store
            .fetch_project(&project_id)
            .await?
            .ok_or_else(|| project_not_found(&project_id))?;

        let screens = self
            .store
            .fetch_screens(&project_id, request.include_html)
            .await?;

        Ok(render::screens(&meta.name, &screens, request.include_html))
    }

    async fn get_tech_preferences_impl(
        &self,
        request: GetTechPreferencesRequest,
    ) -> Result<String, ToolFailure> {
        let project_id = parse_project_id(&request.project_id)?;

        let meta = self
            .store
            .fetch_project(&project_id)
            .await?
            .ok_or_else(|| project_not_found(&project_id))?;

        // Unset preferences are a normal state, rendered as such.
        Ok(render::tech_preferences(&meta))
    }

    async fn generate_estimation_impl(
        &self,
        request: GenerateEstimationRequest,
    ) -> Result<String, ToolFailure> {
        let project_id = parse_project_id(&request.project_id)?;

        // Gathering: one batched content read for the gate and payload.
        let inputs = self
            .store
            .fetch_estimation_inputs(&project_id)
            .await?
            .ok_or_else(|| project_not_found(&project_id))?;

        // Validating: recomputed from row content, never from the
        // display flags, and reporting every gap at once.
        let missing = missing_required_artifacts(&inputs);
        if !missing.is_empty() {
            return Err(ToolFailure::PreconditionFailed(missing));
        }

        let screens = self.store.fetch_screens(&project_id, false).await?;
        let context = build_context(&inputs, &screens);

        // Delegating: one attempt, no retry loop.
        log::info!(
            "delegating estimation for project {} ({} screens)",
            inputs.id,
            screens.len()
        );
        let raw = self
            .backend
            .generate(ESTIMATION_SYSTEM_PROMPT, &context)
            .await?;

        let result = parse_estimation(&raw)?;
        serde_json::to_string_pretty(&result)
            .map_err(|e| ToolFailure::InvalidResponse(format!("result serialization failed: {e}")))
    }
}

// ============================================================================
// Argument validation
// ============================================================================

fn parse_project_id(raw: &str) -> Result<String, ToolFailure> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ToolFailure::InvalidArgument(
            "project_id must be a non-empty project UUID; use list_projects to discover IDs"
                .to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

fn parse_artifact_type(raw: &str) -> Result<ArtifactType, ToolFailure> {
    ArtifactType::from_str(raw.trim()).map_err(|_| {
        let valid: Vec<&str> = ArtifactType::ALL.iter().map(|t| t.as_str()).collect();
        ToolFailure::InvalidArgument(format!(
            "unknown artifact_type '{raw}'; valid values: {}",
            valid.join(", ")
        ))
    })
}

fn parse_status_filter(raw: Option<&str>) -> Result<Option<ProjectStatus>, ToolFailure> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => ProjectStatus::from_str(value).map(Some).map_err(|_| {
            ToolFailure::InvalidArgument(format!(
                "unknown status_filter '{value}'; valid values: DRAFT, ACTIVE, COMPLETED, ARCHIVED"
            ))
        }),
    }
}

fn project_not_found(project_id: &str) -> ToolFailure {
    ToolFailure::NotFound(format!(
        "no project found with ID '{project_id}'; use list_projects to see available project IDs"
    ))
}
