//! The `ProjectStore` seam and its Supabase-backed implementation.
//!
//! Each method issues the minimal column-projected reads for one tool.
//! Absence is `None`/empty, never an error; every `Err` means the store
//! could not be consulted.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, StoreError};
use crate::postgrest::PostgrestClient;
use crate::types::{
    ArtifactCompletion, ArtifactType, EstimationInputs, ProjectFile, ProjectMeta,
    ProjectOverview, ProjectStatus, Screen, StoredArtifact,
};

/// Project listing never needs more than identity and lifecycle columns.
const PROJECT_LIST_COLUMNS: &str = "id,name,status,created_at,updated_at";

/// Full metadata row for the summary tool. Content columns are excluded
/// on purpose: artifact bodies travel only through `fetch_artifact` and
/// `fetch_estimation_inputs`.
const PROJECT_META_COLUMNS: &str = "id,name,status,created_at,updated_at,\
tech_preferences,tech_preferences_saved_at,\
design_system_updated_at,arch_overview_generated_at,data_model_generated_at,\
api_contract_generated_at,sequence_diagrams_generated_at,implementation_plan_generated_at";

const SCREEN_COLUMNS: &str = "id,name,description,screen_type,epic_name,\
complexity,user_role,notes,display_order,prototype_generated_at";

const SCREEN_ORDER: &str = "display_order.asc.nullsfirst";

const ESTIMATION_COLUMNS: &str = "id,name,tech_preferences,\
prd_content,arch_overview_content,data_model_content,\
api_contract_content,sequence_diagrams_content,implementation_plan_content";

/// Read-only query surface over the project store. The MCP layer talks
/// to this trait; tests substitute an in-memory fake.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// All projects with derived completion flags, newest first.
    async fn list_projects(&self, status: Option<ProjectStatus>) -> Result<Vec<ProjectOverview>>;

    /// Metadata row for one project, or `None` if the id does not resolve.
    async fn fetch_project(&self, project_id: &str) -> Result<Option<ProjectMeta>>;

    /// Derived completion flags for one project.
    async fn fetch_completion(&self, project_id: &str)
        -> Result<Option<ArtifactCompletion>>;

    /// One artifact body. `None` means the project is missing; a present
    /// result with `content: None` means the artifact is unauthored.
    async fn fetch_artifact(
        &self,
        project_id: &str,
        artifact: ArtifactType,
    ) -> Result<Option<StoredArtifact>>;

    /// Screens in stable display order. The prototype column is part of
    /// the SELECT only when `include_html` is set.
    async fn fetch_screens(&self, project_id: &str, include_html: bool) -> Result<Vec<Screen>>;

    /// Number of screens, without transferring screen metadata.
    async fn count_screens(&self, project_id: &str) -> Result<usize>;

    /// Uploaded file records (names only).
    async fn fetch_files(&self, project_id: &str) -> Result<Vec<ProjectFile>>;

    /// The one batched content read backing the estimation gate and the
    /// delegation context payload.
    async fn fetch_estimation_inputs(
        &self,
        project_id: &str,
    ) -> Result<Option<EstimationInputs>>;
}

/// `ProjectStore` over the Supabase PostgREST API.
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    client: PostgrestClient,
}

impl SupabaseStore {
    pub fn new(client: PostgrestClient) -> Self {
        Self { client }
    }

    fn status_view_columns() -> String {
        let mut columns = String::from("project_id");
        for artifact in ArtifactType::ALL {
            columns.push(',');
            columns.push_str(artifact.status_column());
        }
        columns
    }
}

fn eq(value: &str) -> String {
    format!("eq.{value}")
}

fn decode<T: DeserializeOwned>(table: &str, row: Value) -> Result<T> {
    serde_json::from_value(row)
        .map_err(|e| StoreError::Decode(format!("bad row from {table}: {e}")))
}

#[async_trait]
impl ProjectStore for SupabaseStore {
    async fn list_projects(&self, status: Option<ProjectStatus>) -> Result<Vec<ProjectOverview>> {
        let mut filters: Vec<(&str, String)> = Vec::new();
        if let Some(status) = status {
            filters.push(("status", eq(status.as_str())));
        }

        let rows = self
            .client
            .select(
                "projects",
                PROJECT_LIST_COLUMNS,
                &filters,
                Some("created_at.desc"),
                None,
            )
            .await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let metas: Vec<ProjectMeta> = rows
            .into_iter()
            .map(|row| decode("projects", row))
            .collect::<Result<_>>()?;

        // One batched view read for all listed projects.
        let ids: Vec<&str> = metas.iter().map(|m| m.id.as_str()).collect();
        let status_rows = self
            .client
            .select(
                "project_artifact_status",
                &Self::status_view_columns(),
                &[("project_id", format!("in.({})", ids.join(",")))],
                None,
                None,
            )
            .await?;

        let mut by_project: HashMap<String, ArtifactCompletion> = HashMap::new();
        for row in status_rows {
            let project_id = row
                .get("project_id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            by_project.insert(project_id, decode("project_artifact_status", row)?);
        }

        Ok(metas
            .into_iter()
            .map(|meta| {
                let completion = by_project.remove(&meta.id).unwrap_or_default();
                ProjectOverview {
                    id: meta.id,
                    name: meta.name,
                    status: meta.status,
                    created_at: meta.created_at,
                    updated_at: meta.updated_at,
                    completion,
                }
            })
            .collect())
    }

    async fn fetch_project(&self, project_id: &str) -> Result<Option<ProjectMeta>> {
        let row = self
            .client
            .select_single("projects", PROJECT_META_COLUMNS, &[("id", eq(project_id))])
            .await?;
        row.map(|r| decode("projects", r)).transpose()
    }

    async fn fetch_completion(
        &self,
        project_id: &str,
    ) -> Result<Option<ArtifactCompletion>> {
        let row = self
            .client
            .select_single(
                "project_artifact_status",
                &Self::status_view_columns(),
                &[("project_id", eq(project_id))],
            )
            .await?;
        row.map(|r| decode("project_artifact_status", r)).transpose()
    }

    async fn fetch_artifact(
        &self,
        project_id: &str,
        artifact: ArtifactType,
    ) -> Result<Option<StoredArtifact>> {
        let columns = format!("id,name,{}", artifact.column());
        let row = self
            .client
            .select_single("projects", &columns, &[("id", eq(project_id))])
            .await?;

        Ok(row.map(|row| StoredArtifact {
            project_name: row
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            content: row
                .get(artifact.column())
                .and_then(Value::as_str)
                .map(str::to_string),
        }))
    }

    async fn fetch_screens(&self, project_id: &str, include_html: bool) -> Result<Vec<Screen>> {
        let columns = if include_html {
            format!("{SCREEN_COLUMNS},prototype_content")
        } else {
            SCREEN_COLUMNS.to_string()
        };

        let rows = self
            .client
            .select(
                "project_screens",
                &columns,
                &[("project_id", eq(project_id))],
                Some(SCREEN_ORDER),
                None,
            )
            .await?;
        rows.into_iter()
            .map(|row| decode("project_screens", row))
            .collect()
    }

    async fn count_screens(&self, project_id: &str) -> Result<usize> {
        let rows = self
            .client
            .select(
                "project_screens",
                "id",
                &[("project_id", eq(project_id))],
                None,
                None,
            )
            .await?;
        Ok(rows.len())
    }

    async fn fetch_files(&self, project_id: &str) -> Result<Vec<ProjectFile>> {
        let rows = self
            .client
            .select(
                "project_files",
                "id,original_filename",
                &[("project_id", eq(project_id))],
                None,
                None,
            )
            .await?;
        rows.into_iter()
            .map(|row| decode("project_files", row))
            .collect()
    }

    async fn fetch_estimation_inputs(
        &self,
        project_id: &str,
    ) -> Result<Option<EstimationInputs>> {
        let row = self
            .client
            .select_single("projects", ESTIMATION_COLUMNS, &[("id", eq(project_id))])
            .await?;
        row.map(|r| decode("projects", r)).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_selects_never_name_content_columns() {
        for columns in [PROJECT_LIST_COLUMNS, PROJECT_META_COLUMNS, SCREEN_COLUMNS] {
            assert!(
                !columns.contains("_content"),
                "content column leaked into a metadata select: {columns}"
            );
        }
    }

    #[test]
    fn estimation_select_carries_exactly_the_context_columns() {
        for artifact in crate::types::REQUIRED_ARTIFACTS {
            assert!(ESTIMATION_COLUMNS.contains(artifact.column()));
        }
        assert!(ESTIMATION_COLUMNS.contains("sequence_diagrams_content"));
        assert!(!ESTIMATION_COLUMNS.contains("design_system_content"));
        assert!(!ESTIMATION_COLUMNS.contains("claude_md_content"));
    }

    #[test]
    fn status_view_columns_cover_every_artifact() {
        let columns = SupabaseStore::status_view_columns();
        for artifact in ArtifactType::ALL {
            assert!(columns.contains(artifact.status_column()));
        }
    }
}
