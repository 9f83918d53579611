//! Domain types for the SDLC project store.
//!
//! The artifact-type enumeration is closed: every tag maps to a known
//! `projects` column. Tool input validation happens against this enum,
//! never against free-form column names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One authored document type within a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactType {
    Prd,
    DesignSystem,
    Architecture,
    DataModel,
    ApiContract,
    SequenceDiagrams,
    ImplementationPlan,
    ClaudeMd,
    CorporateGuidelines,
}

/// Artifact types that must exist (non-empty) before estimation may run,
/// in the order gaps are reported.
pub const REQUIRED_ARTIFACTS: [ArtifactType; 5] = [
    ArtifactType::Prd,
    ArtifactType::Architecture,
    ArtifactType::DataModel,
    ArtifactType::ApiContract,
    ArtifactType::ImplementationPlan,
];

impl ArtifactType {
    pub const ALL: [ArtifactType; 9] = [
        ArtifactType::Prd,
        ArtifactType::DesignSystem,
        ArtifactType::Architecture,
        ArtifactType::DataModel,
        ArtifactType::ApiContract,
        ArtifactType::SequenceDiagrams,
        ArtifactType::ImplementationPlan,
        ArtifactType::ClaudeMd,
        ArtifactType::CorporateGuidelines,
    ];

    /// Wire name used in tool arguments.
    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactType::Prd => "prd",
            ArtifactType::DesignSystem => "design_system",
            ArtifactType::Architecture => "architecture",
            ArtifactType::DataModel => "data_model",
            ArtifactType::ApiContract => "api_contract",
            ArtifactType::SequenceDiagrams => "sequence_diagrams",
            ArtifactType::ImplementationPlan => "implementation_plan",
            ArtifactType::ClaudeMd => "claude_md",
            ArtifactType::CorporateGuidelines => "corporate_guidelines",
        }
    }

    /// Content column in the `projects` table.
    pub fn column(self) -> &'static str {
        match self {
            ArtifactType::Prd => "prd_content",
            ArtifactType::DesignSystem => "design_system_content",
            ArtifactType::Architecture => "arch_overview_content",
            ArtifactType::DataModel => "data_model_content",
            ArtifactType::ApiContract => "api_contract_content",
            ArtifactType::SequenceDiagrams => "sequence_diagrams_content",
            ArtifactType::ImplementationPlan => "implementation_plan_content",
            ArtifactType::ClaudeMd => "claude_md_content",
            ArtifactType::CorporateGuidelines => "corporate_guidelines_content",
        }
    }

    /// Boolean presence column in the `project_artifact_status` view.
    pub fn status_column(self) -> &'static str {
        match self {
            ArtifactType::Prd => "has_prd",
            ArtifactType::DesignSystem => "has_design_system",
            ArtifactType::Architecture => "has_architecture",
            ArtifactType::DataModel => "has_data_model",
            ArtifactType::ApiContract => "has_api_contract",
            ArtifactType::SequenceDiagrams => "has_sequence_diagrams",
            ArtifactType::ImplementationPlan => "has_implementation_plan",
            ArtifactType::ClaudeMd => "has_claude_md",
            ArtifactType::CorporateGuidelines => "has_corporate_guidelines",
        }
    }

    /// Generation timestamp column, where the schema tracks one.
    pub fn generated_at_column(self) -> Option<&'static str> {
        match self {
            ArtifactType::DesignSystem => Some("design_system_updated_at"),
            ArtifactType::Architecture => Some("arch_overview_generated_at"),
            ArtifactType::DataModel => Some("data_model_generated_at"),
            ArtifactType::ApiContract => Some("api_contract_generated_at"),
            ArtifactType::SequenceDiagrams => Some("sequence_diagrams_generated_at"),
            ArtifactType::ImplementationPlan => Some("implementation_plan_generated_at"),
            ArtifactType::Prd | ArtifactType::ClaudeMd | ArtifactType::CorporateGuidelines => None,
        }
    }

    /// Human-facing label used in rendered documents.
    pub fn label(self) -> &'static str {
        match self {
            ArtifactType::Prd => "PRD",
            ArtifactType::DesignSystem => "Design System",
            ArtifactType::Architecture => "Architecture Overview",
            ArtifactType::DataModel => "Data Model",
            ArtifactType::ApiContract => "API Contract",
            ArtifactType::SequenceDiagrams => "Sequence Diagrams",
            ArtifactType::ImplementationPlan => "Implementation Plan",
            ArtifactType::ClaudeMd => "CLAUDE.md",
            ArtifactType::CorporateGuidelines => "Corporate Guidelines",
        }
    }

    /// Artifacts stored as JSON documents rather than markdown.
    pub fn is_json_document(self) -> bool {
        matches!(
            self,
            ArtifactType::DesignSystem | ArtifactType::ImplementationPlan
        )
    }
}

impl FromStr for ArtifactType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ArtifactType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Project lifecycle status as stored in `projects.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Draft,
    Active,
    Completed,
    Archived,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Draft => "DRAFT",
            ProjectStatus::Active => "ACTIVE",
            ProjectStatus::Completed => "COMPLETED",
            ProjectStatus::Archived => "ARCHIVED",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(ProjectStatus::Draft),
            "ACTIVE" => Ok(ProjectStatus::Active),
            "COMPLETED" => Ok(ProjectStatus::Completed),
            "ARCHIVED" => Ok(ProjectStatus::Archived),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-artifact presence flags, derived from content columns by the
/// `project_artifact_status` view. Display-only: the estimation gate
/// recomputes presence from the content rows themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactCompletion {
    #[serde(default)]
    pub has_prd: bool,
    #[serde(default)]
    pub has_design_system: bool,
    #[serde(default)]
    pub has_architecture: bool,
    #[serde(default)]
    pub has_data_model: bool,
    #[serde(default)]
    pub has_api_contract: bool,
    #[serde(default)]
    pub has_sequence_diagrams: bool,
    #[serde(default)]
    pub has_implementation_plan: bool,
    #[serde(default)]
    pub has_claude_md: bool,
    #[serde(default)]
    pub has_corporate_guidelines: bool,
}

impl ArtifactCompletion {
    pub fn has(&self, artifact: ArtifactType) -> bool {
        match artifact {
            ArtifactType::Prd => self.has_prd,
            ArtifactType::DesignSystem => self.has_design_system,
            ArtifactType::Architecture => self.has_architecture,
            ArtifactType::DataModel => self.has_data_model,
            ArtifactType::ApiContract => self.has_api_contract,
            ArtifactType::SequenceDiagrams => self.has_sequence_diagrams,
            ArtifactType::ImplementationPlan => self.has_implementation_plan,
            ArtifactType::ClaudeMd => self.has_claude_md,
            ArtifactType::CorporateGuidelines => self.has_corporate_guidelines,
        }
    }

    pub fn completed_count(&self) -> usize {
        ArtifactType::ALL.iter().filter(|t| self.has(**t)).count()
    }

    pub fn total(&self) -> usize {
        ArtifactType::ALL.len()
    }
}

/// Metadata columns of one `projects` row. Never carries content columns.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectMeta {
    pub id: String,
    pub name: String,
    pub status: ProjectStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "tech_preferences_field")]
    pub tech_preferences: Option<Map<String, Value>>,
    #[serde(default)]
    pub tech_preferences_saved_at: Option<String>,
    #[serde(default)]
    pub design_system_updated_at: Option<String>,
    #[serde(default)]
    pub arch_overview_generated_at: Option<String>,
    #[serde(default)]
    pub data_model_generated_at: Option<String>,
    #[serde(default)]
    pub api_contract_generated_at: Option<String>,
    #[serde(default)]
    pub sequence_diagrams_generated_at: Option<String>,
    #[serde(default)]
    pub implementation_plan_generated_at: Option<String>,
}

impl ProjectMeta {
    /// Generation timestamp for an artifact, where the schema tracks one.
    pub fn generated_at(&self, artifact: ArtifactType) -> Option<&str> {
        let ts = match artifact {
            ArtifactType::DesignSystem => &self.design_system_updated_at,
            ArtifactType::Architecture => &self.arch_overview_generated_at,
            ArtifactType::DataModel => &self.data_model_generated_at,
            ArtifactType::ApiContract => &self.api_contract_generated_at,
            ArtifactType::SequenceDiagrams => &self.sequence_diagrams_generated_at,
            ArtifactType::ImplementationPlan => &self.implementation_plan_generated_at,
            _ => &None,
        };
        ts.as_deref()
    }
}

/// One project in the `list_projects` result.
#[derive(Debug, Clone)]
pub struct ProjectOverview {
    pub id: String,
    pub name: String,
    pub status: ProjectStatus,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub completion: ArtifactCompletion,
}

/// One `project_screens` row. `prototype_content` is present only when
/// the caller asked for HTML and the row has one; otherwise the field is
/// omitted from serialized output entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Screen {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub screen_type: Option<String>,
    #[serde(default)]
    pub epic_name: Option<String>,
    #[serde(default)]
    pub complexity: Option<String>,
    #[serde(default)]
    pub user_role: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub display_order: Option<i64>,
    #[serde(default)]
    pub prototype_generated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prototype_content: Option<String>,
}

/// One `project_files` row (name only; content lives in storage buckets).
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectFile {
    pub id: String,
    #[serde(default)]
    pub original_filename: Option<String>,
}

/// Result of a single-artifact fetch: the project resolved, the content
/// may or may not have been authored yet.
#[derive(Debug, Clone)]
pub struct StoredArtifact {
    pub project_name: String,
    pub content: Option<String>,
}

/// The single batched read backing the estimation gate and the context
/// payload: the required artifact bodies plus the optional extras.
#[derive(Debug, Clone, Deserialize)]
pub struct EstimationInputs {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "tech_preferences_field")]
    pub tech_preferences: Option<Map<String, Value>>,
    #[serde(default, rename = "prd_content")]
    pub prd: Option<String>,
    #[serde(default, rename = "arch_overview_content")]
    pub architecture: Option<String>,
    #[serde(default, rename = "data_model_content")]
    pub data_model: Option<String>,
    #[serde(default, rename = "api_contract_content")]
    pub api_contract: Option<String>,
    #[serde(default, rename = "sequence_diagrams_content")]
    pub sequence_diagrams: Option<String>,
    #[serde(default, rename = "implementation_plan_content")]
    pub implementation_plan: Option<String>,
}

impl EstimationInputs {
    /// Body of one of the gate-relevant artifacts.
    pub fn content(&self, artifact: ArtifactType) -> Option<&str> {
        let body = match artifact {
            ArtifactType::Prd => &self.prd,
            ArtifactType::Architecture => &self.architecture,
            ArtifactType::DataModel => &self.data_model,
            ArtifactType::ApiContract => &self.api_contract,
            ArtifactType::SequenceDiagrams => &self.sequence_diagrams,
            ArtifactType::ImplementationPlan => &self.implementation_plan,
            _ => &None,
        };
        body.as_deref()
    }
}

/// `projects.tech_preferences` arrives either as a JSON object or as a
/// JSON-encoded string depending on how the authoring app saved it.
fn tech_preferences_field<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Map<String, Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(map),
        Some(Value::String(text)) => serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|v| v.as_object().cloned()),
        Some(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn artifact_type_round_trips_wire_names() {
        for artifact in ArtifactType::ALL {
            assert_eq!(artifact.as_str().parse::<ArtifactType>(), Ok(artifact));
        }
        assert!("blueprint".parse::<ArtifactType>().is_err());
        assert!("".parse::<ArtifactType>().is_err());
    }

    #[test]
    fn every_artifact_maps_to_a_distinct_column() {
        let mut columns: Vec<&str> = ArtifactType::ALL.iter().map(|t| t.column()).collect();
        columns.sort_unstable();
        columns.dedup();
        assert_eq!(columns.len(), ArtifactType::ALL.len());
    }

    #[test]
    fn required_artifacts_match_the_gate_set() {
        let names: Vec<&str> = REQUIRED_ARTIFACTS.iter().map(|t| t.as_str()).collect();
        assert_eq!(
            names,
            [
                "prd",
                "architecture",
                "data_model",
                "api_contract",
                "implementation_plan"
            ]
        );
    }

    #[test]
    fn tech_preferences_accepts_object_and_encoded_string() {
        let as_object: ProjectMeta = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "name": "One",
            "status": "ACTIVE",
            "tech_preferences": {"database": "Postgres"}
        }))
        .unwrap();
        let as_string: ProjectMeta = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "name": "One",
            "status": "ACTIVE",
            "tech_preferences": "{\"database\": \"Postgres\"}"
        }))
        .unwrap();
        assert_eq!(as_object.tech_preferences, as_string.tech_preferences);
        assert_eq!(
            as_object.tech_preferences.unwrap()["database"],
            Value::String("Postgres".into())
        );
    }

    #[test]
    fn screen_without_prototype_omits_the_field_when_serialized() {
        let screen = Screen {
            id: "s1".into(),
            name: "Login".into(),
            description: None,
            screen_type: None,
            epic_name: None,
            complexity: None,
            user_role: None,
            notes: None,
            display_order: Some(1),
            prototype_generated_at: None,
            prototype_content: None,
        };
        let value = serde_json::to_value(&screen).unwrap();
        assert!(value.get("prototype_content").is_none());
    }
}
