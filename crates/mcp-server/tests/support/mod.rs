//! In-memory store and backend fakes for driving the service directly.
//!
//! Both fakes count calls so tests can assert which backends a tool
//! touched (or that validation rejected the call before any I/O).

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use sdlc_estimation::{EstimationError, GenerativeBackend};
use sdlc_mcp::tools::SdlcAssistService;
use sdlc_store::{
    ArtifactCompletion, ArtifactType, EstimationInputs, ProjectFile, ProjectMeta,
    ProjectOverview, ProjectStatus, ProjectStore, Screen, StoreError, StoredArtifact,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailMode {
    Timeout,
    Status(u16),
}

fn store_error(mode: FailMode) -> StoreError {
    match mode {
        FailMode::Timeout => StoreError::Timeout(Duration::from_secs(30)),
        FailMode::Status(status) => StoreError::Api {
            status,
            detail: "injected failure".into(),
        },
    }
}

#[derive(Clone)]
pub struct FakeProject {
    pub meta: ProjectMeta,
    /// Display flags as the status view would report them. Deliberately
    /// independent from `artifacts` so tests can prove the estimation
    /// gate ignores them.
    pub completion: ArtifactCompletion,
    pub artifacts: HashMap<ArtifactType, String>,
    pub screens: Vec<Screen>,
    pub files: Vec<ProjectFile>,
}

impl FakeProject {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            meta: ProjectMeta {
                id: id.to_string(),
                name: name.to_string(),
                status: ProjectStatus::Active,
                created_at: Some("2026-01-10T09:00:00Z".into()),
                updated_at: Some("2026-01-12T09:00:00Z".into()),
                tech_preferences: None,
                tech_preferences_saved_at: None,
                design_system_updated_at: None,
                arch_overview_generated_at: None,
                data_model_generated_at: None,
                api_contract_generated_at: None,
                sequence_diagrams_generated_at: None,
                implementation_plan_generated_at: None,
            },
            completion: ArtifactCompletion::default(),
            artifacts: HashMap::new(),
            screens: Vec::new(),
            files: Vec::new(),
        }
    }

    pub fn with_artifact(mut self, artifact: ArtifactType, content: &str) -> Self {
        self.artifacts.insert(artifact, content.to_string());
        self
    }

    pub fn with_required_artifacts(mut self) -> Self {
        for artifact in sdlc_store::REQUIRED_ARTIFACTS {
            self.artifacts
                .insert(artifact, format!("# {} body", artifact.label()));
        }
        self
    }

    pub fn with_tech_preferences(mut self, prefs: serde_json::Value) -> Self {
        self.meta.tech_preferences = prefs.as_object().cloned();
        self
    }

    pub fn with_screen(mut self, name: &str, epic: &str, html: Option<&str>) -> Self {
        self.screens.push(Screen {
            id: format!("s{}", self.screens.len() + 1),
            name: name.to_string(),
            description: Some(format!("{name} screen")),
            screen_type: Some("page".into()),
            epic_name: Some(epic.to_string()),
            complexity: Some("medium".into()),
            user_role: Some("user".into()),
            notes: None,
            display_order: Some(self.screens.len() as i64 + 1),
            prototype_generated_at: html.map(|_| "2026-01-11T10:00:00Z".into()),
            prototype_content: html.map(str::to_string),
        });
        self
    }
}

#[derive(Default)]
pub struct FakeStore {
    projects: Vec<FakeProject>,
    pub calls: AtomicUsize,
    pub estimation_input_calls: AtomicUsize,
    fail_with: Mutex<Option<FailMode>>,
}

impl FakeStore {
    pub fn with_projects(projects: Vec<FakeProject>) -> Arc<Self> {
        Arc::new(Self {
            projects,
            ..Default::default()
        })
    }

    pub fn fail_next_with(&self, mode: FailMode) {
        *self.fail_with.lock().unwrap() = Some(mode);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_with.lock().unwrap().take() {
            Some(mode) => Err(store_error(mode)),
            None => Ok(()),
        }
    }

    fn project(&self, project_id: &str) -> Option<&FakeProject> {
        self.projects.iter().find(|p| p.meta.id == project_id)
    }
}

#[async_trait]
impl ProjectStore for FakeStore {
    async fn list_projects(
        &self,
        status: Option<ProjectStatus>,
    ) -> Result<Vec<ProjectOverview>, StoreError> {
        self.record_call()?;
        Ok(self
            .projects
            .iter()
            .filter(|p| status.is_none() || status == Some(p.meta.status))
            .map(|p| ProjectOverview {
                id: p.meta.id.clone(),
                name: p.meta.name.clone(),
                status: p.meta.status,
                created_at: p.meta.created_at.clone(),
                updated_at: p.meta.updated_at.clone(),
                completion: p.completion.clone(),
            })
            .collect())
    }

    async fn fetch_project(&self, project_id: &str) -> Result<Option<ProjectMeta>, StoreError> {
        self.record_call()?;
        Ok(self.project(project_id).map(|p| p.meta.clone()))
    }

    async fn fetch_completion(
        &self,
        project_id: &str,
    ) -> Result<Option<ArtifactCompletion>, StoreError> {
        self.record_call()?;
        Ok(self.project(project_id).map(|p| p.completion.clone()))
    }

    async fn fetch_artifact(
        &self,
        project_id: &str,
        artifact: ArtifactType,
    ) -> Result<Option<StoredArtifact>, StoreError> {
        self.record_call()?;
        Ok(self.project(project_id).map(|p| StoredArtifact {
            project_name: p.meta.name.clone(),
            content: p.artifacts.get(&artifact).cloned(),
        }))
    }

    async fn fetch_screens(
        &self,
        project_id: &str,
        include_html: bool,
    ) -> Result<Vec<Screen>, StoreError> {
        self.record_call()?;
        Ok(self
            .project(project_id)
            .map(|p| {
                p.screens
                    .iter()
                    .cloned()
                    .map(|mut screen| {
                        // Mirrors the projection: the column is not part
                        // of the SELECT unless HTML was requested.
                        if !include_html {
                            screen.prototype_content = None;
                        }
                        screen
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn count_screens(&self, project_id: &str) -> Result<usize, StoreError> {
        self.record_call()?;
        Ok(self.project(project_id).map(|p| p.screens.len()).unwrap_or(0))
    }

    async fn fetch_files(&self, project_id: &str) -> Result<Vec<ProjectFile>, StoreError> {
        self.record_call()?;
        Ok(self
            .project(project_id)
            .map(|p| p.files.clone())
            .unwrap_or_default())
    }

    async fn fetch_estimation_inputs(
        &self,
        project_id: &str,
    ) -> Result<Option<EstimationInputs>, StoreError> {
        self.record_call()?;
        self.estimation_input_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.project(project_id).map(|p| EstimationInputs {
            id: p.meta.id.clone(),
            name: p.meta.name.clone(),
            tech_preferences: p.meta.tech_preferences.clone(),
            prd: p.artifacts.get(&ArtifactType::Prd).cloned(),
            architecture: p.artifacts.get(&ArtifactType::Architecture).cloned(),
            data_model: p.artifacts.get(&ArtifactType::DataModel).cloned(),
            api_contract: p.artifacts.get(&ArtifactType::ApiContract).cloned(),
            sequence_diagrams: p.artifacts.get(&ArtifactType::SequenceDiagrams).cloned(),
            implementation_plan: p
                .artifacts
                .get(&ArtifactType::ImplementationPlan)
                .cloned(),
        }))
    }
}

pub enum BackendScript {
    Reply(String),
    Timeout,
    Garbage,
}

pub struct FakeBackend {
    script: BackendScript,
    pub calls: AtomicUsize,
    pub last_context: Mutex<Option<String>>,
}

impl FakeBackend {
    pub fn replying(reply: String) -> Arc<Self> {
        Arc::new(Self {
            script: BackendScript::Reply(reply),
            calls: AtomicUsize::new(0),
            last_context: Mutex::new(None),
        })
    }

    pub fn scripted(script: BackendScript) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: AtomicUsize::new(0),
            last_context: Mutex::new(None),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerativeBackend for FakeBackend {
    async fn generate(&self, _system_prompt: &str, context: &str) -> Result<String, EstimationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_context.lock().unwrap() = Some(context.to_string());
        match &self.script {
            BackendScript::Reply(reply) => Ok(reply.clone()),
            BackendScript::Timeout => Err(EstimationError::Timeout(Duration::from_secs(120))),
            BackendScript::Garbage => Ok("Sorry, I cannot estimate this project.".into()),
        }
    }
}

/// A structurally valid backend reply matching the contracted schema.
pub fn valid_estimation_reply() -> String {
    serde_json::json!({
        "projectName": "Demo",
        "rate": 80,
        "traditionalEstimate": {
            "label": "Traditional SDLC",
            "tasks": [
                {"id": 1, "name": "Requirements", "hours": 188.0, "cost": 15040.0, "breakdown": "4*16+13*4+4*8+40"},
                {"id": 8, "name": "Project Management", "hours": 28.2, "cost": 2256.0, "breakdown": "15% of tasks 1-7"}
            ],
            "totalHours": 216.2,
            "totalCost": 17296.0
        },
        "aiAssistedEstimate": {
            "label": "AI-Assisted SDLC",
            "tasks": [
                {"id": 1, "name": "Requirements", "hours": 0.0, "cost": 0.0, "breakdown": "Automated by SDLC-Assist"}
            ],
            "totalHours": 42.0,
            "totalCost": 3360.0
        },
        "savings": {"hoursSaved": 174.2, "costSaved": 13936.0, "percentReduction": 81.0},
        "assumptions": ["Fixed $80/hour rate"]
    })
    .to_string()
}

pub fn service(store: Arc<FakeStore>, backend: Arc<FakeBackend>) -> SdlcAssistService {
    SdlcAssistService::new(store, backend)
}

/// First text block of a tool result.
pub fn result_text(result: &rmcp::model::CallToolResult) -> String {
    result
        .content
        .first()
        .and_then(|c| c.as_text())
        .map(|t| t.text.clone())
        .unwrap_or_default()
}
