//! Read-only query adapter for the SDLC Assist project store.
//!
//! Translates tool-level reads into column-projected PostgREST queries
//! against Supabase. Artifact content columns hold full documents, so
//! every query names exactly the columns its caller needs; listing and
//! summary reads never touch content columns at all.

mod error;
mod postgrest;
mod store;
mod types;

pub use error::{Result, StoreError};
pub use postgrest::PostgrestClient;
pub use store::{ProjectStore, SupabaseStore};
pub use types::{
    ArtifactCompletion, ArtifactType, EstimationInputs, ProjectFile, ProjectMeta,
    ProjectOverview, ProjectStatus, Screen, StoredArtifact, REQUIRED_ARTIFACTS,
};
