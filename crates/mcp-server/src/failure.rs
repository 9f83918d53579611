//! The failure taxonomy surfaced to the calling assistant.
//!
//! Exactly one condition per failed call. `PreconditionFailed` is the
//! only condition carrying multiple findings; everything else reports
//! the first detected cause. Store/backend errors map onto the taxonomy
//! here so handlers never leak transport detail decisions.

use std::fmt;

use rmcp::model::{CallToolResult, Content};
use sdlc_estimation::EstimationError;
use sdlc_store::{ArtifactType, StoreError};

#[derive(Debug)]
pub enum ToolFailure {
    /// The request itself is malformed; no backend was consulted.
    InvalidArgument(String),
    /// The addressed project or artifact does not exist.
    NotFound(String),
    /// The project exists but required artifacts are absent. Carries
    /// the complete gap list.
    PreconditionFailed(Vec<ArtifactType>),
    /// A backend could not be reached or errored; safe to retry the
    /// whole call.
    UpstreamUnavailable(String),
    /// The generative backend replied outside the contracted shape;
    /// retrying the same input is unlikely to help.
    InvalidResponse(String),
}

impl fmt::Display for ToolFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolFailure::InvalidArgument(msg) => write!(f, "InvalidArgument: {msg}"),
            ToolFailure::NotFound(msg) => write!(f, "NotFound: {msg}"),
            ToolFailure::PreconditionFailed(missing) => {
                let names: Vec<&str> = missing.iter().map(|t| t.as_str()).collect();
                write!(
                    f,
                    "PreconditionFailed: missing required artifacts: {}. \
                     Generate these in the SDLC Assist application first.",
                    names.join(", ")
                )
            }
            ToolFailure::UpstreamUnavailable(msg) => write!(f, "UpstreamUnavailable: {msg}"),
            ToolFailure::InvalidResponse(msg) => write!(f, "InvalidResponse: {msg}"),
        }
    }
}

impl ToolFailure {
    pub fn into_call_result(self) -> CallToolResult {
        CallToolResult::error(vec![Content::text(self.to_string())])
    }
}

impl From<StoreError> for ToolFailure {
    fn from(e: StoreError) -> Self {
        ToolFailure::UpstreamUnavailable(e.to_string())
    }
}

impl From<EstimationError> for ToolFailure {
    fn from(e: EstimationError) -> Self {
        match e {
            EstimationError::InvalidResponse { reason, excerpt } => {
                ToolFailure::InvalidResponse(if excerpt.is_empty() {
                    reason
                } else {
                    format!("{reason}; raw reply starts: {excerpt}")
                })
            }
            transient => ToolFailure::UpstreamUnavailable(transient.to_string()),
        }
    }
}
