use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EstimationError>;

#[derive(Error, Debug)]
pub enum EstimationError {
    #[error("estimation backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("estimation backend timed out after {0:?}")]
    Timeout(Duration),

    #[error("estimation backend returned status {status}: {detail}")]
    Api { status: u16, detail: String },

    /// The backend replied, but not in the contracted shape. Retrying
    /// with the same input is unlikely to help.
    #[error("estimation reply could not be parsed: {reason}")]
    InvalidResponse { reason: String, excerpt: String },
}

impl EstimationError {
    pub fn invalid_response(reason: impl Into<String>, raw: &str) -> Self {
        EstimationError::InvalidResponse {
            reason: reason.into(),
            excerpt: raw.trim().chars().take(2000).collect(),
        }
    }

    /// True when the failure is transient and the whole tool call may be
    /// retried as-is.
    pub fn is_transient(&self) -> bool {
        !matches!(self, EstimationError::InvalidResponse { .. })
    }
}
