use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures talking to the project store. All variants mean "couldn't
/// check", never "doesn't exist" — absence is modeled with `Option` on
/// the query surface so callers can't conflate the two.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store timed out after {0:?}")]
    Timeout(Duration),

    #[error("store returned status {status}: {detail}")]
    Api { status: u16, detail: String },

    #[error("store row decode failed: {0}")]
    Decode(String),
}

impl StoreError {
    pub(crate) fn api(status: u16, body: &str) -> Self {
        let detail = if status == 401 {
            "authentication failed; check SUPABASE_SERVICE_ROLE_KEY".to_string()
        } else {
            body.trim().chars().take(300).collect()
        };
        StoreError::Api { status, detail }
    }
}
