//! Environment-derived configuration.
//!
//! All values are resolved once at startup; missing required variables
//! fail fast with a message naming the variable.

use std::env;
use std::time::Duration;

use anyhow::{bail, Context, Result};

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;
const DEFAULT_ESTIMATION_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_service_role_key: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    /// Timeout for metadata/document reads against the store.
    pub read_timeout: Duration,
    /// Timeout for the delegation call; independent of `read_timeout`
    /// because estimation carries full artifact bodies.
    pub estimation_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            supabase_url: required(
                "SUPABASE_URL",
                "set it to your Supabase project URL (e.g. https://your-project.supabase.co)",
            )?,
            supabase_service_role_key: required(
                "SUPABASE_SERVICE_ROLE_KEY",
                "find it in Supabase Dashboard > Settings > API > service_role key",
            )?,
            gemini_api_key: required(
                "GEMINI_API_KEY",
                "create one in Google AI Studio and export it",
            )?,
            gemini_model: env::var("GEMINI_MODEL")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            read_timeout: timeout_from("SDLC_READ_TIMEOUT_SECS", DEFAULT_READ_TIMEOUT_SECS)?,
            estimation_timeout: timeout_from(
                "SDLC_ESTIMATION_TIMEOUT_SECS",
                DEFAULT_ESTIMATION_TIMEOUT_SECS,
            )?,
        })
    }
}

fn required(name: &str, hint: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => bail!("{name} environment variable is required; {hint}"),
    }
}

fn timeout_from(name: &str, default_secs: u64) -> Result<Duration> {
    let secs = match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{name} must be a whole number of seconds"))?,
        Err(_) => default_secs,
    };
    if secs == 0 {
        bail!("{name} must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}
