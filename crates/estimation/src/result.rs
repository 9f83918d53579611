//! Strict parsing of the backend reply into the estimation result shape.
//!
//! The backend is treated as untyped: anything that cannot be decoded
//! into the full contracted shape is rejected, never forwarded partial.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EstimationError, Result};

/// Traditional-vs-AI-Assisted estimate, field names matching the wire
/// schema the prompt demands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub generated_at: Option<String>,
    #[serde(default)]
    pub rate: Option<f64>,
    #[serde(default)]
    pub complexity_drivers: Option<Value>,
    pub traditional_estimate: PhaseEstimate,
    pub ai_assisted_estimate: PhaseEstimate,
    pub savings: Savings,
    #[serde(default)]
    pub assumptions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseEstimate {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub tasks: Vec<PhaseTask>,
    pub total_hours: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseTask {
    pub id: u32,
    pub name: String,
    pub hours: f64,
    pub cost: f64,
    #[serde(default)]
    pub breakdown: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Savings {
    pub hours_saved: f64,
    pub cost_saved: f64,
    pub percent_reduction: f64,
    #[serde(default)]
    pub narrative: Option<String>,
}

/// Parse the raw backend reply. Tolerates a fenced or prefixed JSON
/// object; fails closed on anything that does not decode into the full
/// result shape.
pub fn parse_estimation(raw: &str) -> Result<EstimationResult> {
    let candidate = extract_json_object(raw)
        .ok_or_else(|| EstimationError::invalid_response("no JSON object in reply", raw))?;

    serde_json::from_str(candidate)
        .map_err(|e| EstimationError::invalid_response(format!("schema mismatch: {e}"), raw))
}

/// Slice out the outermost `{...}` of the reply, stripping code fences
/// and any prose the model wrapped around it.
fn extract_json_object(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    (end > start).then(|| &trimmed[start..=end])
}
