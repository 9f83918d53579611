//! The precondition gate for estimation.

use sdlc_store::{ArtifactType, EstimationInputs, REQUIRED_ARTIFACTS};

/// Required artifact types that are absent or blank for this project,
/// in canonical order. Whitespace-only content counts as missing: a gate
/// decision must not pass on a placeholder row. The complete gap list is
/// computed in one pass so the caller can report every hole at once.
pub fn missing_required_artifacts(inputs: &EstimationInputs) -> Vec<ArtifactType> {
    REQUIRED_ARTIFACTS
        .into_iter()
        .filter(|artifact| {
            inputs
                .content(*artifact)
                .map(str::trim)
                .filter(|body| !body.is_empty())
                .is_none()
        })
        .collect()
}
