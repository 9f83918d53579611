//! Estimation delegation for SDLC Assist.
//!
//! Gates estimation on the five required artifacts actually being
//! present (recomputed from content rows, never from display flags),
//! assembles the context payload, and delegates a single synchronous
//! generation call to Gemini, parsing the reply into a strict result
//! shape. One attempt per tool call; retries belong to the caller.

mod context;
mod error;
mod gemini;
mod preconditions;
mod prompt;
mod result;

pub use context::build_context;
pub use error::{EstimationError, Result};
pub use gemini::{GeminiClient, GeminiConfig, GenerativeBackend};
pub use preconditions::missing_required_artifacts;
pub use prompt::ESTIMATION_SYSTEM_PROMPT;
pub use result::{parse_estimation, EstimationResult, PhaseEstimate, PhaseTask, Savings};
