//! SDLC Assist MCP Server.
//!
//! Read-only MCP tools over SDLC project artifacts stored in Supabase,
//! plus Gemini-delegated cost estimation. Designed for Claude Desktop,
//! Claude Code, or any MCP-compatible client.
//!
//! ## Tools
//!
//! - `list_projects` - all projects with artifact completion status
//! - `get_project_summary` - detailed overview of a single project
//! - `get_artifact` - fetch one artifact document (PRD, data model, ...)
//! - `get_screens` - UI screen inventory, optionally with HTML prototypes
//! - `get_tech_preferences` - chosen tech stack for a project
//! - `generate_estimation` - Traditional vs AI-Assisted cost estimate
//!
//! ## Configuration
//!
//! `SUPABASE_URL`, `SUPABASE_SERVICE_ROLE_KEY` and `GEMINI_API_KEY` are
//! required; see `config.rs` for the optional knobs.

use std::sync::Arc;

use anyhow::Result;
use rmcp::transport::stdio;
use rmcp::ServiceExt;

use sdlc_estimation::{GeminiClient, GeminiConfig};
use sdlc_mcp::config::Config;
use sdlc_mcp::tools::SdlcAssistService;
use sdlc_store::{PostgrestClient, SupabaseStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Logging goes to stderr only; stdout is the MCP transport.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = Config::from_env()?;

    log::info!("Starting SDLC Assist MCP server");

    let client = PostgrestClient::new(
        &config.supabase_url,
        &config.supabase_service_role_key,
        config.read_timeout,
    )?;
    let store = Arc::new(SupabaseStore::new(client));

    let backend = Arc::new(GeminiClient::new(GeminiConfig {
        api_key: config.gemini_api_key.clone(),
        model: config.gemini_model.clone(),
        timeout: config.estimation_timeout,
    })?);

    let service = SdlcAssistService::new(store, backend);
    let server = service.serve(stdio()).await?;

    server.waiting().await?;

    log::info!("SDLC Assist MCP server stopped");
    Ok(())
}
