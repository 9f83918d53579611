//! SDLC Assist MCP server library.
//!
//! The binary in `main.rs` wires the Supabase store and the Gemini
//! backend into [`tools::SdlcAssistService`] and serves it over stdio.
//! Everything behavioral lives here so tests can drive the service
//! directly against in-memory backends.

pub mod config;
pub mod failure;
pub mod render;
pub mod tools;
