//! Roadmap visualizer server.
//!
//! Front ends over [`roadmap_core`]: the HTTP API, the stdio MCP server and
//! the offline `check` command. Each request loads a fresh snapshot from the
//! configured store and hands it to the dependency engine.

pub mod api;
pub mod check;
pub mod config;
pub mod mcp;
