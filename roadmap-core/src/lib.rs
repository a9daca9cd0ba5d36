//! Core library for the roadmap visualizer.
//!
//! This crate owns the roadmap document model, the ingestion rules applied to
//! every uploaded roadmap, and the dependency engine that links items across
//! roadmaps. Storage backends live here too, behind the [`RoadmapStore`]
//! trait, so the HTTP and MCP front ends only ever hand the engine a snapshot.
//!
//! # Usage
//!
//! ```no_run
//! use roadmap_core::engine;
//! use roadmap_core::{FileStore, RoadmapStore};
//!
//! let store = FileStore::open("./data")?;
//! let corpus = store.list()?;
//!
//! let report = engine::ValidationReport::from(engine::validate_external_dependencies(&corpus));
//! println!("{} of {} external dependencies resolve", report.valid, report.total);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod db;
pub mod engine;
pub mod error;
pub mod models;
pub mod parser;
pub mod storage;

// Re-export commonly used types at crate root
pub use db::Database;
pub use error::{ParseError, ValidationError};
pub use storage::{FileStore, RoadmapStore};
