//! Cross-roadmap dependency engine.
//!
//! Every entry point takes the corpus as a borrowed snapshot and builds its
//! lookup maps from scratch. Nothing is cached between calls, so a pass only
//! ever sees the documents it was handed.

mod dependents;
mod index;
mod resolve;

pub use dependents::{declared_dependencies, get_external_dependents};
pub use index::CorpusIndex;
pub use resolve::{validate_external_dependencies, ResolutionError, ValidationReport};
