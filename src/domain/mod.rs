//! Domain models for wkstd
//!
//! Contains the core types and tree-walking logic without any I/O concerns.

pub mod json_path;
mod answers;
mod dependency;

pub use answers::{InitAnswers, ModuleType, ProjectType, RuntimeEnvironment, DEFAULT_GERRIT_HOST};
pub use dependency::Dependency;
