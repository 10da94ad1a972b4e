//! wkstd - lint, format and git-hook tooling for JavaScript/TypeScript projects
//!
//! `wkstd init` asks a few questions about a project, then runs an ordered
//! task pipeline that edits `package.json`, writes husky hooks and project
//! settings, installs the packages the tasks asked for, and finally runs
//! post-install hooks such as fetching Gerrit's commit-msg hook.

pub mod domain;
pub mod storage;
pub mod pipeline;
pub mod cli;

pub use domain::{Dependency, InitAnswers};
pub use pipeline::{Context, Pipeline, RunReport};
pub use storage::Manifest;
