//! # Initialization Pipeline
//!
//! `wkstd init` is an ordered list of [`Task`]s sharing one [`Context`].
//! Tasks mutate the manifest, queue dependencies and register post-install
//! hooks. [`Pipeline::run`] then writes `package.json`, hands the queued
//! dependencies to an [`Installer`], and runs the hooks.
//!
//! ## Failure handling
//!
//! | Phase | On failure |
//! |-------|------------|
//! | Tasks | Run aborts, manifest is not written |
//! | Install | Reported, manifest stays written, hooks still run |
//! | Hooks | Reported as a warning, next hook runs |

mod context;
mod installer;
mod runner;
pub mod tasks;

pub use context::{Context, PostInstallHook};
pub use installer::{InstallError, Installer, PackageManager, PackageManagerKind, SkipInstall};
pub use runner::{Pipeline, PipelineError, RunReport, Task, TaskError};

impl Pipeline {
    /// The pipeline `wkstd init` runs
    pub fn standard() -> Self {
        Self::new(tasks::standard())
    }
}
