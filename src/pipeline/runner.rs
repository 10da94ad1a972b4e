//! Sequential task executor
//!
//! A run goes through these phases, strictly in order:
//!
//! ```text
//! RUN_TASKS -> WRITE_MANIFEST -> INSTALL_DEPS -> RUN_POST_HOOKS
//! ```
//!
//! Any task error ends the run before the manifest is written. Installation
//! and hook failures are reported and the run carries on.

use anyhow::Result;
use serde::Serialize;
use thiserror::Error;

use super::context::Context;
use super::installer::Installer;
use crate::cli::Output;
use crate::domain::Dependency;

/// Why a task stopped the run
#[derive(Debug, Error)]
pub enum TaskError {
    /// The project is not in a state wkstd can work with
    #[error("{0}")]
    Fatal(String),

    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("{0}")]
    Precondition(String),

    #[error("Task '{0}' failed")]
    TaskFailed(&'static str),
}

type TaskFn = Box<dyn Fn(&mut Context, &Output) -> Result<(), TaskError>>;

/// One named step of the pipeline
pub struct Task {
    name: &'static str,
    run: TaskFn,
}

impl Task {
    pub fn new(
        name: &'static str,
        run: impl Fn(&mut Context, &Output) -> Result<(), TaskError> + 'static,
    ) -> Self {
        Self {
            name,
            run: Box::new(run),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// What a completed run did
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub manifest_written: bool,
    pub installed: Vec<String>,
    pub install_error: Option<String>,
    pub hook_warnings: Vec<String>,
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        self.install_error.is_none() && self.hook_warnings.is_empty()
    }
}

/// Ordered list of tasks
pub struct Pipeline {
    tasks: Vec<Task>,
}

impl Pipeline {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Runs every task in order, stopping at the first error
    pub fn run_tasks(&self, ctx: &mut Context, output: &Output) -> Result<()> {
        for task in &self.tasks {
            output.debug_ctx("pipeline", &format!("running task '{}'", task.name));

            match (task.run)(ctx, output) {
                Ok(()) => {}
                Err(TaskError::Fatal(reason)) => {
                    return Err(PipelineError::Precondition(reason).into());
                }
                Err(TaskError::Failed(err)) => {
                    return Err(err.context(PipelineError::TaskFailed(task.name)));
                }
            }
        }

        Ok(())
    }

    /// Runs the tasks, then writes the manifest, installs, and runs hooks
    pub fn run(
        &self,
        ctx: &mut Context,
        installer: &dyn Installer,
        output: &Output,
    ) -> Result<RunReport> {
        self.run_tasks(ctx, output)?;

        let mut report = RunReport {
            manifest_written: ctx.manifest.write()?,
            ..RunReport::default()
        };
        if report.manifest_written {
            output.success(&format!("Updated {}", ctx.manifest.path().display()));
        }

        let deps = ctx.dependencies();
        if !deps.is_empty() {
            let names: Vec<&str> = deps.iter().map(|d| d.name.as_str()).collect();
            output.info("Installing dependencies, this may take a while");
            output.info(&format!("Pending: {}", names.join(", ")));

            match installer.install(deps, output) {
                Ok(()) => report.installed = deps.iter().map(Dependency::spec).collect(),
                Err(err) => {
                    output.error(&format!("Dependency installation failed: {:#}", err));
                    report.install_error = Some(format!("{:#}", err));
                }
            }
        }

        for hook in ctx.hooks() {
            output.debug_ctx("pipeline", &format!("running post-install hook '{}'", hook.name));

            if let Err(err) = (hook.run)(output) {
                let message = format!("{}: {:#}", hook.name, err);
                output.warn(&message);
                report.hook_warnings.push(message);
            }
        }

        Ok(report)
    }
}
