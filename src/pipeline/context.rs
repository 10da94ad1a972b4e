//! State shared by every task of one init run

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cli::Output;
use crate::domain::{Dependency, InitAnswers};
use crate::storage::{Manifest, SETTINGS_FILE};

/// Deferred work run after dependencies are installed
pub type PostInstallHook = Box<dyn Fn(&Output) -> Result<()>>;

pub(crate) struct NamedHook {
    pub(crate) name: String,
    pub(crate) run: PostInstallHook,
}

/// Mutable context handed to each task in order.
///
/// Dependencies and hooks can only be appended. Nothing a task does can drop
/// an entry queued by an earlier task.
pub struct Context {
    pub manifest: Manifest,
    answers: InitAnswers,
    cwd: PathBuf,
    settings_path: PathBuf,
    dependencies: Vec<Dependency>,
    hooks: Vec<NamedHook>,
}

impl Context {
    pub fn new(manifest: Manifest, answers: InitAnswers, cwd: impl Into<PathBuf>) -> Self {
        let cwd = cwd.into();
        let settings_path = cwd.join(SETTINGS_FILE);

        Self {
            manifest,
            answers,
            cwd,
            settings_path,
            dependencies: Vec::new(),
            hooks: Vec::new(),
        }
    }

    pub fn answers(&self) -> &InitAnswers {
        &self.answers
    }

    /// Project root the run operates on
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Location of `.standard.jsonc`
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Queues a package for installation
    pub fn add_dep(&mut self, dep: Dependency) {
        self.dependencies.push(dep);
    }

    /// Registers work to run once installation has finished
    pub fn on_finish(
        &mut self,
        name: impl Into<String>,
        hook: impl Fn(&Output) -> Result<()> + 'static,
    ) {
        self.hooks.push(NamedHook {
            name: name.into(),
            run: Box::new(hook),
        });
    }

    /// Packages queued so far, in the order they were added
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    pub(crate) fn hooks(&self) -> &[NamedHook] {
        &self.hooks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> Context {
        let manifest = Manifest::from_value("package.json", json!({"name": "demo"})).unwrap();
        let answers = InitAnswers::defaults(false, |_| false, None);
        Context::new(manifest, answers, "/work/demo")
    }

    #[test]
    fn settings_path_is_under_cwd() {
        let ctx = context();
        assert_eq!(ctx.settings_path(), Path::new("/work/demo/.standard.jsonc"));
    }

    #[test]
    fn dependencies_keep_insertion_order() {
        let mut ctx = context();
        ctx.add_dep(Dependency::dev("eslint"));
        ctx.add_dep(Dependency::runtime("core-js"));
        ctx.add_dep(Dependency::dev("prettier"));

        let names: Vec<_> = ctx.dependencies().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["eslint", "core-js", "prettier"]);
    }

    #[test]
    fn hooks_are_recorded_with_names() {
        let mut ctx = context();
        ctx.on_finish("first", |_| Ok(()));
        ctx.on_finish("second", |_| Ok(()));

        assert_eq!(ctx.hook_count(), 2);
        let names: Vec<_> = ctx.hooks().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
