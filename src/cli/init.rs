//! `wkstd init`: set up lint, format and git-hook tooling in a project

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;

use super::environment::RunEnvironment;
use super::output::Output;
use super::prompt;
use crate::domain::InitAnswers;
use crate::pipeline::{Context, Installer, PackageManager, Pipeline, SkipInstall};
use crate::storage::{GlobalSettings, Manifest, ManifestError};

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Project root (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Accept every default instead of prompting
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Update files only, leave dependency installation to the user
    #[arg(long)]
    pub no_install: bool,

    /// Skip the Gerrit commit-msg hook
    #[arg(long)]
    pub no_gerrit: bool,

    /// Gerrit server to fetch the commit-msg hook from
    #[arg(long, env = "WKSTD_GERRIT_HOST")]
    pub gerrit_host: Option<String>,

    /// Package manager to install with (npm, yarn, pnpm)
    #[arg(long)]
    pub package_manager: Option<String>,
}

/// Runs the init wizard and pipeline
pub fn run(output: &Output, args: InitArgs, env: RunEnvironment) -> Result<()> {
    let root = args
        .path
        .canonicalize()
        .with_context(|| format!("Project directory not found: {}", args.path.display()))?;

    let manifest_path = root.join("package.json");
    if !manifest_path.is_file() {
        return Err(ManifestError::NotFound(manifest_path).into());
    }

    let manifest = Manifest::load(&manifest_path)?;
    let settings = GlobalSettings::load()?;
    output.debug_ctx("init", &format!("loaded {}", manifest_path.display()));

    let gerrit_host = args.gerrit_host.as_deref().or(settings.gerrit_host.as_deref());
    let mut defaults = InitAnswers::defaults(
        root.join("tsconfig.json").exists(),
        |name| manifest.has_install(name),
        gerrit_host,
    );
    if args.no_gerrit {
        defaults.gerrit_support = false;
    }

    let interactive = !args.yes && !env.ci && std::io::stdin().is_terminal();
    let mut answers = if interactive {
        prompt::ask(&defaults)?
    } else {
        output.debug_ctx("init", "non-interactive run, using defaults");
        defaults
    };
    if args.no_gerrit {
        answers.gerrit_support = false;
    }

    output.debug_ctx(
        "init",
        &format!("answers: {}", serde_json::to_string(&answers)?),
    );

    let installer: Box<dyn Installer> = if args.no_install {
        Box::new(SkipInstall)
    } else {
        let preferred = args
            .package_manager
            .as_deref()
            .or(settings.package_manager.as_deref());
        let pm = PackageManager::detect(&root, preferred)?;
        output.debug_ctx("init", &format!("installing with {}", pm.kind()));
        Box::new(pm)
    };

    let mut ctx = Context::new(manifest, answers, &root);
    let report = Pipeline::standard().run(&mut ctx, installer.as_ref(), output)?;

    if output.is_json() {
        output.data(&report);
    }

    if let Some(error) = report.install_error {
        anyhow::bail!("Dependency installation failed: {}", error);
    }

    if report.hook_warnings.is_empty() {
        output.success("Project tooling initialized");
    } else {
        output.success("Project tooling initialized with warnings");
    }

    Ok(())
}
