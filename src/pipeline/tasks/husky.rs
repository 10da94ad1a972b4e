//! husky git hooks wired to `wkstd local-check`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use super::git;
use crate::cli::Output;
use crate::domain::Dependency;
use crate::pipeline::{Context, TaskError};

/// Command name of this tool, as it appears in package scripts
pub const TOOL_NAME: &str = "wkstd";

pub const LOCAL_CHECK_SCRIPT: &str = "wkstd local-check";

pub const PREPARE_SCRIPT: &str = "husky install";

/// `husky install` and the sourced `husky.sh` are husky 8 wiring
pub const HUSKY_VERSION: &str = "^8";

/// Directory husky reads hooks from
pub const HOOKS_DIR: &str = ".husky";

const PRE_COMMIT: &str = r#"#!/usr/bin/env sh
. "$(dirname -- "$0")/_/husky.sh"

npm run local-check
"#;

pub fn run(ctx: &mut Context, output: &Output) -> Result<(), TaskError> {
    if ctx.manifest.unset("husky") {
        output.info("Removed legacy `husky` field from package.json");
    }

    let legacy_postinstall = ctx
        .manifest
        .script("postinstall")
        .is_some_and(|script| script.contains(TOOL_NAME));
    if legacy_postinstall && ctx.manifest.unset("scripts.postinstall") {
        output.info("Removed legacy `postinstall` script");
    }

    ctx.manifest.set_script("local-check", LOCAL_CHECK_SCRIPT);

    match ctx.manifest.script("prepare").map(str::to_string) {
        Some(existing) if existing.contains(PREPARE_SCRIPT) => {}
        Some(existing) => {
            let chained = format!("{} && {}", existing, PREPARE_SCRIPT);
            output.warn(&format!("Existing `prepare` script kept, now runs: {}", chained));
            ctx.manifest.set_script("prepare", &chained);
        }
        None => ctx.manifest.set_script("prepare", PREPARE_SCRIPT),
    }

    if !ctx.manifest.has_install("husky") {
        ctx.add_dep(Dependency::dev("husky").with_version(HUSKY_VERSION));
    }
    if !ctx.manifest.has_install(TOOL_NAME) {
        ctx.add_dep(Dependency::dev(TOOL_NAME));
    }

    let hooks_dir = ctx.cwd().join(HOOKS_DIR);
    let path = write_hook(&hooks_dir, "pre-commit", PRE_COMMIT)?;
    output.success(&format!("Wrote {}", path.display()));

    let root = ctx.cwd().to_path_buf();
    ctx.on_finish("husky", move |output| verify_hooks_path(&root, output));

    Ok(())
}

/// Writes an executable hook script into `dir`
pub fn write_hook(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create hooks directory: {}", dir.display()))?;

    let path = dir.join(name);
    fs::write(&path, content)
        .with_context(|| format!("Failed to write hook: {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .with_context(|| format!("Failed to make hook executable: {}", path.display()))?;
    }

    Ok(path)
}

/// Confirms that `husky install` pointed git at the husky hooks
fn verify_hooks_path(root: &Path, output: &Output) -> Result<()> {
    match git::config_value(root, "core.hooksPath")? {
        Some(path) if is_husky_hooks_path(&path) => {
            output.success("husky git hooks are active");
            Ok(())
        }
        Some(path) => anyhow::bail!(
            "git hooks point at '{}' instead of {}; run `npx husky install`",
            path,
            HOOKS_DIR
        ),
        None => anyhow::bail!("git hooks are not linked to {}; run `npx husky install`", HOOKS_DIR),
    }
}

fn is_husky_hooks_path(value: &str) -> bool {
    Path::new(value).components().any(|c| c.as_os_str() == HOOKS_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::domain::InitAnswers;
    use crate::storage::Manifest;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn context(dir: &TempDir, manifest: Value) -> Context {
        let manifest = Manifest::from_value(dir.path().join("package.json"), manifest).unwrap();
        Context::new(manifest, InitAnswers::defaults(false, |_| false, None), dir.path())
    }

    fn quiet() -> Output {
        Output::new(OutputFormat::Text, false)
    }

    #[test]
    fn sets_scripts_and_removes_legacy_fields() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(
            &dir,
            json!({
                "name": "demo",
                "husky": {"hooks": {"pre-commit": "lint-staged"}},
                "scripts": {"postinstall": "wkstd install", "test": "jest"}
            }),
        );

        run(&mut ctx, &quiet()).unwrap();

        assert_eq!(ctx.manifest.get("husky"), None);
        assert_eq!(ctx.manifest.script("postinstall"), None);
        assert_eq!(ctx.manifest.script("local-check"), Some(LOCAL_CHECK_SCRIPT));
        assert_eq!(ctx.manifest.script("prepare"), Some(PREPARE_SCRIPT));
        assert_eq!(ctx.manifest.script("test"), Some("jest"));
    }

    #[test]
    fn keeps_unrelated_postinstall() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir, json!({"scripts": {"postinstall": "patch-package"}}));

        run(&mut ctx, &quiet()).unwrap();

        assert_eq!(ctx.manifest.script("postinstall"), Some("patch-package"));
    }

    #[test]
    fn queues_missing_packages_only() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir, json!({"devDependencies": {"husky": "^8.0.0"}}));

        run(&mut ctx, &quiet()).unwrap();

        let names: Vec<_> = ctx.dependencies().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec![TOOL_NAME]);
        assert!(ctx.dependencies().iter().all(|d| d.dev));
    }

    #[test]
    fn writes_pre_commit_and_registers_hook() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir, json!({}));

        run(&mut ctx, &quiet()).unwrap();

        let hook = dir.path().join(".husky/pre-commit");
        let content = fs::read_to_string(&hook).unwrap();
        assert!(content.starts_with("#!/usr/bin/env sh"));
        assert!(content.contains("npm run local-check"));
        assert_eq!(ctx.hook_count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn hook_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = write_hook(dir.path(), "pre-commit", "#!/bin/sh\n").unwrap();

        let mode = fs::metadata(path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn husky_is_pinned_to_matching_major() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir, json!({}));

        run(&mut ctx, &quiet()).unwrap();

        let husky = ctx.dependencies().iter().find(|d| d.name == "husky").unwrap();
        assert_eq!(husky.spec(), "husky@^8");
    }

    #[test]
    fn existing_prepare_is_chained() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir, json!({"scripts": {"prepare": "npm run build"}}));

        run(&mut ctx, &quiet()).unwrap();
        assert_eq!(ctx.manifest.script("prepare"), Some("npm run build && husky install"));

        run(&mut ctx, &quiet()).unwrap();
        assert_eq!(ctx.manifest.script("prepare"), Some("npm run build && husky install"));
    }

    fn git_repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        git::run_git(dir.path(), &["init", "-q"]).unwrap();
        dir
    }

    #[test]
    fn verify_fails_without_hooks_path() {
        let repo = git_repo();
        if git::config_value(repo.path(), "core.hooksPath").unwrap().is_some() {
            // a global hooksPath on this machine makes the unset case unreachable
            return;
        }

        let err = verify_hooks_path(repo.path(), &quiet()).unwrap_err();
        assert!(err.to_string().contains("not linked"), "{}", err);
    }

    #[test]
    fn verify_fails_for_foreign_hooks_path() {
        let repo = git_repo();
        git::run_git(repo.path(), &["config", "core.hooksPath", ".githooks"]).unwrap();

        let err = verify_hooks_path(repo.path(), &quiet()).unwrap_err();
        assert!(err.to_string().contains(".githooks"), "{}", err);
    }

    #[test]
    fn verify_accepts_husky_hooks_path() {
        let repo = git_repo();
        for value in [".husky", ".husky/_"] {
            git::run_git(repo.path(), &["config", "core.hooksPath", value]).unwrap();
            verify_hooks_path(repo.path(), &quiet()).unwrap();
        }
    }

    #[test]
    fn husky_hooks_path_detection() {
        assert!(is_husky_hooks_path(".husky"));
        assert!(is_husky_hooks_path(".husky/_"));
        assert!(!is_husky_hooks_path(".githooks"));
        assert!(!is_husky_hooks_path("tools/not-husky"));
    }
}
