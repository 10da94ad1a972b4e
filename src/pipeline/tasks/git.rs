//! Git checks shared by the tasks and `local-check`

use std::path::Path;
use std::process::Command;

use anyhow::{Context as _, Result};

use crate::cli::Output;
use crate::pipeline::{Context, TaskError};

/// Returns true when `root` holds a `.git` directory (or worktree file)
pub fn is_git_repo(root: &Path) -> bool {
    root.join(".git").exists()
}

/// First task of every run: refuse to touch anything outside a git project
pub fn ensure_git_repo(ctx: &mut Context, output: &Output) -> Result<(), TaskError> {
    if !is_git_repo(ctx.cwd()) {
        return Err(TaskError::Fatal(format!(
            "{} is not a git repository. Run wkstd from the root of a git project.",
            ctx.cwd().display()
        )));
    }

    output.debug_ctx("git", &format!("found .git in {}", ctx.cwd().display()));
    Ok(())
}

/// Runs git in `root` and returns trimmed stdout, failing on non-zero exit
pub fn run_git(root: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(root)
        .output()
        .with_context(|| format!("Failed to run git {}", args.join(" ")))?;

    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Reads a git config value, `None` when the key is unset
pub fn config_value(root: &Path, key: &str) -> Result<Option<String>> {
    let output = Command::new("git")
        .args(["config", "--get", key])
        .current_dir(root)
        .output()
        .with_context(|| format!("Failed to run git config --get {}", key))?;

    // git config exits with 1 when the key is missing
    match output.status.code() {
        Some(0) => Ok(Some(String::from_utf8_lossy(&output.stdout).trim().to_string())),
        Some(1) => Ok(None),
        _ => anyhow::bail!(
            "git config --get {} failed: {}",
            key,
            String::from_utf8_lossy(&output.stderr).trim()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::domain::InitAnswers;
    use crate::storage::Manifest;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn context(root: &Path) -> Context {
        let manifest = Manifest::from_value(root.join("package.json"), json!({})).unwrap();
        Context::new(manifest, InitAnswers::defaults(false, |_| false, None), root)
    }

    #[test]
    fn plain_directory_is_not_a_repo() {
        let dir = TempDir::new().unwrap();
        assert!(!is_git_repo(dir.path()));
    }

    #[test]
    fn git_dir_or_file_counts() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        assert!(is_git_repo(dir.path()));

        let worktree = TempDir::new().unwrap();
        fs::write(worktree.path().join(".git"), "gitdir: /elsewhere").unwrap();
        assert!(is_git_repo(worktree.path()));
    }

    #[test]
    fn ensure_git_repo_is_fatal_outside_git() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(dir.path());
        let output = Output::new(OutputFormat::Text, false);

        let result = ensure_git_repo(&mut ctx, &output);
        assert!(matches!(result, Err(TaskError::Fatal(_))));
    }

    #[test]
    fn ensure_git_repo_passes_inside_git() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let mut ctx = context(dir.path());
        let output = Output::new(OutputFormat::Text, false);

        assert!(ensure_git_repo(&mut ctx, &output).is_ok());
    }
}
