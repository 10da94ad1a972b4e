//! `wkstd local-check`: lint and format-check staged files
//!
//! Invoked from the husky pre-commit hook. Each tool runs only when the
//! project declares it in package.json and at least one staged file matches
//! its patterns in `.standard.jsonc`.

use std::path::Path;
use std::process::Command;

use anyhow::{Context as _, Result};
use glob::{MatchOptions, Pattern};

use super::output::Output;
use crate::pipeline::tasks::git;
use crate::pipeline::PackageManagerKind;
use crate::storage::{GlobalSettings, Manifest, Patterns, ProjectSettings};

struct Check<'a> {
    tool: &'static str,
    patterns: Patterns,
    fixed_args: &'static [&'static str],
    extra_args: Option<&'a str>,
}

/// Files staged for commit, relative to the repository root.
///
/// Names are NUL-separated so git leaves non-ASCII paths unquoted.
pub fn staged_files(root: &Path) -> Result<Vec<String>> {
    let stdout = git::run_git(
        root,
        &["diff", "--cached", "--name-only", "-z", "--diff-filter=ACMR"],
    )?;
    Ok(stdout
        .split('\0')
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect())
}

/// Keeps the files matching any of `patterns`.
///
/// `*` does not cross directory separators. A leading `**/` also matches
/// files at the repository root.
pub fn select_files(files: &[String], patterns: &[&str]) -> Result<Vec<String>> {
    let mut compiled = Vec::new();
    for pattern in patterns {
        compiled.push(
            Pattern::new(pattern).with_context(|| format!("Invalid pattern '{}'", pattern))?,
        );
        if let Some(rest) = pattern.strip_prefix("**/") {
            compiled.push(
                Pattern::new(rest).with_context(|| format!("Invalid pattern '{}'", pattern))?,
            );
        }
    }

    let options = MatchOptions {
        require_literal_separator: true,
        ..MatchOptions::new()
    };

    Ok(files
        .iter()
        .filter(|file| compiled.iter().any(|p| p.matches_with(file, options)))
        .cloned()
        .collect())
}

/// Runs the configured checks against staged files
pub fn run(output: &Output, root: &Path) -> Result<()> {
    let manifest = Manifest::for_project(root)?;
    let settings = ProjectSettings::for_project(root)?;
    let global = GlobalSettings::load()?;

    let kind = match global.package_manager.as_deref() {
        Some(name) => name.parse()?,
        None => PackageManagerKind::detect(root),
    };

    let staged = staged_files(root)?;
    if staged.is_empty() {
        output.info("No staged files to check");
        return Ok(());
    }
    output.debug_ctx("local-check", &format!("{} staged file(s)", staged.len()));

    let checks = [
        Check {
            tool: "eslint",
            patterns: settings.scripts(),
            fixed_args: &[],
            extra_args: settings.eslint_args.as_deref(),
        },
        Check {
            tool: "stylelint",
            patterns: settings.styles(),
            fixed_args: &[],
            extra_args: settings.stylelint_args.as_deref(),
        },
        Check {
            tool: "prettier",
            patterns: settings.formats(),
            fixed_args: &["--check"],
            extra_args: settings.prettier_args.as_deref(),
        },
    ];

    let mut pending = Vec::new();
    for check in checks {
        if !manifest.has_install(check.tool) {
            output.debug_ctx("local-check", &format!("{} not installed, skipping", check.tool));
            continue;
        }

        let files = select_files(&staged, &check.patterns.to_vec())?;
        if !files.is_empty() {
            pending.push((check, files));
        }
    }

    if pending.is_empty() {
        output.info("No checks apply to the staged files");
        return Ok(());
    }

    let (runner, runner_args) = kind.exec_prefix();
    let program = which::which(runner).with_context(|| format!("'{}' was not found on PATH", runner))?;

    let mut failed = Vec::new();
    for (check, files) in pending {
        output.info(&format!("{}: checking {} file(s)", check.tool, files.len()));

        let status = Command::new(&program)
            .args(runner_args)
            .arg(check.tool)
            .args(check.fixed_args)
            .args(check.extra_args.unwrap_or_default().split_whitespace())
            .args(&files)
            .current_dir(root)
            .status()
            .with_context(|| format!("Failed to run {}", check.tool))?;

        if !status.success() {
            output.error(&format!("{} reported problems", check.tool));
            failed.push(check.tool);
        }
    }

    if !failed.is_empty() {
        anyhow::bail!("Local check failed: {}", failed.join(", "));
    }

    output.success("All checks passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn git_repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        git::run_git(dir.path(), &["init", "-q"]).unwrap();
        dir
    }

    fn files(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn selects_by_extension() {
        let staged = files(&["src/index.ts", "src/app.vue", "README.md", "src/styles/main.scss"]);
        let selected = select_files(&staged, &["**/*.ts", "**/*.vue"]).unwrap();

        assert_eq!(selected, vec!["src/index.ts", "src/app.vue"]);
    }

    #[test]
    fn double_star_matches_root_files() {
        let staged = files(&["index.js", "lib/util.js"]);
        let selected = select_files(&staged, &["**/*.js"]).unwrap();

        assert_eq!(selected, vec!["index.js", "lib/util.js"]);
    }

    #[test]
    fn single_star_stays_in_directory() {
        let staged = files(&["src/index.js", "src/deep/util.js"]);
        let selected = select_files(&staged, &["src/*.js"]).unwrap();

        assert_eq!(selected, vec!["src/index.js"]);
    }

    #[test]
    fn invalid_pattern_fails() {
        assert!(select_files(&files(&["a.js"]), &["[unclosed"]).is_err());
    }

    #[test]
    fn nothing_matches_nothing() {
        let selected = select_files(&files(&["docs/guide.md"]), &["**/*.js"]).unwrap();
        assert!(selected.is_empty());
    }

    #[test]
    fn staged_files_keep_non_ascii_names() {
        let repo = git_repo();
        fs::write(repo.path().join("组件.js"), "export {}\n").unwrap();
        fs::write(repo.path().join("plain.js"), "export {}\n").unwrap();
        git::run_git(repo.path(), &["add", "."]).unwrap();

        let mut staged = staged_files(repo.path()).unwrap();
        staged.sort();
        assert_eq!(staged, vec!["plain.js", "组件.js"]);
        assert_eq!(select_files(&staged, &["**/*.js"]).unwrap(), staged);
    }

    #[test]
    fn nothing_staged_is_empty() {
        let repo = git_repo();
        fs::write(repo.path().join("untracked.js"), "").unwrap();

        assert!(staged_files(repo.path()).unwrap().is_empty());
    }
}
