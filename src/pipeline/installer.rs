//! Hands queued dependencies to the project's package manager

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

use anyhow::{Context as _, Result};
use thiserror::Error;

use crate::cli::Output;
use crate::domain::Dependency;
use crate::storage::SettingsError;

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("'{0}' was not found on PATH")]
    NotFound(&'static str),

    #[error("'{command}' exited with {status}")]
    Failed { command: String, status: String },
}

/// Installs a batch of dependencies
pub trait Installer {
    fn install(&self, deps: &[Dependency], output: &Output) -> Result<()>;
}

/// Supported package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManagerKind {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManagerKind {
    pub fn binary(&self) -> &'static str {
        match self {
            PackageManagerKind::Npm => "npm",
            PackageManagerKind::Yarn => "yarn",
            PackageManagerKind::Pnpm => "pnpm",
        }
    }

    /// Picks the package manager from the lockfile present in `root`
    pub fn detect(root: &Path) -> Self {
        if root.join("pnpm-lock.yaml").exists() {
            PackageManagerKind::Pnpm
        } else if root.join("yarn.lock").exists() {
            PackageManagerKind::Yarn
        } else {
            PackageManagerKind::Npm
        }
    }

    fn install_args(&self, dev: bool) -> &'static [&'static str] {
        match (self, dev) {
            (PackageManagerKind::Npm, false) => &["install"],
            (PackageManagerKind::Npm, true) => &["install", "--save-dev"],
            (PackageManagerKind::Yarn | PackageManagerKind::Pnpm, false) => &["add"],
            (PackageManagerKind::Yarn | PackageManagerKind::Pnpm, true) => &["add", "-D"],
        }
    }

    /// Program and leading arguments that run a locally installed binary
    pub fn exec_prefix(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            PackageManagerKind::Npm => ("npx", &["--no-install"]),
            PackageManagerKind::Yarn => ("yarn", &[]),
            PackageManagerKind::Pnpm => ("pnpm", &["exec"]),
        }
    }
}

impl FromStr for PackageManagerKind {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "npm" => Ok(PackageManagerKind::Npm),
            "yarn" => Ok(PackageManagerKind::Yarn),
            "pnpm" => Ok(PackageManagerKind::Pnpm),
            other => Err(SettingsError::UnknownPackageManager(other.to_string())),
        }
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

/// Installer backed by npm, yarn or pnpm
#[derive(Debug, Clone)]
pub struct PackageManager {
    kind: PackageManagerKind,
    root: PathBuf,
}

impl PackageManager {
    pub fn new(kind: PackageManagerKind, root: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            root: root.into(),
        }
    }

    /// Uses `preferred` when given, otherwise the lockfile in `root`
    pub fn detect(root: &Path, preferred: Option<&str>) -> Result<Self> {
        let kind = match preferred {
            Some(name) => name.parse()?,
            None => PackageManagerKind::detect(root),
        };
        Ok(Self::new(kind, root))
    }

    pub fn kind(&self) -> PackageManagerKind {
        self.kind
    }

    /// Argument lists to run: runtime dependencies first, then dev ones.
    ///
    /// A partition with no entries produces no invocation.
    pub fn invocations(&self, deps: &[Dependency]) -> Vec<Vec<String>> {
        [false, true]
            .into_iter()
            .filter_map(|dev| {
                let specs: Vec<String> = deps
                    .iter()
                    .filter(|d| d.dev == dev)
                    .map(Dependency::spec)
                    .collect();

                if specs.is_empty() {
                    return None;
                }

                let mut args: Vec<String> =
                    self.kind.install_args(dev).iter().map(|a| a.to_string()).collect();
                args.extend(specs);
                Some(args)
            })
            .collect()
    }
}

impl Installer for PackageManager {
    fn install(&self, deps: &[Dependency], output: &Output) -> Result<()> {
        let binary = self.kind.binary();
        let program = which::which(binary).map_err(|_| InstallError::NotFound(binary))?;

        for args in self.invocations(deps) {
            let command = format!("{} {}", binary, args.join(" "));
            output.debug_ctx("install", &command);

            let status = Command::new(&program)
                .args(&args)
                .current_dir(&self.root)
                .status()
                .with_context(|| format!("Failed to run {}", command))?;

            if !status.success() {
                return Err(InstallError::Failed {
                    command,
                    status: status.to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}

/// Installer used with `--no-install`: reports instead of installing
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipInstall;

impl Installer for SkipInstall {
    fn install(&self, deps: &[Dependency], output: &Output) -> Result<()> {
        let specs: Vec<String> = deps.iter().map(Dependency::spec).collect();
        output.info(&format!(
            "Skipped installation, add these yourself: {}",
            specs.join(" ")
        ));
        Ok(())
    }
}
