//! `package.json` read/modify/write
//!
//! The parsed document is the single source of truth for the whole run. Every
//! mutation marks the handle dirty and [`Manifest::write`] only touches the
//! disk when something actually changed. Key order is preserved, so keys the
//! run never touched come back out exactly where they were.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use thiserror::Error;

use crate::domain::json_path;

const DEPENDENCIES: &str = "dependencies";
const DEV_DEPENDENCIES: &str = "devDependencies";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("package.json not found at {0}")]
    NotFound(PathBuf),

    #[error("{0} must contain a JSON object at the top level")]
    NotAnObject(PathBuf),
}

/// Handle over a project's `package.json`
#[derive(Debug)]
pub struct Manifest {
    path: PathBuf,
    data: Value,
    dirty: bool,
}

impl Manifest {
    /// Loads the manifest at `path`
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.is_file() {
            return Err(ManifestError::NotFound(path).into());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

        let data: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))?;

        Self::from_value(path, data)
    }

    /// Loads `package.json` from a project directory
    pub fn for_project(root: &Path) -> Result<Self> {
        Self::load(root.join("package.json"))
    }

    /// Wraps an already parsed document
    pub fn from_value(path: impl Into<PathBuf>, data: Value) -> Result<Self> {
        let path = path.into();
        if !data.is_object() {
            return Err(ManifestError::NotAnObject(path).into());
        }

        Ok(Self {
            path,
            data,
            dirty: false,
        })
    }

    /// Returns the manifest file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the whole document
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Returns true if the in-memory document differs from disk
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        json_path::get(&self.data, path)
    }

    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        json_path::set(&mut self.data, path, value.into());
        self.dirty = true;
    }

    /// Removes the value at `path`. Returns true if something was removed.
    pub fn unset(&mut self, path: &str) -> bool {
        let removed = json_path::unset(&mut self.data, path).is_some();
        if removed {
            self.dirty = true;
        }
        removed
    }

    /// Removes `name` from both dependency maps.
    pub fn remove_dep(&mut self, name: &str) -> bool {
        let mut removed = false;

        for section in [DEPENDENCIES, DEV_DEPENDENCIES] {
            if let Some(Value::Object(deps)) = self.data.get_mut(section) {
                removed |= deps.shift_remove(name).is_some();
            }
        }

        if removed {
            self.dirty = true;
        }
        removed
    }

    pub fn set_script(&mut self, name: &str, command: &str) {
        self.set(&format!("scripts.{}", name), command);
    }

    pub fn script(&self, name: &str) -> Option<&str> {
        self.data
            .get("scripts")
            .and_then(|scripts| scripts.get(name))
            .and_then(Value::as_str)
    }

    /// Declared version range for `name`.
    ///
    /// Runtime dependencies take precedence over dev dependencies. A missing
    /// map is treated as empty.
    pub fn get_version(&self, name: &str) -> Option<&str> {
        [DEPENDENCIES, DEV_DEPENDENCIES].iter().find_map(|section| {
            self.data
                .get(*section)
                .and_then(|deps| deps.get(name))
                .and_then(Value::as_str)
        })
    }

    pub fn has_install(&self, name: &str) -> bool {
        self.get_version(name).is_some()
    }

    /// Persists the document if it is dirty. Returns true if a write happened.
    ///
    /// Output is pretty-printed with 2-space indentation and a trailing
    /// newline, written to a temp file and renamed over the original.
    pub fn write(&mut self) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }

        let mut content =
            serde_json::to_string_pretty(&self.data).context("Failed to serialize manifest")?;
        content.push('\n');

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        self.dirty = false;
        Ok(true)
    }

    /// Discards in-memory changes and re-reads the file
    pub fn refresh(&mut self) -> Result<()> {
        *self = Self::load(self.path.clone())?;
        Ok(())
    }
}
