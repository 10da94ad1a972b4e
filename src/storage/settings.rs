//! Settings handling for wkstd
//!
//! Two files are involved:
//! - global user settings in `~/.config/wkstd/config.toml` (TOML)
//! - per-project settings in `.standard.jsonc` at the project root
//!   (JSON with `//` and `/* */` comments), consumed by `wkstd local-check`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{InitAnswers, ProjectType};

/// File name of the project settings file
pub const SETTINGS_FILE: &str = ".standard.jsonc";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Unknown package manager '{0}' (expected npm, yarn or pnpm)")]
    UnknownPackageManager(String),

    #[error("Failed to parse settings: {0}")]
    Parse(String),
}

/// Global user settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GlobalSettings {
    /// Forces a package manager instead of detecting it from lockfiles
    pub package_manager: Option<String>,

    /// Gerrit server offered as the wizard default
    pub gerrit_host: Option<String>,
}

impl GlobalSettings {
    /// Returns the global settings directory
    pub fn dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "wakedata", "wkstd").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads settings from the default location, or defaults when absent
    pub fn load() -> Result<Self> {
        match Self::dir() {
            Some(dir) => Self::load_from(&dir.join("config.toml")),
            None => Ok(Self::default()),
        }
    }

    /// Loads settings from a specific file, or defaults when absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| SettingsError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse settings: {}", path.display()))
    }
}

/// A single glob or a list of globs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Patterns {
    One(String),
    Many(Vec<String>),
}

impl Patterns {
    pub fn to_vec(&self) -> Vec<&str> {
        match self {
            Patterns::One(pattern) => vec![pattern.as_str()],
            Patterns::Many(patterns) => patterns.iter().map(String::as_str).collect(),
        }
    }

    fn from_extensions(extensions: &[&str]) -> Self {
        Patterns::Many(extensions.iter().map(|ext| format!("**/*.{}", ext)).collect())
    }
}

/// Project settings stored in `.standard.jsonc`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    /// Rule-set milestone the project is pinned to
    pub milestone: String,

    /// Follow new milestones automatically
    pub milestone_auto_update: bool,

    /// Files checked by prettier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_patterns: Option<Patterns>,

    /// Files checked by eslint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_patterns: Option<Patterns>,

    /// Files checked by stylelint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_patterns: Option<Patterns>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eslint_args: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stylelint_args: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prettier_args: Option<String>,
}

const SCRIPT_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs"];
const TYPESCRIPT_EXTENSIONS: &[&str] = &["ts", "tsx"];
const STYLE_EXTENSIONS: &[&str] = &["css", "scss", "less"];
const DATA_EXTENSIONS: &[&str] = &["json", "md"];

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            milestone: env!("CARGO_PKG_VERSION").to_string(),
            milestone_auto_update: true,
            format_patterns: None,
            script_patterns: None,
            style_patterns: None,
            eslint_args: None,
            stylelint_args: None,
            prettier_args: None,
        }
    }
}

impl ProjectSettings {
    /// Settings matching what the user answered in the wizard
    pub fn from_answers(answers: &InitAnswers) -> Self {
        let mut scripts: Vec<&str> = SCRIPT_EXTENSIONS.to_vec();
        if answers.typescript {
            scripts.extend_from_slice(TYPESCRIPT_EXTENSIONS);
        }
        if answers.project_type == ProjectType::Vue {
            scripts.push("vue");
        }

        let mut formatted = scripts.clone();
        formatted.extend_from_slice(STYLE_EXTENSIONS);
        formatted.extend_from_slice(DATA_EXTENSIONS);

        Self {
            format_patterns: Some(Patterns::from_extensions(&formatted)),
            script_patterns: Some(Patterns::from_extensions(&scripts)),
            style_patterns: Some(Patterns::from_extensions(STYLE_EXTENSIONS)),
            ..Self::default()
        }
    }

    /// Patterns eslint runs on, falling back to plain JavaScript sources
    pub fn scripts(&self) -> Patterns {
        self.script_patterns
            .clone()
            .unwrap_or_else(|| Patterns::from_extensions(SCRIPT_EXTENSIONS))
    }

    /// Patterns prettier runs on, falling back to the script patterns
    pub fn formats(&self) -> Patterns {
        self.format_patterns.clone().unwrap_or_else(|| self.scripts())
    }

    /// Patterns stylelint runs on
    pub fn styles(&self) -> Patterns {
        self.style_patterns
            .clone()
            .unwrap_or_else(|| Patterns::from_extensions(STYLE_EXTENSIONS))
    }

    /// Loads `.standard.jsonc` from a project, or defaults when absent
    pub fn for_project(root: &Path) -> Result<Self> {
        let path = root.join(SETTINGS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parses JSON text that may carry `//` and `/* */` comments
    pub fn parse(content: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(&strip_comments(content))
            .map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Renders the settings file with a short header
    pub fn render(&self) -> Result<String> {
        let body = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        Ok(format!(
            "// wkstd project settings\n// Patterns select staged files for `wkstd local-check`.\n{}\n",
            body
        ))
    }
}

/// Blanks out comments that sit outside string literals.
///
/// Comment characters become spaces and newlines are kept, so parse errors
/// still point at the right line and column.
fn strip_comments(content: &str) -> String {
    enum State {
        Code,
        Str { escaped: bool },
        Line,
        Block { star: bool },
    }

    let mut out = String::with_capacity(content.len());
    let mut state = State::Code;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        state = match state {
            State::Code => match (c, chars.peek()) {
                ('"', _) => {
                    out.push(c);
                    State::Str { escaped: false }
                }
                ('/', Some('/')) => {
                    chars.next();
                    out.push_str("  ");
                    State::Line
                }
                ('/', Some('*')) => {
                    chars.next();
                    out.push_str("  ");
                    State::Block { star: false }
                }
                _ => {
                    out.push(c);
                    State::Code
                }
            },
            State::Str { escaped } => {
                out.push(c);
                match c {
                    '"' if !escaped => State::Code,
                    '\\' => State::Str { escaped: !escaped },
                    _ => State::Str { escaped: false },
                }
            }
            State::Line if c == '\n' => {
                out.push(c);
                State::Code
            }
            State::Line => {
                out.push(' ');
                State::Line
            }
            State::Block { star } => {
                out.push(if c == '\n' { '\n' } else { ' ' });
                match c {
                    '/' if star => State::Code,
                    '*' => State::Block { star: true },
                    _ => State::Block { star: false },
                }
            }
        };
    }

    out
}
