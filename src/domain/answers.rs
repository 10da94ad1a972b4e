//! Project characteristics collected by the init wizard
//!
//! [`InitAnswers`] is resolved once before any task runs and is read-only
//! afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Gerrit server offered when neither the user nor the settings name one
pub const DEFAULT_GERRIT_HOST: &str = "http://gerrit.wakedata-inc.com";

/// Project archetype, used to pick lint presets and packages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    React,
    Vue,
    Taro,
    Standard,
}

impl ProjectType {
    pub fn all() -> &'static [ProjectType] {
        &[
            ProjectType::React,
            ProjectType::Vue,
            ProjectType::Taro,
            ProjectType::Standard,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectType::React => "React",
            ProjectType::Vue => "Vue",
            ProjectType::Taro => "Taro",
            ProjectType::Standard => "Standard (plain JavaScript)",
        }
    }

    /// Guesses the archetype from installed packages.
    ///
    /// Taro wins over Vue and React since Taro projects depend on one of them.
    pub fn detect(is_installed: impl Fn(&str) -> bool) -> Self {
        if is_installed("@tarojs/taro") {
            ProjectType::Taro
        } else if is_installed("vue") {
            ProjectType::Vue
        } else if is_installed("react") {
            ProjectType::React
        } else {
            ProjectType::Standard
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Module system the sources are written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleType {
    #[serde(rename = "es6")]
    Es6,
    #[serde(rename = "commonJS")]
    CommonJs,
}

impl ModuleType {
    pub fn label(&self) -> &'static str {
        match self {
            ModuleType::Es6 => "JavaScript modules (import/export)",
            ModuleType::CommonJs => "CommonJS (require/exports)",
        }
    }
}

/// Where the code runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    Browser,
    Node,
}

impl RuntimeEnvironment {
    pub fn all() -> &'static [RuntimeEnvironment] {
        &[RuntimeEnvironment::Browser, RuntimeEnvironment::Node]
    }

    pub fn label(&self) -> &'static str {
        match self {
            RuntimeEnvironment::Browser => "Browser",
            RuntimeEnvironment::Node => "Node",
        }
    }
}

/// Resolved answers of the init wizard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitAnswers {
    pub typescript: bool,

    #[serde(rename = "type")]
    pub project_type: ProjectType,

    pub loose: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_type: Option<ModuleType>,

    pub environment: RuntimeEnvironment,

    pub gerrit_support: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gerrit_host: Option<String>,
}

impl InitAnswers {
    /// The answers a user accepting every default would give
    pub fn defaults(
        has_tsconfig: bool,
        is_installed: impl Fn(&str) -> bool,
        gerrit_host: Option<&str>,
    ) -> Self {
        Self {
            typescript: has_tsconfig,
            project_type: ProjectType::detect(is_installed),
            loose: true,
            module_type: Some(ModuleType::Es6),
            environment: RuntimeEnvironment::Browser,
            gerrit_support: true,
            gerrit_host: Some(gerrit_host.unwrap_or(DEFAULT_GERRIT_HOST).to_string()),
        }
    }

    /// Gerrit host to fetch hooks from, only when Gerrit support is on
    pub fn gerrit_host(&self) -> Option<&str> {
        if self.gerrit_support {
            self.gerrit_host.as_deref().filter(|h| !h.trim().is_empty())
        } else {
            None
        }
    }
}
