//! Packages queued for installation

use std::fmt;

/// A package to add to `dependencies` or `devDependencies`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub version: Option<String>,
    pub dev: bool,
}

impl Dependency {
    /// A runtime dependency at the latest version
    pub fn runtime(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            dev: false,
        }
    }

    /// A dev dependency at the latest version
    pub fn dev(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            dev: true,
        }
    }

    /// Pins the version range handed to the package manager
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// The `name@version` argument a package manager understands
    pub fn spec(&self) -> String {
        match &self.version {
            Some(version) => format!("{}@{}", self.name, version),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spec())
    }
}
