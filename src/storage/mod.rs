//! # Storage Layer
//!
//! Files wkstd reads and rewrites inside a JavaScript project.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Manifest | JSON, 2-space indent | `package.json` |
//! | Project settings | JSON with line comments | `.standard.jsonc` |
//! | Global settings | TOML | `~/.config/wkstd/config.toml` |
//!
//! ## Key Types
//!
//! - [`Manifest`] - Path-addressed access to `package.json` with a dirty flag
//! - [`ProjectSettings`] - Lint/format patterns used by `local-check`
//! - [`GlobalSettings`] - Per-user defaults

mod manifest;
mod settings;

pub use manifest::{Manifest, ManifestError};
pub use settings::{GlobalSettings, Patterns, ProjectSettings, SettingsError, SETTINGS_FILE};
