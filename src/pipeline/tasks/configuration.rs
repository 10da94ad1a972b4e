//! `.standard.jsonc` project settings

use std::fs;

use anyhow::Context as _;

use crate::cli::Output;
use crate::pipeline::{Context, TaskError};
use crate::storage::ProjectSettings;

/// Creates the settings file from the wizard answers. An existing file wins.
pub fn run(ctx: &mut Context, output: &Output) -> Result<(), TaskError> {
    let path = ctx.settings_path();

    if path.exists() {
        output.debug_ctx("configuration", &format!("keeping existing {}", path.display()));
        return Ok(());
    }

    let content = ProjectSettings::from_answers(ctx.answers()).render()?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write settings: {}", path.display()))?;

    output.success(&format!("Created {}", path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::domain::InitAnswers;
    use crate::storage::Manifest;
    use serde_json::json;
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> Context {
        let manifest = Manifest::from_value(dir.path().join("package.json"), json!({})).unwrap();
        Context::new(manifest, InitAnswers::defaults(true, |_| false, None), dir.path())
    }

    #[test]
    fn creates_settings_from_answers() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);

        run(&mut ctx, &Output::new(OutputFormat::Text, false)).unwrap();

        let settings = ProjectSettings::for_project(dir.path()).unwrap();
        assert!(settings.scripts().to_vec().contains(&"**/*.ts"));
    }

    #[test]
    fn existing_settings_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".standard.jsonc");
        fs::write(&path, "{\"milestone\": \"0.0.1\", \"milestoneAutoUpdate\": false}").unwrap();
        let mut ctx = context(&dir);

        run(&mut ctx, &Output::new(OutputFormat::Text, false)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("0.0.1"));
    }
}
