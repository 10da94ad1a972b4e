//! Interactive init wizard

use anyhow::{Context as _, Result};
use inquire::{Confirm, Select, Text};

use crate::domain::{InitAnswers, ModuleType, ProjectType, RuntimeEnvironment, DEFAULT_GERRIT_HOST};

const MODULE_CHOICES: &[Option<ModuleType>] = &[Some(ModuleType::Es6), Some(ModuleType::CommonJs), None];

fn module_label(choice: &Option<ModuleType>) -> &'static str {
    match choice {
        Some(module_type) => module_type.label(),
        None => "None of these",
    }
}

fn position<T: PartialEq>(items: &[T], wanted: &T) -> usize {
    items.iter().position(|item| item == wanted).unwrap_or(0)
}

fn confirm(message: &str, default: bool) -> Result<bool> {
    Confirm::new(message)
        .with_default(default)
        .prompt()
        .with_context(|| format!("Prompt cancelled: {}", message))
}

fn select(message: &str, labels: Vec<&'static str>, default: usize) -> Result<usize> {
    let choice = Select::new(message, labels)
        .with_starting_cursor(default)
        .raw_prompt()
        .with_context(|| format!("Prompt cancelled: {}", message))?;
    Ok(choice.index)
}

/// Asks every wizard question, pre-selecting the values in `defaults`
pub fn ask(defaults: &InitAnswers) -> Result<InitAnswers> {
    let typescript = confirm("Enable TypeScript checks?", defaults.typescript)?;

    let types = ProjectType::all();
    let project_type = types[select(
        "Project type",
        types.iter().map(ProjectType::label).collect(),
        position(types, &defaults.project_type),
    )?];

    let loose = confirm(
        "Enable loose mode? (recommended while migrating an existing project)",
        defaults.loose,
    )?;

    let module_type = MODULE_CHOICES[select(
        "Module system",
        MODULE_CHOICES.iter().map(module_label).collect(),
        position(MODULE_CHOICES, &defaults.module_type),
    )?];

    let environments = RuntimeEnvironment::all();
    let environment = environments[select(
        "Runtime environment",
        environments.iter().map(RuntimeEnvironment::label).collect(),
        position(environments, &defaults.environment),
    )?];

    let gerrit_support = confirm("Push reviews through Gerrit?", defaults.gerrit_support)?;

    let gerrit_host = if gerrit_support {
        let default_host = defaults.gerrit_host.as_deref().unwrap_or(DEFAULT_GERRIT_HOST);
        let host = Text::new("Gerrit server address")
            .with_default(default_host)
            .prompt()
            .context("Prompt cancelled: Gerrit server address")?;
        Some(host)
    } else {
        None
    };

    Ok(InitAnswers {
        typescript,
        project_type,
        loose,
        module_type,
        environment,
        gerrit_support,
        gerrit_host,
    })
}
