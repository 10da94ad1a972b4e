//! eslint and prettier packages
//!
//! These tasks only decide which packages a project needs. Rule presets are
//! left to the project's own eslint/prettier configuration.

use crate::cli::Output;
use crate::domain::{Dependency, ProjectType};
use crate::pipeline::{Context, TaskError};

fn eslint_packages(typescript: bool, project_type: ProjectType) -> Vec<&'static str> {
    let mut packages = vec!["eslint"];

    if typescript {
        packages.extend(["@typescript-eslint/parser", "@typescript-eslint/eslint-plugin"]);
    }

    match project_type {
        ProjectType::React | ProjectType::Taro => {
            packages.extend(["eslint-plugin-react", "eslint-plugin-react-hooks"]);
        }
        ProjectType::Vue => packages.push("eslint-plugin-vue"),
        ProjectType::Standard => {}
    }

    packages
}

fn queue_missing(ctx: &mut Context, output: &Output, packages: &[&str]) {
    for package in packages {
        if let Some(version) = ctx.manifest.get_version(package) {
            output.debug_ctx("deps", &format!("{} {} already installed", package, version));
        } else {
            ctx.add_dep(Dependency::dev(*package));
        }
    }
}

pub fn eslint(ctx: &mut Context, output: &Output) -> Result<(), TaskError> {
    let answers = ctx.answers();
    let packages = eslint_packages(answers.typescript, answers.project_type);
    queue_missing(ctx, output, &packages);
    Ok(())
}

pub fn prettier(ctx: &mut Context, output: &Output) -> Result<(), TaskError> {
    queue_missing(ctx, output, &["prettier"]);
    Ok(())
}
