//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::environment::RunEnvironment;
use super::init::{self, InitArgs};
use super::local_check;
use super::output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "wkstd")]
#[command(author, version, about = "Lint, format and git-hook tooling for JavaScript projects")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Show debug output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up eslint, prettier, husky and Gerrit hooks in a project
    Init(InitArgs),

    /// Check staged files (run by the pre-commit hook)
    LocalCheck {
        /// Project root (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let env = RunEnvironment::detect();

    if env.ci {
        colored::control::set_override(false);
    }

    let output = Output::new(cli.format, cli.verbose || env.development);
    output.debug(&format!("{:?}", env));

    match cli.command {
        Commands::Init(args) => init::run(&output, args, env)?,
        Commands::LocalCheck { path } => local_check::run(&output, &path)?,
    }

    output.debug("Command completed successfully");
    Ok(())
}
