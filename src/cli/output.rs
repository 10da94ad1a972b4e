//! Leveled reporter for CLI commands
//!
//! Every user-facing message goes through [`Output`] with one of five levels.
//! Errors and warnings go to stderr, everything else to stdout. Debug
//! messages only show up in development mode or with `--verbose`.

use colored::Colorize;
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Message severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
    Success,
}

impl Level {
    fn prefix(&self) -> String {
        match self {
            Level::Error => "✖ error".red().bold().to_string(),
            Level::Warn => "⚠ warning".yellow().bold().to_string(),
            Level::Info => "ℹ".blue().to_string(),
            Level::Debug => "[debug]".dimmed().to_string(),
            Level::Success => "✔".green().to_string(),
        }
    }

    fn goes_to_stderr(&self) -> bool {
        matches!(self, Level::Error | Level::Warn)
    }
}

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
    debug: bool,
}

impl Output {
    pub fn new(format: OutputFormat, debug: bool) -> Self {
        Self { format, debug }
    }

    /// Prints a message at the given level
    pub fn print(&self, level: Level, message: &str) {
        if level == Level::Debug && !self.debug {
            return;
        }

        let line = match self.format {
            OutputFormat::Text => format!("{} {}", level.prefix(), message),
            OutputFormat::Json => serde_json::json!({
                "level": level,
                "message": message,
            })
            .to_string(),
        };

        if level.goes_to_stderr() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    pub fn error(&self, message: &str) {
        self.print(Level::Error, message);
    }

    pub fn warn(&self, message: &str) {
        self.print(Level::Warn, message);
    }

    pub fn info(&self, message: &str) {
        self.print(Level::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.print(Level::Debug, message);
    }

    /// Prints a debug message tagged with where it came from
    pub fn debug_ctx(&self, context: &str, message: &str) {
        if self.debug {
            self.print(Level::Debug, &format!("{}: {}", context, message));
        }
    }

    pub fn success(&self, message: &str) {
        self.print(Level::Success, message);
    }

    /// Prints structured data
    pub fn data<T: Serialize>(&self, data: &T) {
        let rendered = match self.format {
            OutputFormat::Text => serde_json::to_string_pretty(data),
            OutputFormat::Json => serde_json::to_string(data),
        };
        if let Ok(json) = rendered {
            println!("{}", json);
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Returns true if debug messages are shown
    pub fn is_debug(&self) -> bool {
        self.debug
    }
}
