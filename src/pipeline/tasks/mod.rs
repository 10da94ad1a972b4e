//! The tasks `wkstd init` runs, in order
//!
//! | Task | Effect |
//! |------|--------|
//! | `git` | Aborts unless the project root is a git repository |
//! | `husky` | Scripts, `.husky/pre-commit`, hook verification |
//! | `eslint` | Queues eslint and its plugins |
//! | `prettier` | Queues prettier |
//! | `gerrit` | Fetches the Gerrit commit-msg hook after install |
//! | `configuration` | Writes `.standard.jsonc` |

pub mod configuration;
pub mod gerrit;
pub mod git;
pub mod husky;
pub mod lint;

use super::Task;

/// Builds the init pipeline's task list
pub fn standard() -> Vec<Task> {
    vec![
        Task::new("git", git::ensure_git_repo),
        Task::new("husky", husky::run),
        Task::new("eslint", lint::eslint),
        Task::new("prettier", lint::prettier),
        Task::new("gerrit", gerrit::run),
        Task::new("configuration", configuration::run),
    ]
}
