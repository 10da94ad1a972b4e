//! Gerrit `commit-msg` hook, which stamps a Change-Id on every commit

use std::path::Path;

use anyhow::{Context as _, Result};

use super::husky::{write_hook, HOOKS_DIR};
use crate::cli::Output;
use crate::pipeline::{Context, TaskError};

/// Where a Gerrit server publishes its commit-msg hook
pub fn commit_msg_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        format!("{}/tools/hooks/commit-msg", host)
    } else {
        format!("https://{}/tools/hooks/commit-msg", host)
    }
}

pub fn run(ctx: &mut Context, output: &Output) -> Result<(), TaskError> {
    let Some(host) = ctx.answers().gerrit_host() else {
        output.debug_ctx("gerrit", "Gerrit support disabled");
        return Ok(());
    };

    let url = commit_msg_url(host);
    let hooks_dir = ctx.cwd().join(HOOKS_DIR);
    output.debug_ctx("gerrit", &format!("commit-msg hook will be fetched from {}", url));

    ctx.on_finish("gerrit", move |output| install_commit_msg(&url, &hooks_dir, output));
    Ok(())
}

fn install_commit_msg(url: &str, hooks_dir: &Path, output: &Output) -> Result<()> {
    output.info(&format!("Fetching Gerrit commit-msg hook from {}", url));

    let script = reqwest::blocking::get(url)
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .with_context(|| format!("Failed to download {}", url))?;

    if !script.starts_with("#!") {
        anyhow::bail!("{} did not return a shell script", url);
    }

    let path = write_hook(hooks_dir, "commit-msg", &script)?;
    output.success(&format!("Wrote {}", path.display()));
    Ok(())
}
