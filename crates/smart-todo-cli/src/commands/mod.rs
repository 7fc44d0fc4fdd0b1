pub mod add;
pub mod calendar;
pub mod clear;
pub mod done;
pub mod edit;
pub mod init;
pub mod list;
pub mod rm;
pub mod show;
pub mod stats;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use smart_todo_core::draft::{TaskDraft, ValidationPolicy};
use smart_todo_store::workspace::Workspace;
use std::env;
use std::path::Path;
use tracing::debug;

/// Open the workspace at `dir`, or discover one upward from the cwd.
pub fn open_workspace(dir: Option<&Path>) -> Result<Workspace> {
    let ws = match dir {
        Some(root) => Workspace::open(root)
            .with_context(|| format!("no smart-todo workspace at {}", root.display()))?,
        None => {
            let cwd = env::current_dir().context("failed to get current directory")?;
            Workspace::discover(&cwd)
                .context("not a smart-todo workspace (or any parent); run `smart-todo init`")?
        }
    };
    debug!(root = %ws.root().display(), validation = %ws.config.validation, "opened workspace");
    Ok(ws)
}

/// The policy to validate with: `--strict` wins over the workspace config.
pub fn policy(workspace: &Workspace, strict: bool) -> ValidationPolicy {
    if strict {
        ValidationPolicy::Strict
    } else {
        workspace.config.validation
    }
}

/// Validate `draft`, printing one line per failing field to stderr.
pub fn check_draft(draft: &TaskDraft, policy: ValidationPolicy, today: NaiveDate) -> Result<()> {
    if let Err(errors) = draft.validate(policy, today) {
        let fields = errors.fields();
        for (field, message) in &fields {
            eprintln!("  {}: {}", field, message);
        }
        anyhow::bail!("task not saved: {} field(s) failed validation", fields.len());
    }
    Ok(())
}
