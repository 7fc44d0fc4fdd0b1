use anyhow::Result;
use chrono::Utc;
use smart_todo_core::action::Action;
use std::path::Path;

pub fn run(dir: Option<&Path>, yes: bool) -> Result<()> {
    let ws = super::open_workspace(dir)?;
    let mut store = ws.task_store();
    let count = store.tasks().len();

    if !yes && count > 0 {
        anyhow::bail!("refusing to delete {} task(s) without --yes", count);
    }
    store.dispatch(Action::Clear, Utc::now());
    println!("Deleted {} task(s)", count);
    Ok(())
}
