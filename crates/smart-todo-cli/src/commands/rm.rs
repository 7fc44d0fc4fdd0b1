use anyhow::{Context, Result};
use chrono::Utc;
use smart_todo_core::action::Action;
use std::path::Path;

pub fn run(dir: Option<&Path>, id: String) -> Result<()> {
    let ws = super::open_workspace(dir)?;
    let mut store = ws.task_store();

    let task = store
        .resolve(&id)
        .with_context(|| format!("task '{}' not found", id))?;
    let (task_id, title) = (task.id.clone(), task.title.clone());
    store.dispatch(Action::Delete(task_id.clone()), Utc::now());

    println!("Deleted {} {}", task_id.short(), title);
    Ok(())
}
