use anyhow::{Context, Result};
use chrono::Utc;
use smart_todo_core::action::Action;
use std::path::Path;

pub fn run(dir: Option<&Path>, id: String) -> Result<()> {
    let ws = super::open_workspace(dir)?;
    let now = Utc::now();
    let mut store = ws.task_store();

    let task_id = store
        .resolve(&id)
        .with_context(|| format!("task '{}' not found", id))?
        .id
        .clone();
    store.dispatch(Action::ToggleComplete(task_id.clone()), now);

    if let Some(task) = store.get(&task_id) {
        let verb = if task.completed { "Completed" } else { "Reopened" };
        println!("{} {} {}", verb, task_id.short(), task.title);
    }
    Ok(())
}
