use anyhow::{Context, Result};
use chrono::Utc;
use smart_todo_core::schedule::is_overdue;
use smart_todo_core::stats::format_minutes;
use std::path::Path;

pub fn run(dir: Option<&Path>, id: String, json: bool) -> Result<()> {
    let ws = super::open_workspace(dir)?;
    let store = ws.task_store();
    let task = store
        .resolve(&id)
        .with_context(|| format!("task '{}' not found", id))?;
    let overdue = is_overdue(task, Utc::now());

    if json {
        let output = serde_json::json!({
            "id": task.id.as_str(),
            "overdue": overdue,
            "task": task,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("task {}", task.id.as_str());
    println!("Title:     {}", task.title);
    println!("Status:    {}", if task.completed { "completed" } else { "in progress" });
    println!("Priority:  {}", task.priority.label());
    println!("Category:  {}", task.category);
    println!(
        "Due:       {}{}",
        task.due_date,
        if overdue { " (Overdue)" } else { "" }
    );
    println!("Estimate:  {}", format_minutes(task.estimated_time));
    if let Some(actual) = task.actual_time {
        println!("Actual:    {}", format_minutes(actual));
    }
    println!("Created:   {}", task.created_at.format("%Y-%m-%d %H:%M:%S %Z"));
    println!("Updated:   {}", task.updated_at.format("%Y-%m-%d %H:%M:%S %Z"));
    if !task.description.is_empty() {
        println!();
        println!("    {}", task.description);
    }
    Ok(())
}
