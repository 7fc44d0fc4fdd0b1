use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate, Utc};
use smart_todo_core::schedule::{is_overdue, sort_by_priority};
use smart_todo_core::stats::format_minutes;
use smart_todo_core::task::DueDate;
use std::path::Path;

pub fn run(dir: Option<&Path>, json: bool) -> Result<()> {
    let ws = super::open_workspace(dir)?;
    let store = ws.task_store();
    let now = Utc::now();
    let today = now.date_naive();
    let sorted = sort_by_priority(store.tasks());

    if json {
        let entries: Vec<_> = sorted
            .iter()
            .map(|t| {
                serde_json::json!({
                    "id": t.id.as_str(),
                    "overdue": is_overdue(t, now),
                    "task": t,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if sorted.is_empty() {
        println!("No tasks yet. Create your first one with `smart-todo add`.");
        return Ok(());
    }

    let completed = sorted.iter().filter(|t| t.completed).count();
    let overdue = sorted.iter().filter(|t| is_overdue(t, now)).count();
    println!(
        "{} in progress, {} completed, {} overdue",
        sorted.len() - completed,
        completed,
        overdue
    );

    for task in &sorted {
        let overdue = is_overdue(task, now);
        println!();
        println!(
            "[{}] {} {}",
            if task.completed { "x" } else { " " },
            task.id.short(),
            task.title
        );
        println!(
            "    {} | {} | Due: {}{} | Est: {}",
            task.priority.label(),
            task.category,
            due_label(&task.due_date, today),
            if overdue { " (Overdue)" } else { "" },
            format_minutes(task.estimated_time)
        );
        if !task.description.is_empty() {
            println!("    {}", task.description);
        }
    }
    Ok(())
}

/// "Today", "Tomorrow", "Mar 5", or "Mar 5, 2026" outside the current year.
pub fn due_label(due: &DueDate, today: NaiveDate) -> String {
    let Some(date) = due.date() else {
        return due.as_str().to_string();
    };
    if date == today {
        "Today".into()
    } else if date == today + Duration::days(1) {
        "Tomorrow".into()
    } else if date.year() == today.year() {
        date.format("%b %-d").to_string()
    } else {
        date.format("%b %-d, %Y").to_string()
    }
}
