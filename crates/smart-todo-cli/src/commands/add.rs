use anyhow::Result;
use chrono::{NaiveDate, Utc};
use smart_todo_core::action::Action;
use smart_todo_core::draft::TaskDraft;
use smart_todo_core::task::{Priority, Task};
use std::path::Path;

pub struct Fields {
    pub title: String,
    pub category: String,
    pub description: String,
    pub priority: Priority,
    pub due: Option<NaiveDate>,
    pub estimate: u32,
}

pub fn run(dir: Option<&Path>, fields: Fields, strict: bool) -> Result<()> {
    let ws = super::open_workspace(dir)?;
    let now = Utc::now();
    let today = now.date_naive();

    let draft = TaskDraft {
        title: fields.title,
        description: fields.description,
        priority: fields.priority,
        category: fields.category,
        due_date: fields.due.unwrap_or(today),
        estimated_time: fields.estimate,
    };
    super::check_draft(&draft, super::policy(&ws, strict), today)?;

    let task = Task::new(draft, now);
    let id = task.id.clone();
    let title = task.title.clone();
    let mut store = ws.task_store();
    store.dispatch(Action::Create(task), now);

    println!("Created {} {}", id.short(), title);
    Ok(())
}
