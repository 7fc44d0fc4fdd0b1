use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use smart_todo_core::action::Action;
use smart_todo_core::draft::TaskDraft;
use smart_todo_core::task::Priority;
use std::path::Path;

/// Fields to overwrite; `None` keeps the current value.
pub struct Changes {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub due: Option<NaiveDate>,
    pub estimate: Option<u32>,
}

impl Changes {
    fn apply(self, draft: &mut TaskDraft) {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(category) = self.category {
            draft.category = category;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(priority) = self.priority {
            draft.priority = priority;
        }
        if let Some(due) = self.due {
            draft.due_date = due;
        }
        if let Some(estimate) = self.estimate {
            draft.estimated_time = estimate;
        }
    }
}

pub fn run(dir: Option<&Path>, id: String, changes: Changes, strict: bool) -> Result<()> {
    let ws = super::open_workspace(dir)?;
    let now = Utc::now();
    let today = now.date_naive();
    let mut store = ws.task_store();

    let task = store
        .resolve(&id)
        .with_context(|| format!("task '{}' not found", id))?;
    let task_id = task.id.clone();
    let mut draft = TaskDraft::from_task(task, today);
    changes.apply(&mut draft);
    super::check_draft(&draft, super::policy(&ws, strict), today)?;

    store.dispatch(Action::Edit { id: task_id.clone(), draft }, now);
    println!("Updated {}", task_id.short());
    Ok(())
}
