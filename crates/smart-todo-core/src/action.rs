//! State transitions over the task collection.
//!
//! Every mutation is a pure function of the old collection, the action and
//! the current time.

use crate::draft::TaskDraft;
use crate::task::{DueDate, Task, TaskId};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Append a task built with [`Task::new`]. Ignored if its id is taken.
    Create(Task),
    /// Replace the form fields of a task.
    Edit { id: TaskId, draft: TaskDraft },
    ToggleComplete(TaskId),
    Delete(TaskId),
    /// Drop every task.
    Clear,
}

/// Apply `action` to `tasks`, returning the new collection.
///
/// Actions naming an unknown id leave the collection unchanged.
pub fn reduce(tasks: &[Task], action: Action, now: DateTime<Utc>) -> Vec<Task> {
    match action {
        Action::Create(task) => {
            let mut next = tasks.to_vec();
            if !tasks.iter().any(|t| t.id == task.id) {
                next.push(task);
            }
            next
        }
        Action::Edit { id, draft } => tasks
            .iter()
            .map(|t| if t.id == id { edited(t, &draft, now) } else { t.clone() })
            .collect(),
        Action::ToggleComplete(id) => tasks
            .iter()
            .map(|t| if t.id == id { toggled(t, now) } else { t.clone() })
            .collect(),
        Action::Delete(id) => tasks.iter().filter(|t| t.id != id).cloned().collect(),
        Action::Clear => Vec::new(),
    }
}

fn edited(task: &Task, draft: &TaskDraft, now: DateTime<Utc>) -> Task {
    let mut next = Task {
        title: draft.title.trim().to_string(),
        description: draft.description.trim().to_string(),
        priority: draft.priority,
        category: draft.category.trim().to_string(),
        due_date: DueDate::from_date(draft.due_date),
        estimated_time: draft.estimated_time,
        ..task.clone()
    };
    next.touch(now);
    next
}

fn toggled(task: &Task, now: DateTime<Utc>) -> Task {
    let mut next = task.clone();
    if !task.completed && task.recorded_actual_time().is_none() {
        next.actual_time = Some(task.estimated_time);
    }
    next.completed = !task.completed;
    next.touch(now);
    next
}
