//! Ordering and date filters over task lists.

use crate::task::Task;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::cmp::Ordering;

/// A task is overdue when it is incomplete and its due instant is strictly
/// before `now`. Due values without an instant are never overdue.
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    if task.completed {
        return false;
    }
    matches!(task.due_date.instant(), Some(due) if due < now)
}

/// Incomplete tasks first, then by descending priority, then by ascending
/// due instant. The sort is stable.
pub fn sort_by_priority(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(priority_order);
    sorted
}

fn priority_order(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| b.priority.cmp(&a.priority))
        .then_with(|| match (a.due_date.instant(), b.due_date.instant()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

/// Tasks whose due value textually starts with `date` as `YYYY-MM-DD`.
pub fn tasks_on(tasks: &[Task], date: NaiveDate) -> Vec<&Task> {
    tasks.iter().filter(|t| t.due_date.falls_on(date)).collect()
}

/// Incomplete tasks due at or before `now + days`, including overdue ones.
pub fn due_within(tasks: &[Task], now: DateTime<Utc>, days: i64) -> Vec<&Task> {
    let horizon = now + Duration::days(days);
    tasks
        .iter()
        .filter(|t| !t.completed)
        .filter(|t| matches!(t.due_date.instant(), Some(due) if due <= horizon))
        .collect()
}

/// Tasks created at or after `since`.
pub fn created_since(tasks: &[Task], since: DateTime<Utc>) -> Vec<&Task> {
    tasks.iter().filter(|t| t.created_at >= since).collect()
}
