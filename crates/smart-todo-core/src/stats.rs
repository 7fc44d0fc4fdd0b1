//! Aggregate statistics and the insights derived from them.

use crate::schedule::{created_since, due_within, is_overdue};
use crate::task::Task;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Category label used for tasks with an empty category.
pub const UNCATEGORIZED: &str = "Uncategorized";

const RECENT_DAYS: i64 = 7;
const UPCOMING_DAYS: i64 = 3;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub overdue_tasks: usize,
    /// Percent, 0 when there are no tasks.
    pub completion_rate: f64,
    /// Mean recorded actual minutes over completed tasks, 0 when none.
    pub average_completion_time: f64,
    /// Completion percent per category.
    pub productivity_by_category: BTreeMap<String, f64>,
}

impl TaskStats {
    pub fn compute(tasks: &[Task], now: DateTime<Utc>) -> Self {
        let total_tasks = tasks.len();
        let completed_tasks = tasks.iter().filter(|t| t.completed).count();
        let overdue_tasks = tasks.iter().filter(|t| is_overdue(t, now)).count();

        let recorded: Vec<u32> = tasks
            .iter()
            .filter(|t| t.completed)
            .filter_map(|t| t.recorded_actual_time())
            .collect();
        let average_completion_time = if recorded.is_empty() {
            0.0
        } else {
            recorded.iter().map(|m| *m as f64).sum::<f64>() / recorded.len() as f64
        };

        let mut per_category: BTreeMap<String, (usize, usize)> = BTreeMap::new();
        for task in tasks {
            let category = if task.category.is_empty() {
                UNCATEGORIZED
            } else {
                task.category.as_str()
            };
            let entry = per_category.entry(category.to_string()).or_default();
            entry.0 += 1;
            if task.completed {
                entry.1 += 1;
            }
        }
        let productivity_by_category = per_category
            .into_iter()
            .map(|(category, (total, completed))| (category, percent(completed, total)))
            .collect();

        Self {
            total_tasks,
            completed_tasks,
            overdue_tasks,
            completion_rate: percent(completed_tasks, total_tasks),
            average_completion_time,
            productivity_by_category,
        }
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Performance {
    Excellent,
    Good,
    NeedsFocus,
}

impl Performance {
    pub fn from_rate(completion_rate: f64) -> Self {
        if completion_rate >= 80.0 {
            Performance::Excellent
        } else if completion_rate >= 60.0 {
            Performance::Good
        } else {
            Performance::NeedsFocus
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Performance::Excellent => "Excellent! Keep it up!",
            Performance::Good => "Good! Room for improvement",
            Performance::NeedsFocus => "Need to focus more",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    ClearOverdue { overdue: usize },
    BreakDownTasks,
    TightenEstimates,
    KeepGoing,
    GetStarted,
}

impl Recommendation {
    pub fn message(&self) -> String {
        match self {
            Recommendation::ClearOverdue { overdue } => format!(
                "You have {} overdue tasks. Consider prioritizing them first!",
                overdue
            ),
            Recommendation::BreakDownTasks => {
                "Try breaking down large tasks into smaller, manageable pieces.".into()
            }
            Recommendation::TightenEstimates => {
                "Your tasks might be too long. Consider more accurate time estimation.".into()
            }
            Recommendation::KeepGoing => "Great job! You're managing your time very well!".into(),
            Recommendation::GetStarted => {
                "Start by creating your first task to begin tracking your productivity.".into()
            }
        }
    }
}

/// Dashboard insights layered over [`TaskStats`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    /// Tasks created in the last 7 days.
    pub created_this_week: usize,
    /// Incomplete tasks due within 3 days, overdue ones included.
    pub due_soon: usize,
    pub performance: Performance,
    pub recommendations: Vec<Recommendation>,
}

impl Insights {
    pub fn compute(tasks: &[Task], stats: &TaskStats, now: DateTime<Utc>) -> Self {
        let mut recommendations = Vec::new();
        if stats.overdue_tasks > 0 {
            recommendations.push(Recommendation::ClearOverdue {
                overdue: stats.overdue_tasks,
            });
        }
        if stats.completion_rate < 50.0 {
            recommendations.push(Recommendation::BreakDownTasks);
        }
        if stats.average_completion_time > 120.0 {
            recommendations.push(Recommendation::TightenEstimates);
        }
        if stats.total_tasks > 0 && stats.completion_rate >= 80.0 {
            recommendations.push(Recommendation::KeepGoing);
        }
        if stats.total_tasks == 0 {
            recommendations.push(Recommendation::GetStarted);
        }

        Self {
            created_this_week: created_since(tasks, now - Duration::days(RECENT_DAYS)).len(),
            due_soon: due_within(tasks, now, UPCOMING_DAYS).len(),
            performance: Performance::from_rate(stats.completion_rate),
            recommendations,
        }
    }
}

/// Render minutes as `"1h 5m"`, or `"45m"` under an hour.
pub fn format_minutes(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}
