//! Month grid construction and per-day / per-month summaries.

use crate::error::CoreError;
use crate::schedule::{is_overdue, tasks_on};
use crate::task::Task;
use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::Serialize;

pub const DAYS_PER_WEEK: usize = 7;

/// One row of the grid, Sunday first. `None` cells pad the month.
pub type Week = [Option<u32>; DAYS_PER_WEEK];

/// A month laid out as 7-wide rows starting on its first weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    first: NaiveDate,
    weeks: Vec<Week>,
}

impl MonthGrid {
    pub fn build(year: i32, month: u32) -> Result<Self, CoreError> {
        if !(1..=12).contains(&month) {
            return Err(CoreError::InvalidMonth(month));
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| CoreError::InvalidDate(format!("{}-{:02}-01", year, month)))?;
        Ok(Self::from_first(first))
    }

    /// The grid of the month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self::from_first(date.with_day(1).unwrap_or(date))
    }

    fn from_first(first: NaiveDate) -> Self {
        let offset = first.weekday().num_days_from_sunday() as usize;
        let days = days_in_month(first);

        let mut weeks = Vec::new();
        let mut week: Week = [None; DAYS_PER_WEEK];
        let mut slot = offset;
        for day in 1..=days {
            week[slot] = Some(day);
            slot += 1;
            if slot == DAYS_PER_WEEK {
                weeks.push(week);
                week = [None; DAYS_PER_WEEK];
                slot = 0;
            }
        }
        if slot > 0 {
            weeks.push(week);
        }
        Self { first, weeks }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.first)
    }

    /// The date of `day` in this month, if it exists.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        self.first.with_day(day)
    }

    pub fn next(&self) -> Option<Self> {
        self.first.checked_add_months(Months::new(1)).map(Self::from_first)
    }

    pub fn prev(&self) -> Option<Self> {
        self.first.checked_sub_months(Months::new(1)).map(Self::from_first)
    }

    /// English month name, e.g. "March".
    pub fn month_name(&self) -> String {
        self.first.format("%B").to_string()
    }
}

fn days_in_month(first: NaiveDate) -> u32 {
    match first.checked_add_months(Months::new(1)) {
        Some(next) => next.signed_duration_since(first).num_days() as u32,
        // December of the last representable year
        None => 31,
    }
}

/// What the calendar shows for one day cell.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary<'a> {
    pub date: NaiveDate,
    pub tasks: Vec<&'a Task>,
    pub completed: usize,
    pub has_overdue: bool,
    pub is_today: bool,
}

impl<'a> DaySummary<'a> {
    pub fn collect(tasks: &'a [Task], date: NaiveDate, now: DateTime<Utc>) -> Self {
        let day_tasks = tasks_on(tasks, date);
        Self {
            date,
            completed: day_tasks.iter().filter(|t| t.completed).count(),
            has_overdue: day_tasks.iter().any(|t| is_overdue(t, now)),
            is_today: date == now.date_naive(),
            tasks: day_tasks,
        }
    }
}

/// Counts over the tasks due in one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthStats {
    pub total: usize,
    pub completed: usize,
    pub overdue: usize,
    /// Whole percent.
    pub completion_rate: u32,
}

impl MonthStats {
    pub fn compute(tasks: &[Task], year: i32, month: u32, now: DateTime<Utc>) -> Self {
        let mut stats = MonthStats::default();
        let in_month = tasks.iter().filter(|t| {
            t.due_date
                .date()
                .is_some_and(|d| d.year() == year && d.month() == month)
        });
        for task in in_month {
            stats.total += 1;
            if task.completed {
                stats.completed += 1;
            }
            if is_overdue(task, now) {
                stats.overdue += 1;
            }
        }
        if stats.total > 0 {
            stats.completion_rate =
                (stats.completed as f64 / stats.total as f64 * 100.0).round() as u32;
        }
        stats
    }
}
