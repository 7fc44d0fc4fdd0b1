use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use smart_todo_core::calendar::{DaySummary, MonthGrid, MonthStats, Week};
use smart_todo_core::schedule::is_overdue;
use std::path::Path;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const TITLES_PER_DAY: usize = 3;
const TITLE_WIDTH: usize = 18;

pub fn run(dir: Option<&Path>, year: Option<i32>, month: Option<u32>, json: bool) -> Result<()> {
    let ws = super::open_workspace(dir)?;
    let store = ws.task_store();
    let tasks = store.tasks();
    let now = Utc::now();
    let today = now.date_naive();

    let grid = MonthGrid::build(
        year.unwrap_or(today.year()),
        month.unwrap_or(today.month()),
    )
    .context("invalid calendar month")?;
    let days: Vec<DaySummary> = (1..=grid.days_in_month())
        .filter_map(|d| grid.date(d))
        .map(|date| DaySummary::collect(tasks, date, now))
        .collect();
    let stats = MonthStats::compute(tasks, grid.year(), grid.month(), now);

    if json {
        let busy: Vec<&DaySummary> = days.iter().filter(|d| !d.tasks.is_empty()).collect();
        let output = serde_json::json!({
            "year": grid.year(),
            "month": grid.month(),
            "weeks": grid.weeks(),
            "days": busy,
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{} {}", grid.month_name(), grid.year());
    println!();
    let header: Vec<String> = DAY_NAMES.iter().map(|d| format!("{:>4}", d)).collect();
    println!("{}", header.join(" "));
    for week in grid.weeks() {
        println!("{}", render_week(week, &days));
    }

    let busy: Vec<&DaySummary> = days.iter().filter(|d| !d.tasks.is_empty()).collect();
    if !busy.is_empty() {
        println!();
        for day in busy {
            println!(
                "{} ({}/{}){}",
                day.date.format("%b %-d"),
                day.completed,
                day.tasks.len(),
                if day.has_overdue { " !" } else { "" }
            );
            for task in day.tasks.iter().take(TITLES_PER_DAY) {
                let marker = if task.completed {
                    "x"
                } else if is_overdue(task, now) {
                    "!"
                } else {
                    "-"
                };
                println!(
                    "  {} {} ({}, {})",
                    marker,
                    truncate(&task.title, TITLE_WIDTH),
                    task.category,
                    task.priority
                );
            }
            if day.tasks.len() > TITLES_PER_DAY {
                println!("  +{} more tasks", day.tasks.len() - TITLES_PER_DAY);
            }
        }
    }

    println!();
    println!("Total tasks this month: {}", stats.total);
    println!("Completed:              {}", stats.completed);
    println!("Overdue:                {}", stats.overdue);
    println!("Completion rate:        {}%", stats.completion_rate);
    println!();
    println!("Legend: * has tasks  ! overdue  [d] today");
    Ok(())
}

/// One grid row; `days` is indexed by day-of-month minus one.
fn render_week(week: &Week, days: &[DaySummary]) -> String {
    let cells: Vec<String> = week
        .iter()
        .map(|&cell| match cell.and_then(|d| days.get(d as usize - 1).map(|s| (d, s))) {
            None => "    ".to_string(),
            Some((day, summary)) => {
                let marker = if summary.has_overdue {
                    "!"
                } else if !summary.tasks.is_empty() {
                    "*"
                } else {
                    " "
                };
                if summary.is_today {
                    format!("[{:>2}]", day)
                } else {
                    format!(" {:>2}{}", day, marker)
                }
            }
        })
        .collect();
    cells.join(" ").trim_end().to_string()
}

/// Cut `s` to `max` chars, appending "..." when shortened.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}
