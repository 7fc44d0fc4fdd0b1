use anyhow::Result;
use chrono::Utc;
use smart_todo_core::stats::{format_minutes, Insights, Recommendation, TaskStats};
use std::path::Path;

const BAR_WIDTH: usize = 20;

pub fn run(dir: Option<&Path>, json: bool) -> Result<()> {
    let ws = super::open_workspace(dir)?;
    let store = ws.task_store();
    let now = Utc::now();
    let stats = TaskStats::compute(store.tasks(), now);
    let insights = Insights::compute(store.tasks(), &stats, now);

    if json {
        let output = serde_json::json!({
            "stats": stats,
            "insights": insights,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Total tasks:  {}", stats.total_tasks);
    println!(
        "Completed:    {} ({:.1}% completion rate)",
        stats.completed_tasks, stats.completion_rate
    );
    println!("Overdue:      {}", stats.overdue_tasks);
    println!(
        "Avg time:     {} per task",
        format_minutes(stats.average_completion_time.round() as u32)
    );

    println!();
    println!("Productivity by category");
    if stats.productivity_by_category.is_empty() {
        println!("  No data to analyze yet. Create some tasks to see your productivity stats!");
    }
    let width = stats
        .productivity_by_category
        .keys()
        .map(|k| k.chars().count())
        .max()
        .unwrap_or(0);
    for (category, pct) in &stats.productivity_by_category {
        println!("  {:<width$}  {:>5.1}%  {}", category, pct, bar(*pct), width = width);
    }

    println!();
    println!("Quick insights");
    println!(
        "  This week:   {} tasks created in the last 7 days",
        insights.created_this_week
    );
    println!("  Upcoming:    {} tasks due within 3 days", insights.due_soon);
    println!("  Performance: {}", insights.performance.message());

    if !insights.recommendations.is_empty() {
        println!();
        println!("Recommendations");
        for rec in &insights.recommendations {
            let marker = match rec {
                Recommendation::ClearOverdue { .. } => "!",
                Recommendation::KeepGoing => "+",
                _ => "-",
            };
            println!("  {} {}", marker, rec.message());
        }
    }
    Ok(())
}

/// Fixed-width progress bar for a percentage.
fn bar(pct: f64) -> String {
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}
