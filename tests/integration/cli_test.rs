use assert_cmd::Command;
use chrono::{Datelike, Duration, Utc};
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn todo(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("smart-todo").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("SMART_TODO_DIR")
        .env_remove("RUST_LOG");
    cmd
}

fn init_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    todo(&dir).arg("init").assert().success();
    dir
}

/// Run `add` and return the short id from "Created <id> <title>".
fn add(dir: &TempDir, args: &[&str]) -> String {
    let output = todo(dir).arg("add").args(args).output().unwrap();
    assert!(output.status.success(), "add failed: {:?}", output);
    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout.split_whitespace().nth(1).unwrap().to_string()
}

fn json(dir: &TempDir, args: &[&str]) -> Value {
    let output = todo(dir).args(args).arg("--json").output().unwrap();
    assert!(output.status.success(), "{:?} failed: {:?}", args, output);
    serde_json::from_slice(&output.stdout).unwrap()
}

fn days_from_today(days: i64) -> String {
    (Utc::now().date_naive() + Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

#[test]
fn init_creates_workspace_dir() {
    let dir = TempDir::new().unwrap();
    todo(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains(".smart-todo"));

    assert!(dir.path().join(".smart-todo").is_dir());
    assert!(dir.path().join(".smart-todo/config.json").exists());
}

#[test]
fn init_twice_fails() {
    let dir = init_workspace();
    todo(&dir).arg("init").assert().failure();
}

#[test]
fn commands_outside_workspace_fail() {
    let dir = TempDir::new().unwrap();
    todo(&dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a smart-todo workspace"));
}

#[test]
fn list_empty_workspace() {
    let dir = init_workspace();
    todo(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks yet"));
}

#[test]
fn add_then_list_sorted_by_priority() {
    let dir = init_workspace();
    add(&dir, &["-t", "Water plants", "-c", "Home", "-p", "low"]);
    add(&dir, &["-t", "Finish thesis", "-c", "Study", "-p", "high"]);
    add(&dir, &["-t", "Call bank", "-c", "Admin"]);

    let output = todo(&dir).arg("list").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let high = stdout.find("Finish thesis").unwrap();
    let medium = stdout.find("Call bank").unwrap();
    let low = stdout.find("Water plants").unwrap();
    assert!(high < medium && medium < low);
    assert!(stdout.contains("3 in progress, 0 completed"));
}

#[test]
fn add_reports_each_invalid_field() {
    let dir = init_workspace();
    todo(&dir)
        .args(["add", "--estimate", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("title: Title is required"))
        .stderr(predicate::str::contains("category: Category is required"))
        .stderr(predicate::str::contains("estimate:"));

    let tasks = json(&dir, &["list"]);
    assert_eq!(tasks.as_array().unwrap().len(), 0);
}

#[test]
fn strict_flag_limits_estimate() {
    let dir = init_workspace();
    todo(&dir)
        .args(["add", "-t", "Marathon", "-c", "Fun", "-e", "2000", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1440"));

    todo(&dir)
        .args(["add", "-t", "Marathon", "-c", "Fun", "-e", "2000"])
        .assert()
        .success();
}

#[test]
fn strict_workspace_rejects_past_due_date() {
    let dir = TempDir::new().unwrap();
    todo(&dir).args(["init", "--strict"]).assert().success();

    let yesterday = days_from_today(-1);
    todo(&dir)
        .args(["add", "-t", "Late", "-c", "Work", "--due", yesterday.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("due: Due date cannot be in the past"));
}

#[test]
fn new_task_fields() {
    let dir = init_workspace();
    let due = days_from_today(2);
    add(
        &dir,
        &["-t", "  Draft essay ", "-c", "Writing", "-d", "Intro and outline", "--due", due.as_str(), "-e", "45"],
    );

    let tasks = json(&dir, &["list"]);
    let task = &tasks[0]["task"];
    assert_eq!(task["title"], "Draft essay");
    assert_eq!(task["dueDate"], due.as_str());
    assert_eq!(task["estimatedTime"], 45);
    assert_eq!(task["completed"], false);
    assert_eq!(task["createdAt"], task["updatedAt"]);
    assert!(task.get("actualTime").is_none());
    assert_eq!(tasks[0]["overdue"], false);
}

#[test]
fn done_toggles_and_records_actual_time() {
    let dir = init_workspace();
    let id = add(&dir, &["-t", "Review notes", "-c", "Study", "-e", "40"]);

    todo(&dir)
        .args(["done", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed"));
    let tasks = json(&dir, &["list"]);
    assert_eq!(tasks[0]["task"]["completed"], true);
    assert_eq!(tasks[0]["task"]["actualTime"], 40);

    todo(&dir)
        .args(["done", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reopened"));
    let tasks = json(&dir, &["list"]);
    assert_eq!(tasks[0]["task"]["completed"], false);
    assert_eq!(tasks[0]["task"]["actualTime"], 40);
}

#[test]
fn edit_overrides_given_fields() {
    let dir = init_workspace();
    let id = add(&dir, &["-t", "Old title", "-c", "Home", "-e", "20"]);

    todo(&dir)
        .args(["edit", id.as_str(), "-t", "New title", "-p", "high"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated"));

    let shown = json(&dir, &["show", id.as_str()]);
    let task = &shown["task"];
    assert_eq!(task["title"], "New title");
    assert_eq!(task["priority"], "high");
    assert_eq!(task["category"], "Home");
    assert_eq!(task["estimatedTime"], 20);
}

#[test]
fn edit_rejects_blank_title() {
    let dir = init_workspace();
    let id = add(&dir, &["-t", "Keep me", "-c", "Home"]);
    todo(&dir)
        .args(["edit", id.as_str(), "-t", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Title is required"));

    let shown = json(&dir, &["show", id.as_str()]);
    let task = &shown["task"];
    assert_eq!(task["title"], "Keep me");
}

#[test]
fn show_by_prefix() {
    let dir = init_workspace();
    let id = add(&dir, &["-t", "Prefix lookup", "-c", "Test"]);
    todo(&dir)
        .args(["show", &id[..5]])
        .assert()
        .success()
        .stdout(predicate::str::contains("Prefix lookup"));
}

#[test]
fn unknown_id_fails() {
    let dir = init_workspace();
    add(&dir, &["-t", "Exists", "-c", "Test"]);
    todo(&dir)
        .args(["done", "nonexistent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn rm_deletes_task() {
    let dir = init_workspace();
    let id = add(&dir, &["-t", "Disposable", "-c", "Tmp"]);
    add(&dir, &["-t", "Keeper", "-c", "Tmp"]);

    todo(&dir)
        .args(["rm", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));

    let tasks = json(&dir, &["list"]);
    let titles: Vec<_> = tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["task"]["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Keeper"]);
}

#[test]
fn clear_requires_confirmation() {
    let dir = init_workspace();
    add(&dir, &["-t", "One", "-c", "X"]);
    add(&dir, &["-t", "Two", "-c", "X"]);

    todo(&dir)
        .arg("clear")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
    todo(&dir)
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2 task(s)"));
    assert_eq!(json(&dir, &["list"]).as_array().unwrap().len(), 0);
}

#[test]
fn overdue_tasks_flagged() {
    let dir = init_workspace();
    let past = days_from_today(-3);
    add(&dir, &["-t", "Missed deadline", "-c", "Work", "--due", past.as_str()]);

    todo(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("(Overdue)"))
        .stdout(predicate::str::contains("1 overdue"));
}

#[test]
fn calendar_shows_month_and_counts() {
    let dir = init_workspace();
    add(&dir, &["-t", "Budget review", "-c", "Finance", "--due", "2031-03-14"]);
    let id = add(&dir, &["-t", "Tax filing", "-c", "Finance", "--due", "2031-03-14"]);
    add(&dir, &["-t", "April thing", "-c", "Misc", "--due", "2031-04-02"]);
    todo(&dir).args(["done", id.as_str()]).assert().success();

    todo(&dir)
        .args(["calendar", "--year", "2031", "--month", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("March 2031"))
        .stdout(predicate::str::contains("Mar 14 (1/2)"))
        .stdout(predicate::str::contains("Total tasks this month: 2"))
        .stdout(predicate::str::contains("Completion rate:        50%"));

    let cal = json(&dir, &["calendar", "--year", "2031", "--month", "3"]);
    assert_eq!(cal["stats"]["total"], 2);
    assert_eq!(cal["stats"]["completed"], 1);
    assert_eq!(cal["days"].as_array().unwrap().len(), 1);
    // 1 March 2031 is a Saturday
    assert_eq!(cal["weeks"][0][6], 1);
    assert!(cal["weeks"][0][0].is_null());
}

#[test]
fn calendar_defaults_to_current_month() {
    let dir = init_workspace();
    let now = Utc::now().date_naive();
    let cal = json(&dir, &["calendar"]);
    assert_eq!(cal["year"], now.year());
    assert_eq!(cal["month"], now.month());
}

#[test]
fn calendar_rejects_invalid_month() {
    let dir = init_workspace();
    todo(&dir)
        .args(["calendar", "--month", "13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid"));
}

#[test]
fn stats_on_empty_workspace() {
    let dir = init_workspace();
    let out = json(&dir, &["stats"]);
    assert_eq!(out["stats"]["totalTasks"], 0);
    assert_eq!(out["stats"]["completionRate"], 0.0);
    assert_eq!(out["stats"]["averageCompletionTime"], 0.0);
    assert!(out["stats"]["productivityByCategory"].as_object().unwrap().is_empty());

    todo(&dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("No data to analyze yet"))
        .stdout(predicate::str::contains("Start by creating your first task"));
}

#[test]
fn stats_by_category() {
    let dir = init_workspace();
    let id = add(&dir, &["-t", "A", "-c", "Study", "-e", "60"]);
    add(&dir, &["-t", "B", "-c", "Study"]);
    add(&dir, &["-t", "C", "-c", "Home"]);
    todo(&dir).args(["done", id.as_str()]).assert().success();

    let out = json(&dir, &["stats"]);
    assert_eq!(out["stats"]["totalTasks"], 3);
    assert_eq!(out["stats"]["completedTasks"], 1);
    assert_eq!(out["stats"]["averageCompletionTime"], 60.0);
    assert_eq!(out["stats"]["productivityByCategory"]["Study"], 50.0);
    assert_eq!(out["stats"]["productivityByCategory"]["Home"], 0.0);
    assert_eq!(out["insights"]["createdThisWeek"], 3);

    todo(&dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Productivity by category"))
        .stdout(predicate::str::contains("1h 0m per task"));
}

#[test]
fn malformed_storage_starts_empty() {
    let dir = init_workspace();
    fs::write(
        dir.path().join(".smart-todo/smart-todo-tasks.json"),
        "this is not json",
    )
    .unwrap();

    todo(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks yet"))
        .stderr(predicate::str::contains("malformed"));

    add(&dir, &["-t", "Fresh start", "-c", "Home"]);
    assert_eq!(json(&dir, &["list"]).as_array().unwrap().len(), 1);
}

#[test]
fn workspace_dir_from_env() {
    let dir = init_workspace();
    let elsewhere = TempDir::new().unwrap();
    todo(&elsewhere)
        .env("SMART_TODO_DIR", dir.path())
        .args(["add", "-t", "Remote", "-c", "Env"])
        .assert()
        .success();

    todo(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Remote"));
}

#[test]
fn discovers_workspace_from_subdirectory() {
    let dir = init_workspace();
    let sub = dir.path().join("projects").join("deep");
    fs::create_dir_all(&sub).unwrap();

    #[allow(deprecated)]
    Command::cargo_bin("smart-todo")
        .unwrap()
        .env_remove("SMART_TODO_DIR")
        .current_dir(&sub)
        .args(["add", "-t", "Nested", "-c", "Dirs"])
        .assert()
        .success();

    todo(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nested"));
}
