use anyhow::{Context, Result};
use smart_todo_core::draft::ValidationPolicy;
use smart_todo_store::config::Config;
use smart_todo_store::workspace::Workspace;
use std::env;
use std::path::Path;

pub fn run(dir: Option<&Path>, strict: bool) -> Result<()> {
    let root = match dir {
        Some(root) => root.to_path_buf(),
        None => env::current_dir().context("failed to get current directory")?,
    };
    let config = Config {
        validation: if strict {
            ValidationPolicy::Strict
        } else {
            ValidationPolicy::Lenient
        },
        ..Config::default()
    };
    let ws = Workspace::init(&root, config).context("failed to initialize workspace")?;
    println!(
        "Initialized empty task workspace in {} ({} validation)",
        ws.dir().display(),
        ws.config.validation
    );
    Ok(())
}
