use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("core error: {0}")]
    Core(#[from] smart_todo_core::error::CoreError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("workspace not found (searched upward from {0})")]
    WorkspaceNotFound(String),

    #[error("workspace already exists at {0}")]
    WorkspaceExists(String),

    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("ambiguous task prefix '{prefix}': matches {count} tasks")]
    AmbiguousPrefix { prefix: String, count: usize },
}
