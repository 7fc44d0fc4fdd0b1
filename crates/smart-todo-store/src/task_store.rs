//! The owned, persisted task collection.

use crate::blob::{BlobStore, TASKS_KEY};
use crate::error::StoreError;
use chrono::{DateTime, Utc};
use smart_todo_core::action::{reduce, Action};
use smart_todo_core::serialize::{decode_tasks, encode_tasks};
use smart_todo_core::task::{Task, TaskId};
use tracing::{debug, error};

/// Shortest prefix accepted when looking a task up by partial id.
pub const MIN_PREFIX_LEN: usize = 4;

/// Holds the task collection in memory and mirrors it to a [`BlobStore`].
///
/// The in-memory collection is the source of truth: storage failures are
/// logged and never surfaced to callers.
pub struct TaskStore<B: BlobStore> {
    backend: B,
    tasks: Vec<Task>,
}

impl<B: BlobStore> TaskStore<B> {
    /// Load the collection from `backend`. A missing, unreadable or
    /// malformed value yields an empty collection.
    pub fn open(backend: B) -> Self {
        let tasks = load(&backend);
        Self { backend, tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Find a task by its full id or a unique prefix of it.
    pub fn resolve(&self, id_or_prefix: &str) -> Result<&Task, StoreError> {
        let wanted = id_or_prefix.trim();
        if let Some(task) = self.tasks.iter().find(|t| t.id.as_str() == wanted) {
            return Ok(task);
        }
        if wanted.len() < MIN_PREFIX_LEN {
            return Err(StoreError::TaskNotFound(wanted.to_string()));
        }

        let matches: Vec<&Task> = self.tasks.iter().filter(|t| t.id.starts_with(wanted)).collect();
        match matches.as_slice() {
            [] => Err(StoreError::TaskNotFound(wanted.to_string())),
            [task] => Ok(*task),
            many => Err(StoreError::AmbiguousPrefix {
                prefix: wanted.to_string(),
                count: many.len(),
            }),
        }
    }

    /// Apply `action`, then persist the whole collection.
    pub fn dispatch(&mut self, action: Action, now: DateTime<Utc>) -> &[Task] {
        self.tasks = reduce(&self.tasks, action, now);
        if let Err(e) = self.persist() {
            error!(key = TASKS_KEY, error = %e, "failed to save tasks; keeping in-memory state");
        }
        &self.tasks
    }

    fn persist(&self) -> Result<(), StoreError> {
        let data = encode_tasks(&self.tasks)?;
        self.backend.set(TASKS_KEY, &data)?;
        debug!(key = TASKS_KEY, count = self.tasks.len(), "saved tasks");
        Ok(())
    }
}

fn load<B: BlobStore>(backend: &B) -> Vec<Task> {
    let data = match backend.get(TASKS_KEY) {
        Ok(Some(data)) => data,
        Ok(None) => {
            debug!(key = TASKS_KEY, "no stored tasks");
            return Vec::new();
        }
        Err(e) => {
            error!(key = TASKS_KEY, error = %e, "failed to read tasks; starting empty");
            return Vec::new();
        }
    };
    match decode_tasks(&data) {
        Ok(tasks) => {
            debug!(key = TASKS_KEY, count = tasks.len(), "loaded tasks");
            tasks
        }
        Err(e) => {
            error!(key = TASKS_KEY, error = %e, "stored tasks are malformed; starting empty");
            Vec::new()
        }
    }
}
