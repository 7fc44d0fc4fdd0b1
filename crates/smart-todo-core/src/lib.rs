//! Task model, state transitions and the pure views over a task list.

pub mod action;
pub mod calendar;
pub mod draft;
pub mod error;
pub mod schedule;
pub mod serialize;
pub mod stats;
pub mod task;

pub use action::{reduce, Action};
pub use draft::{FormErrors, TaskDraft, ValidationPolicy};
pub use error::CoreError;
pub use task::{DueDate, Priority, Task, TaskId};
