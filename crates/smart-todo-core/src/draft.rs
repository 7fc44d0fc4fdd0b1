//! Create/edit form data and its field-level validation.

use crate::error::CoreError;
use crate::task::{Priority, Task};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_ESTIMATE_MINUTES: u32 = 30;
pub const MIN_ESTIMATE_MINUTES: u32 = 5;
pub const MAX_ESTIMATE_MINUTES: u32 = 1440;

/// How strictly a draft is checked before it becomes a task.
///
/// `Strict` adds an upper bound on the estimate and rejects due dates
/// before today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    #[default]
    Lenient,
    Strict,
}

impl fmt::Display for ValidationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationPolicy::Lenient => f.write_str("lenient"),
            ValidationPolicy::Strict => f.write_str("strict"),
        }
    }
}

impl FromStr for ValidationPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(ValidationPolicy::Lenient),
            "strict" => Ok(ValidationPolicy::Strict),
            other => Err(CoreError::InvalidPolicy(other.to_string())),
        }
    }
}

/// The fields a user fills in to create or edit a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: String,
    pub due_date: NaiveDate,
    /// Minutes.
    pub estimated_time: u32,
}

impl TaskDraft {
    /// An empty form due `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            priority: Priority::default(),
            category: String::new(),
            due_date: today,
            estimated_time: DEFAULT_ESTIMATE_MINUTES,
        }
    }

    /// A form prefilled from an existing task.
    pub fn from_task(task: &Task, today: NaiveDate) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            category: task.category.clone(),
            due_date: task.due_date.date().unwrap_or(today),
            estimated_time: task.estimated_time,
        }
    }

    /// Check every field, collecting one message per failing field.
    pub fn validate(&self, policy: ValidationPolicy, today: NaiveDate) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();

        if self.title.trim().is_empty() {
            errors.title = Some("Title is required".into());
        }
        if self.category.trim().is_empty() {
            errors.category = Some("Category is required".into());
        }
        if self.estimated_time < MIN_ESTIMATE_MINUTES {
            errors.estimated_time = Some(format!(
                "Estimated time must be at least {} minutes",
                MIN_ESTIMATE_MINUTES
            ));
        }

        if policy == ValidationPolicy::Strict {
            if self.estimated_time > MAX_ESTIMATE_MINUTES {
                errors.estimated_time = Some(format!(
                    "Estimated time must be at most {} minutes",
                    MAX_ESTIMATE_MINUTES
                ));
            }
            if self.due_date < today {
                errors.due_date = Some("Due date cannot be in the past".into());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Per-field validation messages. A `None` field passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// `(field, message)` pairs in form order.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("title", &self.title),
            ("category", &self.category),
            ("due", &self.due_date),
            ("estimate", &self.estimated_time),
        ]
        .into_iter()
        .filter_map(|(name, msg)| msg.as_deref().map(|m| (name, m)))
        .collect()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields()
            .into_iter()
            .map(|(name, msg)| format!("{}: {}", name, msg))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for FormErrors {}
