use crate::draft::TaskDraft;
use crate::error::CoreError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Textual form of a calendar date, as written into `dueDate`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Unique, immutable task identifier.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generate a fresh random identifier (32 lowercase hex chars).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 8 chars, used for display.
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Debug for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TaskId({})", self.0)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Capitalized label for list output.
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        };
        f.write_str(s)
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(CoreError::InvalidPriority(s.to_string())),
        }
    }
}

/// A due date kept in its textual form.
///
/// Tasks written by this crate always carry a bare `YYYY-MM-DD` value, but
/// persisted collections may hold full ISO-8601 timestamps. Calendar
/// bucketing matches on the text prefix, so the raw value is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DueDate(String);

impl DueDate {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format(DATE_FORMAT).to_string())
    }

    /// Parse a `YYYY-MM-DD` or RFC 3339 due value.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let due = Self(s.trim().to_string());
        if due.date().is_none() {
            return Err(CoreError::InvalidDate(s.to_string()));
        }
        Ok(due)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The calendar date named by the first ten characters, if any.
    pub fn date(&self) -> Option<NaiveDate> {
        let head = self.0.get(..10)?;
        NaiveDate::parse_from_str(head, DATE_FORMAT).ok()
    }

    /// The moment this task falls due.
    ///
    /// A bare date means midnight UTC of that day. Timestamps without an
    /// offset are read as UTC.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.0) {
            return Some(dt.with_timezone(&Utc));
        }
        if self.0.len() == 10 {
            return self
                .date()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc());
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(&self.0, fmt).ok())
            .map(|dt| dt.and_utc())
    }

    /// Whether the textual value starts with `date` in `YYYY-MM-DD` form.
    pub fn falls_on(&self, date: NaiveDate) -> bool {
        self.0.starts_with(&date.format(DATE_FORMAT).to_string())
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user-defined unit of work.
///
/// Serialized with camelCase keys; the whole collection is stored as one
/// JSON array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: Priority,
    #[serde(default)]
    pub category: String,
    pub due_date: DueDate,
    /// Minutes.
    pub estimated_time: u32,
    /// Minutes, recorded on first completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_time: Option<u32>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Build a new, incomplete task from validated form data.
    pub fn new(draft: TaskDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: TaskId::generate(),
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            priority: draft.priority,
            category: draft.category.trim().to_string(),
            due_date: DueDate::from_date(draft.due_date),
            estimated_time: draft.estimated_time,
            actual_time: None,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Stamp `updated_at`, never moving it backwards.
    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.updated_at);
    }

    /// Actual time if one was recorded; zero counts as unrecorded.
    pub fn recorded_actual_time(&self) -> Option<u32> {
        self.actual_time.filter(|m| *m > 0)
    }
}
