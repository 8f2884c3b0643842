use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::date::parse_timestamp;
use super::nullable;

/// Lifecycle state of a scheduled task.
///
/// The remote service sends free-form strings; anything that is not one of
/// the three known values is read as `Pending`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum TaskStatus {
    Completed,
    InProgress,
    Blocked,
    #[default]
    Pending,
}

impl TaskStatus {
    /// Parse a raw status string, case-insensitively.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "completed" => TaskStatus::Completed,
            "in_progress" => TaskStatus::InProgress,
            "blocked" => TaskStatus::Blocked,
            _ => TaskStatus::Pending,
        }
    }

    /// Canonical wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "completed",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Blocked => "blocked",
            TaskStatus::Pending => "pending",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "Completed",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Blocked => "Blocked",
            TaskStatus::Pending => "Pending",
        }
    }
}

impl From<Option<String>> for TaskStatus {
    fn from(raw: Option<String>) -> Self {
        raw.as_deref().map(TaskStatus::parse).unwrap_or_default()
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        status.as_str().to_string()
    }
}

/// One task of a project timeline as produced by a simulation turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskSchedule {
    #[serde(deserialize_with = "nullable")]
    pub task_id: String,
    #[serde(deserialize_with = "nullable")]
    pub task_name: String,
    pub assigned_agent: Option<String>,
    pub status: TaskStatus,
    #[serde(deserialize_with = "nullable")]
    pub duration_days: f64,
    /// Progress from 0 to 100.
    #[serde(deserialize_with = "nullable")]
    pub completion_percentage: f64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Upstream task ids. Informational only, never used for layout.
    #[serde(deserialize_with = "nullable")]
    pub dependencies: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub effort_hours: f64,
}

impl TaskSchedule {
    pub fn new(task_id: impl Into<String>, task_name: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            task_name: task_name.into(),
            ..Default::default()
        }
    }

    /// Parsed start instant, `None` when missing or unparseable.
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start_date.as_deref().and_then(parse_timestamp)
    }

    /// True when the task carries both a start and an end date string.
    pub fn is_scheduled(&self) -> bool {
        let present = |s: &Option<String>| s.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.start_date) && present(&self.end_date)
    }
}
