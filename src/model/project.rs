use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::date::parse_timestamp;
use super::nullable;
use super::task::TaskSchedule;

/// A named checkpoint on the project timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Milestone {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    pub date: Option<String>,
    /// Ids of the tasks that must finish for this milestone.
    #[serde(deserialize_with = "nullable")]
    pub tasks: Vec<String>,
}

impl Milestone {
    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.date.as_deref().and_then(parse_timestamp)
    }
}

/// Timeline snapshot attached to a simulation turn.
///
/// Every field is optional on the wire; absent or `null` values read as
/// empty. The record is never mutated by layout code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectTimeline {
    pub project_start_date: Option<String>,
    pub project_end_date: Option<String>,
    pub total_duration_days: Option<f64>,
    #[serde(deserialize_with = "nullable")]
    pub milestones: Vec<Milestone>,
    #[serde(deserialize_with = "nullable")]
    pub tasks: Vec<TaskSchedule>,
    #[serde(deserialize_with = "nullable")]
    pub critical_path: HashSet<String>,
    #[serde(deserialize_with = "nullable")]
    pub slack_days: HashMap<String, f64>,
}

impl ProjectTimeline {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
