use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::{TaskSchedule, TaskStatus};

/// Visual bucket a task bar is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorCategory {
    Complete,
    Active,
    Blocked,
    Neutral,
}

impl ColorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorCategory::Complete => "complete",
            ColorCategory::Active => "active",
            ColorCategory::Blocked => "blocked",
            ColorCategory::Neutral => "neutral",
        }
    }
}

impl From<TaskStatus> for ColorCategory {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Completed => ColorCategory::Complete,
            TaskStatus::InProgress => ColorCategory::Active,
            TaskStatus::Blocked => ColorCategory::Blocked,
            TaskStatus::Pending => ColorCategory::Neutral,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub category: ColorCategory,
    pub is_critical: bool,
    pub slack_days: f64,
}

impl Classification {
    pub fn classify(
        task: &TaskSchedule,
        critical_path: &HashSet<String>,
        slack_days: &HashMap<String, f64>,
    ) -> Self {
        Self {
            category: task.status.into(),
            is_critical: critical_path.contains(&task.task_id),
            slack_days: slack_days.get(&task.task_id).copied().unwrap_or(0.0),
        }
    }

    pub fn has_slack(&self) -> bool {
        self.slack_days > 0.0
    }
}

/// Completion sub-bar width as a percent of the task's own bar.
pub fn completion_pct(task: &TaskSchedule) -> f64 {
    let pct = task.completion_percentage;
    if pct.is_finite() {
        pct.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, status: &str) -> TaskSchedule {
        TaskSchedule {
            status: TaskStatus::parse(status),
            ..TaskSchedule::new(id, "Task")
        }
    }

    #[test]
    fn status_maps_to_category() {
        let empty_set = HashSet::new();
        let empty_map = HashMap::new();
        let cases = [
            ("completed", ColorCategory::Complete),
            ("IN_PROGRESS", ColorCategory::Active),
            ("Blocked", ColorCategory::Blocked),
            ("pending", ColorCategory::Neutral),
            ("cancelled", ColorCategory::Neutral),
        ];
        for (status, expected) in cases {
            let c = Classification::classify(&task("T1", status), &empty_set, &empty_map);
            assert_eq!(c.category, expected, "status {status}");
        }
    }

    #[test]
    fn unknown_ids_are_not_critical_and_have_no_slack() {
        let critical: HashSet<String> = ["T1".to_string()].into();
        let slack: HashMap<String, f64> = [("T1".to_string(), 2.5)].into();

        let c = Classification::classify(&task("T9", "pending"), &critical, &slack);
        assert!(!c.is_critical);
        assert_eq!(c.slack_days, 0.0);
        assert!(!c.has_slack());

        let c = Classification::classify(&task("T1", "pending"), &critical, &slack);
        assert!(c.is_critical);
        assert_eq!(c.slack_days, 2.5);
        assert!(c.has_slack());
    }

    #[test]
    fn completion_is_clamped() {
        let mut t = task("T1", "in_progress");
        for (raw, expected) in [(50.0, 50.0), (-10.0, 0.0), (250.0, 100.0), (f64::NAN, 0.0)] {
            t.completion_percentage = raw;
            assert_eq!(completion_pct(&t), expected);
        }
    }
}
