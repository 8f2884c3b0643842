//! Gantt layout for a project timeline snapshot.
//!
//! The layout is a pure function of a [`ProjectTimeline`] and a [`Clock`]:
//! the window is normalized first, then every task is positioned and
//! classified independently, in input order.

pub mod classify;
pub mod clock;
pub mod position;
pub mod range;

pub use classify::{completion_pct, Classification, ColorCategory};
pub use clock::{Clock, FixedClock, SystemClock};
pub use position::{BarPosition, LayoutOptions};
pub use range::DateRange;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::model::{Milestone, ProjectTimeline, TaskSchedule, TaskStatus};

/// Render-ready record for one task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskLayout {
    pub task_id: String,
    pub task_name: String,
    pub assigned_agent: Option<String>,
    pub status: TaskStatus,
    pub left_pct: f64,
    pub width_pct: f64,
    pub color_category: ColorCategory,
    pub is_critical: bool,
    pub slack_days: f64,
    pub completion_pct: f64,
    pub duration_days: f64,
    pub effort_hours: f64,
    /// The task has a usable start date; otherwise it sits at the
    /// unscheduled position.
    pub has_start: bool,
    /// Both start and end dates were supplied.
    pub scheduled: bool,
}

impl TaskLayout {
    fn build(timeline: &ProjectTimeline, task: &TaskSchedule, range: &DateRange, options: &LayoutOptions) -> Self {
        let position = BarPosition::compute(task, range, options);
        let class = Classification::classify(task, &timeline.critical_path, &timeline.slack_days);
        Self {
            task_id: task.task_id.clone(),
            task_name: task.task_name.clone(),
            assigned_agent: task.assigned_agent.clone(),
            status: task.status,
            left_pct: position.left,
            width_pct: position.width,
            color_category: class.category,
            is_critical: class.is_critical,
            slack_days: class.slack_days,
            completion_pct: completion_pct(task),
            duration_days: task.duration_days,
            effort_hours: task.effort_hours,
            has_start: task.start().is_some(),
            scheduled: task.is_scheduled(),
        }
    }

    pub fn has_slack(&self) -> bool {
        self.slack_days > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneLayout {
    pub name: String,
    pub date: Option<DateTime<Utc>>,
    /// Marker offset on the task axis, `None` when the date is unusable.
    pub position_pct: Option<f64>,
    pub task_count: usize,
}

impl MilestoneLayout {
    fn build(milestone: &Milestone, range: &DateRange) -> Self {
        let date = milestone.date();
        Self {
            name: milestone.name.clone(),
            date,
            position_pct: date.map(|d| BarPosition::offset_of(d, range)),
            task_count: milestone.tasks.len(),
        }
    }
}

/// Complete Gantt layout of one timeline snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineLayout {
    pub range: DateRange,
    pub tasks: Vec<TaskLayout>,
    pub milestones: Vec<MilestoneLayout>,
    pub critical_count: usize,
    /// `total_duration_days` as sent by the service, if any.
    pub declared_duration_days: Option<f64>,
}

impl TimelineLayout {
    /// Lay out a timeline with default presentation options.
    ///
    /// Returns `None` when there are no tasks to render.
    pub fn compute(timeline: &ProjectTimeline, clock: &dyn Clock) -> Option<Self> {
        Self::compute_with(timeline, clock, &LayoutOptions::default())
    }

    pub fn compute_with(
        timeline: &ProjectTimeline,
        clock: &dyn Clock,
        options: &LayoutOptions,
    ) -> Option<Self> {
        if timeline.is_empty() {
            debug!("timeline has no tasks, nothing to lay out");
            return None;
        }

        let range = DateRange::normalize(timeline, clock.now());
        let tasks: Vec<TaskLayout> = timeline
            .tasks
            .iter()
            .map(|task| TaskLayout::build(timeline, task, &range, options))
            .collect();
        let milestones = timeline
            .milestones
            .iter()
            .map(|m| MilestoneLayout::build(m, &range))
            .collect();

        debug!(
            tasks = tasks.len(),
            total_days = range.total_days,
            "computed timeline layout"
        );

        Some(Self {
            range,
            tasks,
            milestones,
            critical_count: timeline.critical_path.len(),
            declared_duration_days: timeline.total_duration_days,
        })
    }

    /// Header line, e.g. `"10 days • 4 tasks"`.
    pub fn summary(&self) -> String {
        format!("{} days • {} tasks", self.range.total_days, self.tasks.len())
    }

    /// Duration shown in the summary: the service's own figure when it sent
    /// a usable one, the normalized window length otherwise.
    pub fn duration_days(&self) -> f64 {
        self.declared_duration_days
            .filter(|days| days.is_finite() && *days >= 0.0)
            .map(f64::round)
            .unwrap_or(self.range.total_days as f64)
    }

    pub fn task(&self, task_id: &str) -> Option<&TaskLayout> {
        self.tasks.iter().find(|t| t.task_id == task_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
    }

    fn sample() -> ProjectTimeline {
        serde_json::from_value(json!({
            "project_start_date": "2024-01-01",
            "project_end_date": "2024-01-21",
            "critical_path": ["T1", "T3"],
            "slack_days": { "T2": 3.0 },
            "milestones": [
                { "name": "Design done", "date": "2024-01-06", "tasks": ["T1"] },
                { "name": "Someday", "date": "tbd", "tasks": [] }
            ],
            "tasks": [
                { "task_id": "T1", "task_name": "Design", "status": "completed",
                  "start_date": "2024-01-01", "end_date": "2024-01-06",
                  "duration_days": 5, "completion_percentage": 100 },
                { "task_id": "T2", "task_name": "Docs", "status": "pending",
                  "start_date": "2024-01-06", "duration_days": 2 },
                { "task_id": "T3", "task_name": "Build", "status": "in_progress",
                  "assigned_agent": "dev-1", "start_date": "2024-01-06",
                  "end_date": "2024-01-16", "duration_days": 10,
                  "completion_percentage": 30, "effort_hours": 80 }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn lays_out_every_task_in_order() {
        let layout = TimelineLayout::compute(&sample(), &clock()).unwrap();
        let ids: Vec<_> = layout.tasks.iter().map(|t| t.task_id.as_str()).collect();
        assert_eq!(ids, ["T1", "T2", "T3"]);
        assert_eq!(layout.range.total_days, 20);
        assert_eq!(layout.critical_count, 2);
        assert_eq!(layout.summary(), "20 days • 3 tasks");
    }

    #[test]
    fn task_records_combine_position_and_class() {
        let layout = TimelineLayout::compute(&sample(), &clock()).unwrap();

        let build = layout.task("T3").unwrap();
        assert_eq!(build.left_pct, 25.0);
        assert_eq!(build.width_pct, 50.0);
        assert_eq!(build.color_category, ColorCategory::Active);
        assert!(build.is_critical);
        assert!(build.scheduled);
        assert_eq!(build.completion_pct, 30.0);
        assert_eq!(build.assigned_agent.as_deref(), Some("dev-1"));

        let docs = layout.task("T2").unwrap();
        assert!(!docs.is_critical);
        assert!(docs.has_slack());
        assert!(!docs.scheduled);
        assert!(docs.has_start);
        assert_eq!(docs.color_category, ColorCategory::Neutral);
    }

    #[test]
    fn milestones_are_placed_on_the_axis() {
        let layout = TimelineLayout::compute(&sample(), &clock()).unwrap();
        assert_eq!(layout.milestones[0].position_pct, Some(25.0));
        assert_eq!(layout.milestones[0].task_count, 1);
        assert_eq!(layout.milestones[1].position_pct, None);
        assert!(layout.milestones[1].date.is_none());
    }

    #[test]
    fn duration_prefers_the_declared_figure() {
        let mut timeline = sample();
        timeline.total_duration_days = Some(14.4);
        let layout = TimelineLayout::compute(&timeline, &clock()).unwrap();
        assert_eq!(layout.range.total_days, 20);
        assert_eq!(layout.duration_days(), 14.0);

        timeline.total_duration_days = Some(-3.0);
        let layout = TimelineLayout::compute(&timeline, &clock()).unwrap();
        assert_eq!(layout.duration_days(), 20.0);

        let layout = TimelineLayout::compute(&sample(), &clock()).unwrap();
        assert_eq!(layout.duration_days(), 20.0);
    }

    #[test]
    fn empty_timeline_is_no_data() {
        assert!(TimelineLayout::compute(&ProjectTimeline::default(), &clock()).is_none());
    }

    #[test]
    fn options_reach_the_position_calculator() {
        let options = LayoutOptions {
            min_bar_width_pct: 15.0,
            ..Default::default()
        };
        let layout = TimelineLayout::compute_with(&sample(), &clock(), &options).unwrap();
        assert_eq!(layout.task("T2").unwrap().width_pct, 15.0);
    }

    #[test]
    fn input_is_left_untouched() {
        let timeline = sample();
        let before = timeline.clone();
        let _ = TimelineLayout::compute(&timeline, &clock());
        assert_eq!(timeline, before);
    }
}
