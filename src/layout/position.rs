use serde::{Deserialize, Serialize};

use super::range::DateRange;
use crate::model::TaskSchedule;

/// Tunable presentation constants.
///
/// These are display choices, not scheduling rules; the defaults match the
/// web client.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Smallest width (percent) of a scheduled bar so short tasks stay visible.
    pub min_bar_width_pct: f64,
    /// Position used for tasks without a usable start date.
    pub unscheduled: BarPosition,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            min_bar_width_pct: 2.0,
            unscheduled: BarPosition::ZERO,
        }
    }
}

/// Horizontal placement of a bar in a 0..=100 percent space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BarPosition {
    pub left: f64,
    pub width: f64,
}

impl BarPosition {
    pub const ZERO: BarPosition = BarPosition {
        left: 0.0,
        width: 0.0,
    };

    /// Place a task on the project window.
    pub fn compute(task: &TaskSchedule, range: &DateRange, options: &LayoutOptions) -> Self {
        let Some(task_start) = task.start() else {
            return options.unscheduled.clamped(0.0);
        };

        let total_days = range.total_days.max(1) as f64;
        let days_from_start = range.offset_days(task_start).max(0.0);
        let left = days_from_start / total_days * 100.0;
        let width = task.duration_days / total_days * 100.0;

        BarPosition { left, width }.clamped(options.min_bar_width_pct)
    }

    /// Percent offset of an arbitrary instant on the window, clamped.
    pub fn offset_of(instant: chrono::DateTime<chrono::Utc>, range: &DateRange) -> f64 {
        let total_days = range.total_days.max(1) as f64;
        clamp_pct(range.offset_days(instant) / total_days * 100.0, 0.0)
    }

    fn clamped(self, min_width: f64) -> Self {
        let min_width = clamp_pct(min_width, 0.0);
        BarPosition {
            left: clamp_pct(self.left, 0.0),
            width: clamp_pct(self.width, min_width),
        }
    }
}

fn clamp_pct(value: f64, min: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.clamp(min, 100.0)
}
