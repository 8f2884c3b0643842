use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::model::{parse_timestamp, ProjectTimeline};

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Canonical project window used as the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Whole days covered by the window, never less than 1.
    pub total_days: i64,
}

impl DateRange {
    /// Resolve the project window from partial timeline data.
    ///
    /// Missing or unparseable start falls back to `now`. An end date that is
    /// missing, unparseable or earlier than the start is replaced by
    /// `start + total_duration_days`.
    pub fn normalize(timeline: &ProjectTimeline, now: DateTime<Utc>) -> Self {
        let start = timeline
            .project_start_date
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(now);

        let end = timeline
            .project_end_date
            .as_deref()
            .and_then(parse_timestamp)
            .filter(|end| *end >= start)
            .unwrap_or_else(|| {
                start
                    .checked_add_signed(days_to_duration(timeline.total_duration_days))
                    .unwrap_or(start)
            });

        let total_days = (Self::days_between(start, end).ceil() as i64).max(1);

        Self {
            start,
            end,
            total_days,
        }
    }

    /// Fractional days from `from` to `to`, negative when `to` is earlier.
    pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
        (to - from).num_milliseconds() as f64 / MILLIS_PER_DAY
    }

    /// Fractional days from the window start to `instant`.
    pub fn offset_days(&self, instant: DateTime<Utc>) -> f64 {
        Self::days_between(self.start, instant)
    }
}

fn days_to_duration(days: Option<f64>) -> Duration {
    let days = days.filter(|d| d.is_finite() && *d > 0.0).unwrap_or(0.0);
    // Capped near 31,000 years.
    let millis = (days * MILLIS_PER_DAY).min(1.0e15);
    Duration::milliseconds(millis.round() as i64)
}
