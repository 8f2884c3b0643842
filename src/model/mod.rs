pub mod date;
pub mod project;
pub mod task;

pub use date::parse_timestamp;
pub use project::{Milestone, ProjectTimeline};
pub use task::{TaskSchedule, TaskStatus};

use serde::{Deserialize, Deserializer};

/// Serde helper: read `null` as the type's default.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
