use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::ProjectTimeline;

const TIMELINE_KEY: &str = "project_timeline";

/// Load a timeline snapshot from a JSON file.
///
/// Accepts a bare timeline object, a turn response carrying a
/// `project_timeline` field, or an array of turn responses (the last turn
/// wins). `Ok(None)` means the selected turn has no timeline yet.
pub fn load_timeline(path: &Path) -> Result<Option<ProjectTimeline>> {
    let json = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = json.len(), "loading timeline");
    parse_timeline(&json)
}

/// Parse timeline JSON in any of the shapes accepted by [`load_timeline`].
pub fn parse_timeline(json: &str) -> Result<Option<ProjectTimeline>> {
    let value: Value = serde_json::from_str(json)?;
    let timeline = match value {
        Value::Array(mut turns) => match turns.pop() {
            Some(Value::Object(mut turn)) => turn.remove(TIMELINE_KEY),
            Some(other) => {
                return Err(Error::InvalidInput(format!(
                    "expected the last turn to be an object, found {}",
                    kind(&other)
                )))
            }
            None => {
                warn!("turn list is empty");
                None
            }
        },
        Value::Object(mut object) => match object.remove(TIMELINE_KEY) {
            Some(timeline) => Some(timeline),
            None => Some(Value::Object(object)),
        },
        other => {
            return Err(Error::InvalidInput(format!(
                "expected a timeline object or a list of turns, found {}",
                kind(&other)
            )))
        }
    };

    match timeline {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_timeline() {
        let json = json!({ "tasks": [{ "task_id": "T1" }] }).to_string();
        let timeline = parse_timeline(&json).unwrap().unwrap();
        assert_eq!(timeline.tasks.len(), 1);
    }

    #[test]
    fn turn_response() {
        let json = json!({
            "turn": 3,
            "agent_responses": [],
            "project_timeline": { "tasks": [{ "task_id": "T1" }, { "task_id": "T2" }] }
        })
        .to_string();
        let timeline = parse_timeline(&json).unwrap().unwrap();
        assert_eq!(timeline.tasks.len(), 2);
    }

    #[test]
    fn turn_with_null_timeline_is_none() {
        let json = json!({ "project_timeline": null }).to_string();
        assert!(parse_timeline(&json).unwrap().is_none());
    }

    #[test]
    fn last_turn_wins() {
        let json = json!([
            { "project_timeline": { "tasks": [{ "task_id": "old" }] } },
            { "project_timeline": { "tasks": [{ "task_id": "new" }] } }
        ])
        .to_string();
        let timeline = parse_timeline(&json).unwrap().unwrap();
        assert_eq!(timeline.tasks[0].task_id, "new");

        let json = json!([
            { "project_timeline": { "tasks": [{ "task_id": "old" }] } },
            { "turn": 2 }
        ])
        .to_string();
        assert!(parse_timeline(&json).unwrap().is_none());
    }

    #[test]
    fn rejects_scalars_and_bad_json() {
        assert!(matches!(parse_timeline("42"), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_timeline("[1]"), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_timeline("{"), Err(Error::Json(_))));
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timeline.json");
        let timeline: ProjectTimeline = serde_json::from_value(json!({
            "project_start_date": "2024-01-01",
            "tasks": [{ "task_id": "T1", "status": "blocked" }]
        }))
        .unwrap();

        std::fs::write(&path, serde_json::to_string_pretty(&timeline).unwrap()).unwrap();
        let loaded = load_timeline(&path).unwrap().unwrap();
        assert_eq!(loaded, timeline);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_timeline(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
