// Unwrapping of the response envelopes seen across the projects endpoints:
// a bare array, `{data: [...]}`, `{projects: [...]}`, `{data: {projects: [...]}}`,
// a single project object, or a single project wrapped in `{data: {...}}`.
use serde_json::{Map, Value};
use shared::models::Project;

use super::project::{json_kind, normalize_projects};

const WRAPPER_KEYS: [&str; 5] = ["data", "projects", "project", "items", "results"];
const PROJECT_KEYS: [&str; 4] = ["id", "_id", "name", "title"];
const MAX_DEPTH: usize = 3;

fn looks_like_project(obj: &Map<String, Value>) -> bool {
    PROJECT_KEYS.iter().any(|key| obj.contains_key(*key))
}

fn unwrap_at(value: &Value, depth: usize) -> Option<Value> {
    match value {
        Value::Array(_) => Some(value.clone()),
        // A record is never an envelope, even when it carries a list under
        // one of the wrapper keys.
        Value::Object(obj) if depth < MAX_DEPTH && looks_like_project(obj) => Some(Value::Array(vec![value.clone()])),
        Value::Object(obj) if depth < MAX_DEPTH => WRAPPER_KEYS
            .iter()
            .filter_map(|key| obj.get(*key))
            .find_map(|inner| unwrap_at(inner, depth + 1)),
        _ => None,
    }
}

/// Returns the project records of an API response as a JSON array, or
/// `Value::Null` when the response has no recognisable shape.
pub fn extract_project_records(response: &Value) -> Value {
    unwrap_at(response, 0).unwrap_or_else(|| {
        tracing::warn!(kind = json_kind(response), "Could not find project records in API response");
        Value::Null
    })
}

/// Envelope unwrapping followed by batch normalization.
pub fn normalize_response(response: &Value) -> Vec<Project> {
    let projects = normalize_projects(&extract_project_records(response));
    tracing::debug!(count = projects.len(), "Normalized projects from API response");
    projects
}
