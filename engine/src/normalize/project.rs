use serde_json::Value;
use shared::models::{Project, RawAmount, RawApiProject};
use shared::utils::{monetary_decimal_text, parse_monetary_value};

use super::status::normalize_status;
use crate::error::{EngineError, EngineResult};

pub const DEFAULT_NAME: &str = "Untitled Project";
pub const DEFAULT_DESCRIPTION: &str = "No description available";
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

// First present value wins.
fn first_of(candidates: [&Option<String>; 2]) -> Option<String> {
    candidates.into_iter().flatten().next().cloned()
}

// Coerces the first present amount and renders it as a plain decimal
// string. Text amounts keep their own digits; numbers go through `f64`.
// Negative and unparseable amounts become "0".
fn amount_text(primary: &Option<RawAmount>, fallback: &Option<RawAmount>) -> String {
    let raw = primary.as_ref().or(fallback.as_ref());
    let value = parse_monetary_value(&raw);
    if value <= 0.0 {
        return "0".to_string();
    }
    match raw {
        Some(RawAmount::Text(text)) => monetary_decimal_text(text).unwrap_or_else(|| value.to_string()),
        _ => value.to_string(),
    }
}

/// Builds a canonical [`Project`] out of a raw API record, filling defaults
/// for everything the record leaves out.
pub fn normalize_project(raw: &RawApiProject) -> Project {
    let created_at = raw.created_at.clone().unwrap_or_default();

    Project {
        id: first_of([&raw.id, &raw.underscore_id]).unwrap_or_default(),
        user_id: first_of([&raw.user_id, &raw.creator_id]).unwrap_or_default(),
        name: first_of([&raw.name, &raw.title]).unwrap_or_else(|| DEFAULT_NAME.to_string()),
        description: raw
            .description
            .clone()
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        category: raw
            .category
            .clone()
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        status: normalize_status(raw.status.as_deref()),
        total_money_invested: amount_text(&raw.total_money_invested, &raw.current_amount),
        expected_raise_amount: amount_text(&raw.expected_raise_amount, &raw.goal_amount),
        start_date: raw.start_date.clone().unwrap_or_else(|| created_at.clone()),
        end_date: raw.end_date.clone().unwrap_or_default(),
        created_at,
        updated_at: raw.updated_at.clone().unwrap_or_default(),
    }
}

/// Normalizes every element of a JSON array. Anything that is not an array
/// (null, a string, a wrapped envelope) yields an empty list.
pub fn normalize_projects(raws: &Value) -> Vec<Project> {
    match raws {
        Value::Array(items) => items
            .iter()
            .map(|item| normalize_project(&RawApiProject::from(item)))
            .collect(),
        other => {
            tracing::debug!(kind = json_kind(other), "Expected an array of projects, got something else");
            Vec::new()
        }
    }
}

/// Normalization never rejects a record, but an empty id cannot be linked
/// to or invested in; callers that need one go through here.
pub fn ensure_identified(project: &Project) -> EngineResult<&Project> {
    if project.id.trim().is_empty() {
        return Err(EngineError::InvalidProject(format!(
            "project '{}' has no id",
            project.name
        )));
    }
    Ok(project)
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
