use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::utils::{value_as_amount, value_as_text};

/// Funding-campaign lifecycle state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProjectStatus {
    #[default]
    Open,
    Closed,
    Funded,
    Cancelled,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Open,
        ProjectStatus::Closed,
        ProjectStatus::Funded,
        ProjectStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Open => "OPEN",
            ProjectStatus::Closed => "CLOSED",
            ProjectStatus::Funded => "FUNDED",
            ProjectStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Canonical project, the shape every downstream consumer works with.
///
/// Amounts stay decimal strings; arithmetic goes through
/// [`crate::utils::parse_monetary_value`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub status: ProjectStatus,
    pub total_money_invested: String,
    pub expected_raise_amount: String,
    pub start_date: String,
    pub end_date: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A monetary amount as sent by the API: either a JSON number or text such
/// as `"₦12,345.67"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl From<f64> for RawAmount {
    fn from(n: f64) -> Self {
        RawAmount::Number(n)
    }
}

impl From<&str> for RawAmount {
    fn from(s: &str) -> Self {
        RawAmount::Text(s.to_string())
    }
}

impl From<String> for RawAmount {
    fn from(s: String) -> Self {
        RawAmount::Text(s)
    }
}

/// Untrusted project record straight from the API.
///
/// Endpoints disagree on naming (`name`/`title`, `id`/`_id`, ...) and on
/// types, so every field is optional. Deserialization goes through
/// `serde_json::Value` and cannot fail: a wrong-typed field is simply absent.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(from = "Value")]
pub struct RawApiProject {
    pub id: Option<String>,
    pub underscore_id: Option<String>,
    pub user_id: Option<String>,
    pub creator_id: Option<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub total_money_invested: Option<RawAmount>,
    pub current_amount: Option<RawAmount>,
    pub expected_raise_amount: Option<RawAmount>,
    pub goal_amount: Option<RawAmount>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl RawApiProject {
    fn from_object(obj: &Map<String, Value>) -> Self {
        let text = |key: &str| obj.get(key).and_then(value_as_text);
        let amount = |key: &str| obj.get(key).and_then(value_as_amount);

        RawApiProject {
            id: text("id"),
            underscore_id: text("_id"),
            user_id: text("userId"),
            creator_id: text("creatorId"),
            name: text("name"),
            title: text("title"),
            description: text("description"),
            category: text("category"),
            status: text("status"),
            total_money_invested: amount("totalMoneyInvested"),
            current_amount: amount("currentAmount"),
            expected_raise_amount: amount("expectedRaiseAmount"),
            goal_amount: amount("goalAmount"),
            start_date: text("startDate"),
            end_date: text("endDate"),
            created_at: text("createdAt"),
            updated_at: text("updatedAt"),
        }
    }
}

impl From<&Value> for RawApiProject {
    fn from(value: &Value) -> Self {
        match value {
            Value::Object(obj) => Self::from_object(obj),
            _ => RawApiProject::default(),
        }
    }
}

impl From<Value> for RawApiProject {
    fn from(value: Value) -> Self {
        RawApiProject::from(&value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    #[serde(alias = "_id")]
    pub id: String,
    pub project_id: String,
    #[serde(default)]
    pub investor_id: String,
    pub amount: RawAmount,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRequest {
    pub project_id: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

/// One entry of the assistant chat widget's conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub email: String,
}
