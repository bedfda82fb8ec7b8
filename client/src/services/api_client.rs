//! REST client for the crowdfunding platform API.
//!
//! Every response body goes through the engine's envelope unwrapping and
//! project normalization, so callers always get canonical [`Project`]s no
//! matter which endpoint shape came back.
//!
//! Endpoints used:
//!
//! - `GET  /projects`
//! - `GET  /projects/{id}`
//! - `GET  /projects/user/{user_id}`
//! - `POST /investments`
//! - `POST /auth/login`
//! - `POST /chat`
//!
//! When a token is set (API key from config, or a session token after
//! login) it is sent as `Authorization: Bearer {token}`.

use engine::normalize::normalize_response;
use reqwest::{Client, Method, RequestBuilder};
use serde_json::{json, Value};
use shared::models::{AuthSession, ChatMessage, ChatRole, Investment, InvestmentRequest, Project};
use std::time::Duration;

use crate::config::ApiSettings;
use crate::error::{ClientError, ClientResult};

pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

// Most endpoints answer either with the payload itself or wrapped in
// `{"data": ...}`.
fn unwrap_data(value: &Value) -> &Value {
    match value.get("data") {
        Some(inner) if inner.is_object() => inner,
        _ => value,
    }
}

fn first_string<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| value.get(*key).and_then(Value::as_str))
        .find(|s| !s.trim().is_empty())
}

fn error_message(body: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = first_string(&value, &["message", "error"]) {
            return Some(message.to_string());
        }
    }
    let trimmed = body.trim();
    (!trimmed.is_empty() && trimmed.len() <= 200 && !trimmed.starts_with('{')).then(|| trimmed.to_string())
}

// Ids go into the URL path verbatim, so only plain id characters pass.
fn validate_path_segment(name: &str, value: &str) -> ClientResult<()> {
    let plain = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if value.is_empty() || !plain || value == "." || value == ".." {
        return Err(ClientError::ValidationError(format!("invalid {}: '{}'", name, value)));
    }
    Ok(())
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token: settings.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let request = self.client.request(method, url);
        match self.token {
            Some(ref token) => request.bearer_auth(token),
            None => request,
        }
    }

    // Sends the request and reads the body as JSON. Error statuses become
    // `ApiError`; an unreadable success body reads as `null`.
    async fn execute(&self, request: RequestBuilder) -> ClientResult<Value> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            tracing::warn!(status = status.as_u16(), path = %url, message = %message, "API request failed");
            return Err(ClientError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body).unwrap_or_else(|e| {
            tracing::warn!(path = %url, error = %e, "API returned a body that is not JSON");
            Value::Null
        }))
    }

    pub async fn list_projects(&self) -> ClientResult<Vec<Project>> {
        let body = self.execute(self.request(Method::GET, "projects")).await?;
        let projects = normalize_response(&body);
        tracing::info!(count = projects.len(), "Fetched projects");
        Ok(projects)
    }

    /// `Ok(None)` when the API answers 404 or the body holds no project.
    pub async fn get_project(&self, id: &str) -> ClientResult<Option<Project>> {
        validate_path_segment("project id", id)?;
        let body = match self.execute(self.request(Method::GET, &format!("projects/{}", id))).await {
            Ok(body) => body,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };

        Ok(normalize_response(&body).into_iter().next().map(|mut project| {
            if project.id.is_empty() {
                project.id = id.to_string();
            }
            project
        }))
    }

    pub async fn list_user_projects(&self, user_id: &str) -> ClientResult<Vec<Project>> {
        validate_path_segment("user id", user_id)?;
        let body = self
            .execute(self.request(Method::GET, &format!("projects/user/{}", user_id)))
            .await?;
        Ok(normalize_response(&body))
    }

    pub async fn invest(&self, request: &InvestmentRequest) -> ClientResult<Investment> {
        validate_path_segment("project id", &request.project_id)?;
        if !request.amount.is_finite() || request.amount <= 0.0 {
            return Err(ClientError::ValidationError(format!(
                "investment amount must be positive, got {}",
                request.amount
            )));
        }

        let body = self
            .execute(self.request(Method::POST, "investments").json(request))
            .await?;
        let investment: Investment = serde_json::from_value(unwrap_data(&body).clone())
            .map_err(|e| ClientError::DecodeError(format!("investment: {}", e)))?;
        tracing::info!(project_id = %investment.project_id, investment_id = %investment.id, "Investment recorded");
        Ok(investment)
    }

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthSession> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ClientError::ValidationError("email and password are required".into()));
        }

        let body = self
            .execute(
                self.request(Method::POST, "auth/login")
                    .json(&json!({ "email": email, "password": password })),
            )
            .await?;
        let root = unwrap_data(&body);

        let token = first_string(root, &["token", "accessToken", "access_token"])
            .ok_or_else(|| ClientError::DecodeError("login response has no token".into()))?;
        let user = root.get("user");
        let user_id = user
            .and_then(|u| first_string(u, &["id", "_id"]))
            .or_else(|| first_string(root, &["userId"]))
            .unwrap_or_default();
        let email = user.and_then(|u| first_string(u, &["email"])).unwrap_or(email);

        Ok(AuthSession {
            token: token.to_string(),
            user_id: user_id.to_string(),
            email: email.to_string(),
        })
    }

    /// Sends `text` with the prior conversation and returns the assistant's
    /// reply.
    pub async fn send_chat_message(&self, history: &[ChatMessage], text: &str) -> ClientResult<ChatMessage> {
        if text.trim().is_empty() {
            return Err(ClientError::ValidationError("chat message is empty".into()));
        }

        let history: Vec<Value> = history
            .iter()
            .map(|m| json!({ "role": m.role, "content": m.content }))
            .collect();
        let body = self
            .execute(
                self.request(Method::POST, "chat")
                    .json(&json!({ "message": text, "history": history })),
            )
            .await?;

        let reply = first_string(unwrap_data(&body), &["reply", "response", "message", "content"])
            .ok_or_else(|| ClientError::DecodeError("chat response has no reply".into()))?;
        Ok(ChatMessage::new(ChatRole::Assistant, reply))
    }
}
