// Client configuration.
// The defaults ship embedded in the binary (assets/config/default.json). An
// optional JSON file named by CROWDFUND_CONFIG is deep-merged over them, and
// CROWDFUND_API_URL / CROWDFUND_API_KEY override the API section last.
use engine::config::EngineSettings;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

use crate::error::{ClientError, ClientResult};

pub const CONFIG_PATH_VAR: &str = "CROWDFUND_CONFIG";
pub const API_URL_VAR: &str = "CROWDFUND_API_URL";
pub const API_KEY_VAR: &str = "CROWDFUND_API_KEY";

const DEFAULT_CONFIG: &str = include_str!("../../assets/config/default.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub version: String,
    pub api: ApiSettings,
    pub storage: StorageSettings,
    #[serde(default)]
    pub engine: EngineSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    // Where the session and chat history persist; in-memory when unset
    #[serde(default)]
    pub session_file: Option<PathBuf>,
    pub chat_history_limit: usize,
}

impl AppConfig {
    pub fn load_default() -> ClientResult<Self> {
        let config: AppConfig = serde_json::from_str(DEFAULT_CONFIG)?;
        Ok(config)
    }

    /// Embedded defaults, then the optional config file, then environment.
    pub fn load() -> ClientResult<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }
        let overlay = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => {
                tracing::info!(path = %path, "Reading config file");
                Some(std::fs::read_to_string(&path)?)
            }
            Err(_) => None,
        };
        Self::from_sources(overlay.as_deref(), |key| std::env::var(key).ok())
    }

    pub fn from_sources(
        overlay: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> ClientResult<Self> {
        let mut merged: Value = serde_json::from_str(DEFAULT_CONFIG)?;
        if let Some(overlay) = overlay {
            let overlay: Value = serde_json::from_str(overlay)?;
            merge_json(&mut merged, overlay);
        }

        let mut config: AppConfig = serde_json::from_value(merged)?;
        if let Some(url) = env(API_URL_VAR).filter(|v| !v.trim().is_empty()) {
            config.api.base_url = url;
        }
        if let Some(key) = env(API_KEY_VAR).filter(|v| !v.trim().is_empty()) {
            config.api.api_key = Some(key);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ClientResult<()> {
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ClientError::ConfigError(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                self.api.base_url
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(ClientError::ConfigError("api.timeout_secs must be positive".into()));
        }
        if self.storage.chat_history_limit == 0 {
            return Err(ClientError::ConfigError(
                "storage.chat_history_limit must be positive".into(),
            ));
        }
        self.engine.validate()?;
        Ok(())
    }
}

// Objects merge key by key; any other overlay value replaces the base.
fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
