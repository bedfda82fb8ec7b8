// Auth session persisted through an injected store.
use shared::models::AuthSession;

use super::storage::SharedStore;
use crate::error::ClientResult;

pub const SESSION_KEY: &str = "auth.session";

pub struct SessionStore {
    store: SharedStore,
}

impl SessionStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn save(&self, session: &AuthSession) -> ClientResult<()> {
        self.store.set(SESSION_KEY, &serde_json::to_string(session)?)?;
        tracing::debug!(user_id = %session.user_id, "Saved auth session");
        Ok(())
    }

    pub fn load(&self) -> Option<AuthSession> {
        let raw = self.store.get(SESSION_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(error = %e, "Stored auth session is unreadable, ignoring it");
                None
            }
        }
    }

    pub fn token(&self) -> Option<String> {
        self.load().map(|session| session.token).filter(|t| !t.is_empty())
    }

    pub fn clear(&self) -> ClientResult<()> {
        self.store.remove(SESSION_KEY)
    }
}
