// Client-side application state: the cached project list used for
// rendering, the chat history and the current session.
//
// Overlapping fetches are ordered with request tokens. Every fetch takes a
// token when it starts; only the most recently issued token may replace the
// cache, so a slow early response never overwrites a newer one.

use chrono::{DateTime, Utc};
use engine::config::EngineSettings;
use engine::presentation::{summarize_project, ProjectSummary};
use shared::models::{AuthSession, Project};

use super::chat_history::ChatHistory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchToken(u64);

#[derive(Debug, Clone)]
pub struct AppState {
    projects: Vec<Project>,
    latest_token: u64,
    settled_token: Option<u64>,
    last_updated: Option<DateTime<Utc>>,

    pub chat: ChatHistory,
    pub session: Option<AuthSession>,
}

impl AppState {
    pub fn new(chat: ChatHistory, session: Option<AuthSession>) -> Self {
        Self {
            projects: Vec::new(),
            latest_token: 0,
            settled_token: None,
            last_updated: None,
            chat,
            session,
        }
    }

    pub fn begin_fetch(&mut self) -> FetchToken {
        self.latest_token += 1;
        FetchToken(self.latest_token)
    }

    /// Replaces the cached projects if `token` is still the latest one
    /// issued. Returns whether the result was applied.
    pub fn complete_fetch(&mut self, token: FetchToken, projects: Vec<Project>) -> bool {
        if token.0 != self.latest_token {
            tracing::debug!(
                token = token.0,
                latest = self.latest_token,
                "Discarding stale project fetch"
            );
            return false;
        }
        self.projects = projects;
        self.settled_token = Some(token.0);
        self.last_updated = Some(Utc::now());
        true
    }

    /// Settles a fetch that failed. The cache keeps its previous contents;
    /// a stale token is ignored just like in [`Self::complete_fetch`].
    pub fn abandon_fetch(&mut self, token: FetchToken) -> bool {
        if token.0 != self.latest_token {
            return false;
        }
        self.settled_token = Some(token.0);
        true
    }

    pub fn is_fetch_pending(&self) -> bool {
        self.settled_token != Some(self.latest_token) && self.latest_token > 0
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn summaries(&self, settings: &EngineSettings, now: DateTime<Utc>) -> Vec<ProjectSummary> {
        self.projects
            .iter()
            .map(|project| summarize_project(project, settings, now))
            .collect()
    }

    pub fn set_session(&mut self, session: Option<AuthSession>) {
        self.session = session;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ChatHistory::new(50), None)
    }
}
