// Conversation history for the assistant chat widget, capped to a fixed
// number of messages (oldest dropped first).
use shared::models::{ChatMessage, ChatRole};

use super::storage::KeyValueStore;
use crate::error::ClientResult;

pub const CHAT_HISTORY_KEY: &str = "chat.history";

#[derive(Debug, Clone)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
    limit: usize,
}

impl ChatHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            messages: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        if self.messages.len() > self.limit {
            let overflow = self.messages.len() - self.limit;
            self.messages.drain(..overflow);
        }
        // the message just pushed is always the last one kept
        &self.messages[self.messages.len() - 1]
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> &ChatMessage {
        self.push(ChatMessage::new(ChatRole::User, content))
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) -> &ChatMessage {
        self.push(ChatMessage::new(ChatRole::Assistant, content))
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn persist(&self, store: &dyn KeyValueStore) -> ClientResult<()> {
        store.set(CHAT_HISTORY_KEY, &serde_json::to_string(&self.messages)?)
    }

    /// Rebuilds the history from `store`. Missing or unreadable data gives an
    /// empty history; a stored history longer than `limit` keeps its tail.
    pub fn restore(store: &dyn KeyValueStore, limit: usize) -> Self {
        let mut history = Self::new(limit);
        let Some(raw) = store.get(CHAT_HISTORY_KEY) else {
            return history;
        };
        match serde_json::from_str::<Vec<ChatMessage>>(&raw) {
            Ok(messages) => {
                for message in messages {
                    history.push(message);
                }
            }
            Err(e) => tracing::warn!(error = %e, "Stored chat history is unreadable, starting fresh"),
        }
        history
    }
}
