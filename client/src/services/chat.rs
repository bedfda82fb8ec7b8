// One assistant chat turn against the shared app state.
use shared::models::ChatMessage;
use tokio::sync::RwLock;

use super::api_client::ApiClient;
use crate::error::ClientResult;
use crate::state::{AppState, KeyValueStore};

/// Sends `text` with the current history, then records both sides of the
/// exchange and persists the history to `store`. No lock on `state` is
/// held while the request is in flight; a failed request leaves the
/// history untouched.
pub async fn chat_turn(
    client: &ApiClient,
    state: &RwLock<AppState>,
    store: &dyn KeyValueStore,
    text: &str,
) -> ClientResult<ChatMessage> {
    let history = state.read().await.chat.messages().to_vec();
    let reply = client.send_chat_message(&history, text).await?;

    let mut state = state.write().await;
    state.chat.push_user(text);
    let reply = state.chat.push(reply).clone();
    state.chat.persist(store)?;
    tracing::debug!(messages = state.chat.len(), "Chat history updated");
    Ok(reply)
}
