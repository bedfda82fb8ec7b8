// Fetch-and-cache flow for the project listing.
use tokio::sync::RwLock;

use super::api_client::ApiClient;
use crate::error::ClientResult;
use crate::state::AppState;

/// Fetches `/projects` and stores the result in `state`, unless a newer
/// refresh was started in the meantime. Returns whether this refresh's
/// result is the one now cached. A failed request settles its token and
/// leaves the cache as it was.
pub async fn refresh_projects(client: &ApiClient, state: &RwLock<AppState>) -> ClientResult<bool> {
    let token = state.write().await.begin_fetch();
    let projects = match client.list_projects().await {
        Ok(projects) => projects,
        Err(e) => {
            state.write().await.abandon_fetch(token);
            return Err(e);
        }
    };
    let count = projects.len();

    let applied = state.write().await.complete_fetch(token, projects);
    if applied {
        tracing::info!(count, "Project cache refreshed");
    }
    Ok(applied)
}
