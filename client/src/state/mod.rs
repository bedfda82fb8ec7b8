// Client-side state: project cache, chat history, session, and the
// persistence they are injected with.
pub mod app_state;
pub mod chat_history;
pub mod session;
pub mod storage;

pub use app_state::{AppState, FetchToken};
pub use chat_history::ChatHistory;
pub use session::SessionStore;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, SharedStore};
