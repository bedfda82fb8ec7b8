// Services talking to the platform REST API.
pub mod api_client;
pub mod chat;
pub mod projects;

pub use api_client::ApiClient;
pub use chat::chat_turn;
pub use projects::refresh_projects;
