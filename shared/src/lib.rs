// Data models and value coercion shared by the engine and the client.
pub mod models;
pub mod utils;
