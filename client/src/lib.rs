// Client library root: configuration, REST services and client-side state.
pub mod config;
pub mod error;
pub mod services;
pub mod state;

pub use error::{ClientError, ClientResult};
