// Engine library root: normalization of raw API records into canonical
// projects, funding metrics, and presentation helpers.

pub mod config;
pub mod error;
pub mod metrics;
pub mod normalize;
pub mod presentation;

pub use error::{EngineError, EngineResult};
