// Normalization of loosely shaped API records into canonical projects.
pub mod envelope;
pub mod project;
pub mod status;

pub use envelope::{extract_project_records, normalize_response};
pub use project::{ensure_identified, normalize_project, normalize_projects};
pub use status::normalize_status;
