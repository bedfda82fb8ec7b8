// Derived metrics computed from canonical projects.
pub mod funding;
pub mod schedule;

pub use funding::{
    calculate_funding_percentage, get_project_progress, ProgressBands, ProgressStatus,
    ProjectProgress,
};
pub use schedule::{calculate_days_remaining, days_remaining};
