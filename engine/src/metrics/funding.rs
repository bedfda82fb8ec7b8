use serde::{Deserialize, Serialize};
use shared::models::Project;
use shared::utils::{parse_monetary_value, MonetaryInput};

use crate::error::{EngineError, EngineResult};

/// Share of `target` already raised, as a whole percentage in `[0, 100]`.
///
/// A zero (or negative) target means no goal was set and reads as 0%, not
/// as fully funded. Over-funded projects stop at 100.
pub fn calculate_funding_percentage(raised: impl MonetaryInput, target: impl MonetaryInput) -> u8 {
    let raised = parse_monetary_value(&raised);
    let target = parse_monetary_value(&target);
    if target <= 0.0 {
        return 0;
    }
    let percentage = (raised / target * 100.0).round();
    percentage.clamp(0.0, 100.0) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Low,
    Medium,
    High,
    Complete,
}

impl ProgressStatus {
    pub fn message(&self) -> &'static str {
        match self {
            ProgressStatus::Low => "Just getting started",
            ProgressStatus::Medium => "Gaining momentum",
            ProgressStatus::High => "Almost there!",
            ProgressStatus::Complete => "Fully funded!",
        }
    }
}

/// Lower bounds (inclusive) of the medium, high and complete bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressBands {
    pub medium: u8,
    pub high: u8,
    pub complete: u8,
}

impl Default for ProgressBands {
    fn default() -> Self {
        Self {
            medium: 25,
            high: 75,
            complete: 100,
        }
    }
}

impl ProgressBands {
    /// Bands must be strictly increasing within `1..=100`, which keeps
    /// classification monotonic in the percentage.
    pub fn validate(&self) -> EngineResult<()> {
        let ordered = self.medium > 0 && self.medium < self.high && self.high < self.complete;
        if !ordered || self.complete > 100 {
            return Err(EngineError::ConfigError(format!(
                "progress bands must satisfy 0 < medium < high < complete <= 100, got {}/{}/{}",
                self.medium, self.high, self.complete
            )));
        }
        Ok(())
    }

    pub fn classify(&self, percentage: u8) -> ProgressStatus {
        if percentage >= self.complete {
            ProgressStatus::Complete
        } else if percentage >= self.high {
            ProgressStatus::High
        } else if percentage >= self.medium {
            ProgressStatus::Medium
        } else {
            ProgressStatus::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectProgress {
    pub percentage: u8,
    pub status: ProgressStatus,
    pub message: &'static str,
}

pub fn get_project_progress(project: &Project) -> ProjectProgress {
    get_project_progress_with(project, &ProgressBands::default())
}

pub fn get_project_progress_with(project: &Project, bands: &ProgressBands) -> ProjectProgress {
    let percentage = calculate_funding_percentage(
        project.total_money_invested.as_str(),
        project.expected_raise_amount.as_str(),
    );
    let status = bands.classify(percentage);
    ProjectProgress {
        percentage,
        status,
        message: status.message(),
    }
}
