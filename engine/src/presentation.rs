// Rendering helpers consumed by views: currency strings, status badge style
// tokens and one-line project summaries. No business rules live here.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::{Project, ProjectStatus};
use shared::utils::{parse_monetary_value, MonetaryInput};

use crate::config::EngineSettings;
use crate::metrics::funding::{get_project_progress_with, ProgressStatus};
use crate::metrics::schedule::calculate_days_remaining;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "₦";

pub const STATUS_OPEN_CLASSES: &str = "bg-green-100 text-green-800";
pub const STATUS_FUNDED_CLASSES: &str = "bg-blue-100 text-blue-800";
pub const STATUS_CLOSED_CLASSES: &str = "bg-yellow-100 text-yellow-800";
pub const STATUS_CANCELLED_CLASSES: &str = "bg-red-100 text-red-800";
pub const STATUS_NEUTRAL_CLASSES: &str = "bg-gray-100 text-gray-800";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub decimals: usize,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            decimals: 2,
        }
    }
}

impl CurrencyFormat {
    pub fn format(&self, amount: impl MonetaryInput) -> String {
        let value = parse_monetary_value(&amount);
        let fixed = format!("{:.*}", self.decimals, value.abs());
        let (whole, fraction) = match fixed.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (fixed.as_str(), None),
        };

        let mut out = String::with_capacity(fixed.len() + whole.len() / 3 + self.symbol.len() + 1);
        // no sign on amounts that round to zero
        if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
            out.push('-');
        }
        out.push_str(&self.symbol);
        out.push_str(&group_thousands(whole));
        if let Some(fraction) = fraction {
            out.push('.');
            out.push_str(fraction);
        }
        out
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Renders an amount with the naira prefix, thousand separators and two
/// decimals: `"12345.6"` becomes `"₦12,345.60"`.
pub fn format_currency(amount: impl MonetaryInput) -> String {
    CurrencyFormat::default().format(amount)
}

/// Badge style token for a status, matched case-insensitively. Unknown
/// input gets the neutral token.
pub fn get_status_color_classes(status: &str) -> &'static str {
    match status.trim().to_uppercase().as_str() {
        "OPEN" => STATUS_OPEN_CLASSES,
        "FUNDED" => STATUS_FUNDED_CLASSES,
        "CLOSED" => STATUS_CLOSED_CLASSES,
        "CANCELLED" => STATUS_CANCELLED_CLASSES,
        _ => STATUS_NEUTRAL_CLASSES,
    }
}

/// One display row per project, as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub status: ProjectStatus,
    pub status_classes: &'static str,
    pub raised: String,
    pub target: String,
    pub percentage: u8,
    pub progress: ProgressStatus,
    pub progress_message: &'static str,
    pub days_left: u32,
}

impl std::fmt::Display for ProjectSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<28} {:<9} {:>16} / {:<16} {:>3}% {:<22} {} days left",
            self.name,
            self.status,
            self.raised,
            self.target,
            self.percentage,
            self.progress_message,
            self.days_left
        )
    }
}

pub fn summarize_project(project: &Project, settings: &EngineSettings, now: DateTime<Utc>) -> ProjectSummary {
    let progress = get_project_progress_with(project, &settings.progress_bands);
    ProjectSummary {
        id: project.id.clone(),
        name: project.name.clone(),
        status: project.status,
        status_classes: get_status_color_classes(project.status.as_str()),
        raised: settings.currency.format(project.total_money_invested.as_str()),
        target: settings.currency.format(project.expected_raise_amount.as_str()),
        percentage: progress.percentage,
        progress: progress.status,
        progress_message: progress.message,
        days_left: calculate_days_remaining(&project.end_date, now),
    }
}
