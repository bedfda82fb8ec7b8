use shared::models::ProjectStatus;

/// Maps any status text onto the closed set of campaign states.
///
/// Matching is case-insensitive. Anything unrecognised, including a missing
/// value, becomes [`ProjectStatus::Open`]: upstream vocabularies drift and the
/// UI must always have something to render.
pub fn normalize_status(raw: Option<&str>) -> ProjectStatus {
    let Some(raw) = raw else {
        return ProjectStatus::Open;
    };
    let upper = raw.trim().to_uppercase();
    ProjectStatus::ALL
        .into_iter()
        .find(|status| status.as_str() == upper)
        .unwrap_or_else(|| {
            tracing::debug!(status = %raw, "Unrecognised project status, defaulting to OPEN");
            ProjectStatus::Open
        })
}
