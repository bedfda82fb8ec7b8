// Engine command line: normalizes a saved API response and prints one
// summary row per project.
//
//   engine response.json        # read from a file
//   curl .../projects | engine  # or from stdin
use anyhow::{Context, Result};
use engine::config::EngineSettings;
use engine::normalize::normalize_response;
use engine::presentation::summarize_project;
use std::io::Read;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let settings = match std::env::var("ENGINE_SETTINGS") {
        Ok(path) => EngineSettings::load_from_file(&path)
            .with_context(|| format!("Failed to load engine settings from '{}'", path))?,
        Err(_) => EngineSettings::default(),
    };

    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read API response from '{}'", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read API response from stdin")?;
            buf
        }
    };

    let response: serde_json::Value =
        serde_json::from_str(&input).context("API response is not valid JSON")?;
    let projects = normalize_response(&response);
    info!(count = projects.len(), "Normalized projects");

    let now = chrono::Utc::now();
    for project in &projects {
        println!("{}", summarize_project(project, &settings, now));
    }

    Ok(())
}
