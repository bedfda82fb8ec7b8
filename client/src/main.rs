// Client command line.
//
//   client                  # list projects
//   client project <id>     # show one project
//   client login <email> <password>
//   client mine             # list the logged-in user's projects
//   client invest <project id> <amount>
//   client chat <message...>
//   client logout           # forget the stored session
use anyhow::{bail, Context, Result};
use client::config::AppConfig;
use client::services::{chat_turn, refresh_projects, ApiClient};
use client::state::{AppState, ChatHistory, JsonFileStore, MemoryStore, SessionStore, SharedStore};
use engine::presentation::{format_currency, summarize_project};
use shared::models::InvestmentRequest;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    info!(version = %config.version, api = %config.api.base_url, "Starting crowdfunding client");

    let store: SharedStore = match config.storage.session_file {
        Some(ref path) => Arc::new(
            JsonFileStore::open(path)
                .with_context(|| format!("Failed to open session store '{}'", path.display()))?,
        ),
        None => Arc::new(MemoryStore::new()),
    };
    let sessions = SessionStore::new(store.clone());
    let session = sessions.load();

    let mut api = ApiClient::new(&config.api)?;
    if let Some(token) = sessions.token() {
        api.set_token(Some(token));
    }

    let chat = ChatHistory::restore(store.as_ref(), config.storage.chat_history_limit);
    let state = Arc::new(RwLock::new(AppState::new(chat, session)));
    let now = chrono::Utc::now();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [] | ["list"] => {
            refresh_projects(&api, &state).await?;
            for summary in state.read().await.summaries(&config.engine, now) {
                println!("{}", summary);
            }
        }
        ["project", id] => match api.get_project(id).await? {
            Some(project) => {
                println!("{}", summarize_project(&project, &config.engine, now));
                println!("  {}", project.description);
            }
            None => bail!("Project '{}' not found", id),
        },
        ["login", email, password] => {
            let session = api.login(email, password).await?;
            sessions.save(&session)?;
            info!(user_id = %session.user_id, "Logged in");
            state.write().await.set_session(Some(session));
        }
        ["mine"] => {
            let session = state.read().await.session.clone();
            let Some(session) = session else {
                bail!("Not logged in");
            };
            for project in api.list_user_projects(&session.user_id).await? {
                println!("{}", summarize_project(&project, &config.engine, now));
            }
        }
        ["invest", project_id, amount] => {
            let amount: f64 = amount
                .parse()
                .with_context(|| format!("'{}' is not an amount", amount))?;
            let investment = api
                .invest(&InvestmentRequest {
                    project_id: project_id.to_string(),
                    amount,
                })
                .await?;
            println!(
                "Invested {} in project {}",
                format_currency(&investment.amount),
                investment.project_id
            );
        }
        ["chat", words @ ..] if !words.is_empty() => {
            let reply = chat_turn(&api, &state, store.as_ref(), &words.join(" ")).await?;
            println!("{}", reply.content);
        }
        ["logout"] => {
            sessions.clear()?;
            state.write().await.set_session(None);
            info!("Session cleared");
        }
        other => bail!("Unknown command: {}", other.join(" ")),
    }

    Ok(())
}
