//! Tests for ApiClient against a mocked platform API.

use client::config::ApiSettings;
use client::services::{chat_turn, refresh_projects, ApiClient};
use client::state::{AppState, KeyValueStore, MemoryStore};
use client::ClientError;
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use shared::models::{ChatMessage, ChatRole, InvestmentRequest, ProjectStatus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

fn client_for(server: &ServerGuard, api_key: Option<&str>) -> ApiClient {
    ApiClient::new(&ApiSettings {
        base_url: server.url(),
        timeout_secs: 5,
        api_key: api_key.map(str::to_string),
    })
    .expect("Failed to build API client")
}

#[tokio::test]
async fn test_list_projects_unwraps_envelope_and_normalizes() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/projects")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "success": true,
                "data": [
                    {"_id": "p1", "title": "Solar Grid", "currentAmount": "75000", "goalAmount": "100000", "status": "open"},
                    {"id": "p2", "name": "Borehole", "status": "funded"}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let projects = client_for(&server, None).list_projects().await.unwrap();

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].id, "p1");
    assert_eq!(projects[0].name, "Solar Grid");
    assert_eq!(projects[0].total_money_invested, "75000");
    assert_eq!(projects[0].status, ProjectStatus::Open);
    assert_eq!(projects[1].status, ProjectStatus::Funded);
    assert_eq!(projects[1].expected_raise_amount, "0");
}

#[tokio::test]
async fn test_list_projects_malformed_body_is_empty() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/projects")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let projects = client_for(&server, None).list_projects().await.unwrap();
    assert!(projects.is_empty());
}

#[tokio::test]
async fn test_list_projects_error_status() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/projects")
        .with_status(500)
        .with_body(r#"{"message": "database unavailable"}"#)
        .create_async()
        .await;

    let err = client_for(&server, None).list_projects().await.unwrap_err();
    match err {
        ClientError::ApiError { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("GET", "/projects")
        .match_header("authorization", "Bearer secret-key")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let projects = client_for(&server, Some("secret-key")).list_projects().await.unwrap();
    assert!(projects.is_empty());
    m.assert_async().await;
}

#[tokio::test]
async fn test_get_project_found_and_missing() {
    let mut server = Server::new_async().await;
    let _found = server
        .mock("GET", "/projects/p1")
        .with_status(200)
        .with_body(json!({"data": {"title": "Wrapped", "goalAmount": 500}}).to_string())
        .create_async()
        .await;
    let _missing = server
        .mock("GET", "/projects/nope")
        .with_status(404)
        .with_body(r#"{"message": "Project not found"}"#)
        .create_async()
        .await;

    let api = client_for(&server, None);

    let project = api.get_project("p1").await.unwrap().expect("project p1");
    assert_eq!(project.id, "p1");
    assert_eq!(project.name, "Wrapped");
    assert_eq!(project.expected_raise_amount, "500");

    assert!(api.get_project("nope").await.unwrap().is_none());
    for bad_id in ["", "p1?x=1", "../users"] {
        assert!(matches!(
            api.get_project(bad_id).await,
            Err(ClientError::ValidationError(_))
        ));
    }
}

#[tokio::test]
async fn test_list_user_projects() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/projects/user/u7")
        .with_status(200)
        .with_body(json!({"projects": [{"id": "a", "userId": "u7"}]}).to_string())
        .create_async()
        .await;

    let projects = client_for(&server, None).list_user_projects("u7").await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].user_id, "u7");
}

#[tokio::test]
async fn test_invest_posts_and_decodes() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("POST", "/investments")
        .match_body(Matcher::PartialJson(json!({"projectId": "p1", "amount": 2500.0})))
        .with_status(201)
        .with_body(
            json!({"data": {"_id": "inv1", "projectId": "p1", "investorId": "u1", "amount": "2500"}}).to_string(),
        )
        .create_async()
        .await;

    let investment = client_for(&server, None)
        .invest(&InvestmentRequest {
            project_id: "p1".into(),
            amount: 2500.0,
        })
        .await
        .unwrap();

    assert_eq!(investment.id, "inv1");
    assert_eq!(investment.project_id, "p1");
    m.assert_async().await;
}

#[tokio::test]
async fn test_invest_rejects_bad_amounts_without_calling_api() {
    let server = Server::new_async().await;
    let api = client_for(&server, None);

    for amount in [0.0, -10.0, f64::NAN] {
        let result = api
            .invest(&InvestmentRequest {
                project_id: "p1".into(),
                amount,
            })
            .await;
        assert!(matches!(result, Err(ClientError::ValidationError(_))));
    }
}

#[tokio::test]
async fn test_login_reads_token_and_user() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/auth/login")
        .match_body(Matcher::PartialJson(json!({"email": "ada@example.com"})))
        .with_status(200)
        .with_body(json!({"token": "jwt", "user": {"_id": "u1", "email": "ada@example.com"}}).to_string())
        .create_async()
        .await;

    let session = client_for(&server, None)
        .login("ada@example.com", "hunter2")
        .await
        .unwrap();
    assert_eq!(session.token, "jwt");
    assert_eq!(session.user_id, "u1");
    assert_eq!(session.email, "ada@example.com");
}

#[tokio::test]
async fn test_login_without_token_is_decode_error() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/auth/login")
        .with_status(200)
        .with_body(r#"{"ok": true}"#)
        .create_async()
        .await;

    let result = client_for(&server, None).login("a@b.c", "pw").await;
    assert!(matches!(result, Err(ClientError::DecodeError(_))));
}

#[tokio::test]
async fn test_chat_sends_history_and_returns_reply() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/chat")
        .match_body(Matcher::PartialJson(json!({
            "message": "What is a funding goal?",
            "history": [{"role": "user", "content": "hi"}]
        })))
        .with_status(200)
        .with_body(json!({"data": {"reply": "The amount a project aims to raise."}}).to_string())
        .create_async()
        .await;

    let history = vec![ChatMessage::new(ChatRole::User, "hi")];
    let reply = client_for(&server, None)
        .send_chat_message(&history, "What is a funding goal?")
        .await
        .unwrap();

    assert_eq!(reply.role, ChatRole::Assistant);
    assert_eq!(reply.content, "The amount a project aims to raise.");
}

#[tokio::test]
async fn test_refresh_projects_fills_cache() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/projects")
        .with_status(200)
        .with_body(json!([{"id": "p1", "name": "One"}]).to_string())
        .create_async()
        .await;

    let api = client_for(&server, None);
    let state = RwLock::new(AppState::default());

    assert!(refresh_projects(&api, &state).await.unwrap());
    let state = state.read().await;
    assert_eq!(state.projects().len(), 1);
    assert_eq!(state.project("p1").map(|p| p.name.as_str()), Some("One"));
}

#[tokio::test]
async fn test_failed_refresh_is_not_left_pending() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/projects")
        .with_status(503)
        .create_async()
        .await;

    let api = client_for(&server, None);
    let state = RwLock::new(AppState::default());

    assert!(refresh_projects(&api, &state).await.is_err());
    let state = state.read().await;
    assert!(!state.is_fetch_pending());
    assert!(state.projects().is_empty());
}

#[tokio::test]
async fn test_chat_turn_records_exchange_without_holding_state() {
    let state = Arc::new(RwLock::new(AppState::default()));
    let unlocked_during_request = Arc::new(AtomicBool::new(false));

    let mut server = Server::new_async().await;
    let seen_state = Arc::clone(&state);
    let seen_unlocked = Arc::clone(&unlocked_during_request);
    let _m = server
        .mock("POST", "/chat")
        .with_status(200)
        .with_body_from_request(move |_| {
            seen_unlocked.store(seen_state.try_write().is_ok(), Ordering::SeqCst);
            json!({"reply": "Pick a project you believe in."}).to_string().into()
        })
        .create_async()
        .await;

    let api = client_for(&server, None);
    let store = MemoryStore::new();
    let reply = chat_turn(&api, &state, &store, "How do I start?").await.unwrap();

    assert_eq!(reply.content, "Pick a project you believe in.");
    assert!(unlocked_during_request.load(Ordering::SeqCst));

    let state = state.read().await;
    let contents: Vec<&str> = state.chat.messages().iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["How do I start?", "Pick a project you believe in."]);
    assert!(store.get("chat.history").is_some());
}

#[tokio::test]
async fn test_failed_chat_turn_leaves_history_alone() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/chat")
        .with_status(500)
        .create_async()
        .await;

    let api = client_for(&server, None);
    let state = RwLock::new(AppState::default());
    let store = MemoryStore::new();

    assert!(chat_turn(&api, &state, &store, "hello").await.is_err());
    assert!(state.read().await.chat.is_empty());
    assert!(store.get("chat.history").is_none());
}
