//! REST handlers.

use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use vox_core::VOX_VERSION;
use vox_dispatch::{LoginResult, Reply};

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub text: String,
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub session_id: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub session_id: String,
}

pub async fn command(
    State(state): State<AppState>,
    Json(request): Json<CommandRequest>,
) -> Json<Reply> {
    tracing::info!(session = %request.session_id, text = %request.text, "command");
    let reply = state.dispatcher.dispatch(&request.session_id, &request.text);
    state.metrics.observe(&reply);
    Json(reply)
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Json<LoginResult> {
    Json(
        state
            .dispatcher
            .login(&request.session_id, &request.username, &request.password),
    )
}

pub async fn logout(
    State(state): State<AppState>,
    Json(request): Json<LogoutRequest>,
) -> Json<Value> {
    state.dispatcher.logout(&request.session_id);
    Json(json!({ "success": true }))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": VOX_VERSION,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub async fn commands(State(state): State<AppState>) -> Json<Value> {
    let categories = state.dispatcher.commands();
    let total: usize = categories.iter().map(|c| c.commands.len()).sum();
    Json(json!({
        "total_commands": total,
        "categories": categories,
    }))
}

pub async fn sessions(State(state): State<AppState>) -> Json<Value> {
    let stats = state.dispatcher.session_stats();
    Json(json!({
        "active_sessions": stats.len(),
        "total_messages": stats.iter().map(|s| s.messages).sum::<usize>(),
        "sessions": stats,
    }))
}

pub async fn conversation(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<Value> {
    Json(json!({
        "session_id": session_id,
        "conversation": state.dispatcher.conversation(&session_id),
    }))
}

pub async fn export_conversation(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<Value> {
    Json(json!({
        "session_id": session_id,
        "export": state.dispatcher.export_conversation(&session_id),
    }))
}

pub async fn metrics(State(state): State<AppState>) -> String {
    state.metrics.encode()
}
