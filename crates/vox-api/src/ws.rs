//! WebSocket endpoint: the live voice/chat channel.
//!
//! On connect the client gets a welcome view; afterwards each incoming
//! JSON message maps to a dispatcher call and the reply is pushed back on
//! the same socket. Disconnect ends the session.

use crate::AppState;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::json;
use std::str::FromStr;
use vox_core::AppType;

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientMessage {
    VoiceCommand {
        text: String,
    },
    Action {
        action_id: String,
        app_type: String,
    },
    Refresh,
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(client_id): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, client_id, state))
}

async fn handle_socket(mut socket: WebSocket, client_id: String, state: AppState) {
    tracing::info!(client = %client_id, "websocket connected");

    let welcome = state.dispatcher.welcome(&client_id);
    let greeting = json!({
        "type": "welcome",
        "message": welcome.response_text,
        "view": welcome.view,
    });
    if socket.send(Message::Text(greeting.to_string())).await.is_err() {
        state.dispatcher.end_session(&client_id);
        return;
    }

    while let Some(Ok(message)) = socket.recv().await {
        let text = match message {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };

        let Ok(client_message) = serde_json::from_str::<ClientMessage>(&text) else {
            continue;
        };

        let outgoing = match client_message {
            ClientMessage::VoiceCommand { text } => {
                let reply = state.dispatcher.dispatch(&client_id, &text);
                state.metrics.observe(&reply);
                json!({
                    "type": "response",
                    "intent": reply.intent,
                    "response_text": reply.response_text,
                    "view": reply.view,
                    "command": reply.command,
                    "timestamp": reply.timestamp.to_rfc3339(),
                })
            }
            ClientMessage::Action { action_id, app_type } => {
                match AppType::from_str(&app_type) {
                    Ok(app) => {
                        let reply = state.dispatcher.regenerate(&client_id, app, &action_id);
                        json!({
                            "type": "view_update",
                            "view": reply.view,
                            "timestamp": reply.timestamp.to_rfc3339(),
                        })
                    }
                    Err(_) => json!({
                        "type": "error",
                        "message": format!("unknown app type: {}", app_type),
                    }),
                }
            }
            ClientMessage::Refresh => match state.dispatcher.refresh(&client_id) {
                Some(reply) => json!({
                    "type": "view_update",
                    "view": reply.view,
                    "timestamp": reply.timestamp.to_rfc3339(),
                }),
                None => continue,
            },
        };

        if socket.send(Message::Text(outgoing.to_string())).await.is_err() {
            break;
        }
    }

    tracing::info!(client = %client_id, "websocket disconnected");
    state.dispatcher.end_session(&client_id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_messages_deserialize() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"voice_command","text":"pokaż faktury"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::VoiceCommand { .. }));

        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"action","action_id":"export","app_type":"documents"}"#)
                .unwrap();
        assert!(matches!(msg, ClientMessage::Action { .. }));

        let msg: ClientMessage = serde_json::from_str(r#"{"type":"refresh"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Refresh));
    }

    #[test]
    fn malformed_message_is_rejected() {
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"bogus"}"#).is_err());
    }
}
