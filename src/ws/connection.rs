//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching incoming commands and forwarding filtered review events.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::FollowList;
use crate::domain::{Caller, ReviewEvent, UserId};

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and dispatches them.
/// - Forwards matching events from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(
    socket: WebSocket,
    mut event_rx: broadcast::Receiver<ReviewEvent>,
    caller: Caller,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut follows = FollowList::new(caller);
    tracing::debug!(user_id = %caller.user_id, admin = caller.is_admin, "ws connection opened");

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = handle_text_message(&text, &mut follows);
                        if let Ok(json) = serde_json::to_string(&reply)
                            && ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            event = event_rx.recv() => {
                match event {
                    Ok(review_event) => {
                        if !follows.matches(review_event.user_id()) {
                            continue;
                        }
                        let Ok(payload) = serde_json::to_value(&review_event) else {
                            continue;
                        };
                        let msg = WsMessage::new(uuid::Uuid::new_v4().to_string(), WsMessageType::Event, payload);
                        let Ok(json) = serde_json::to_string(&msg) else {
                            continue;
                        };
                        if ws_tx.send(Message::text(json)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!(user_id = %caller.user_id, "ws connection closed");
}

/// Handles a text message from the client and builds the reply.
fn handle_text_message(text: &str, follows: &mut FollowList) -> WsMessage {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return WsMessage::error("", 400, "malformed JSON");
    };
    if msg.msg_type != WsMessageType::Command {
        return WsMessage::error(msg.id, 400, "expected a command message");
    }
    let Ok(command) = serde_json::from_value::<WsCommand>(msg.payload) else {
        return WsMessage::error(msg.id, 404, "unknown command");
    };

    let (raw_ids, following) = match &command {
        WsCommand::Subscribe { user_ids } => (user_ids, true),
        WsCommand::Unsubscribe { user_ids } => (user_ids, false),
    };
    let Some((ids, wildcard)) = parse_targets(raw_ids) else {
        return WsMessage::error(msg.id, 400, "invalid user id");
    };

    if following {
        if follows.follow(&ids, wildcard).is_err() {
            return WsMessage::error(msg.id, 403, "only administrators may follow other users");
        }
        WsMessage::new(
            msg.id,
            WsMessageType::Response,
            serde_json::json!({
                "subscribed": ids.iter().map(ToString::to_string).collect::<Vec<_>>(),
                "count": follows.count(),
                "wildcard": follows.follows_everyone(),
            }),
        )
    } else {
        follows.unfollow(&ids, wildcard);
        WsMessage::new(
            msg.id,
            WsMessageType::Response,
            serde_json::json!({
                "unsubscribed": ids.iter().map(ToString::to_string).collect::<Vec<_>>(),
                "remaining_count": follows.count(),
                "wildcard": follows.follows_everyone(),
            }),
        )
    }
}

/// Splits raw targets into user IDs and the wildcard flag. `None` if any
/// entry is neither `"*"` nor a UUID.
fn parse_targets(raw: &[String]) -> Option<(Vec<UserId>, bool)> {
    let mut ids = Vec::with_capacity(raw.len());
    let mut wildcard = false;
    for s in raw {
        if s == "*" {
            wildcard = true;
        } else {
            ids.push(s.parse::<UserId>().ok()?);
        }
    }
    Some((ids, wildcard))
}
