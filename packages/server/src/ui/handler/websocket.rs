//! WebSocket connection handlers.
//!
//! The upgrade is gated on a bearer token: the credential comes from the
//! `Authorization` header, or from a `?token=` query parameter for clients
//! that cannot set headers on WebSocket requests.

use std::sync::Arc;

use axum::{
    extract::{
        Path, Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use campfire_shared::time::get_utc_timestamp;

use crate::{
    domain::{AuthError, MessageBody, Payload, RoomKind, RoomName, SessionId, Timestamp, UserId},
    infrastructure::dto::websocket::{
        ChatFrame, FrameType, MemberJoinedFrame, MemberLeftFrame, RoomJoinedFrame,
    },
    ui::state::AppState,
};

/// Query parameters for the WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    /// Bearer token fallback for clients that cannot set headers
    pub token: Option<String>,
    /// Kind to use if the room has to be created; defaults to `chat`
    pub kind: Option<RoomKind>,
}

/// Extract the bearer token from the Authorization header, falling back to
/// the `token` query parameter.
fn bearer_token<'a>(headers: &'a HeaderMap, query: &'a ConnectQuery) -> Result<&'a str, AuthError> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let value = value.to_str().map_err(|_| AuthError::MalformedHeader)?;
        let mut parts = value.split_whitespace();
        return match (parts.next(), parts.next()) {
            (Some(scheme), Some(token)) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
            _ => Err(AuthError::MalformedHeader),
        };
    }
    match query.token.as_deref() {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MissingToken),
    }
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
    Query(query): Query<ConnectQuery>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, StatusCode> {
    // 1. Authenticate before the upgrade completes
    let token = match bearer_token(&headers, &query) {
        Ok(token) => token,
        Err(e) => {
            tracing::warn!("Rejecting upgrade: {}", e);
            return Err(StatusCode::UNAUTHORIZED);
        }
    };
    let claims = match state.token_verifier.verify(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!("Rejecting upgrade: {}", e);
            return Err(StatusCode::UNAUTHORIZED);
        }
    };
    let user = match claims.user_id() {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("Rejecting upgrade, unusable subject claim: {}", e);
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    // 2. Validate the room name from the URL
    let room = match RoomName::try_from(room) {
        Ok(room) => room,
        Err(e) => {
            tracing::warn!("Invalid room name: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    // 3. Join the room before upgrading, so a failure still maps to an
    //    HTTP status
    let kind = query.kind.unwrap_or(RoomKind::Chat);
    let session = SessionId::generate();
    let (tx, rx) = mpsc::unbounded_channel();
    match state
        .join_room_usecase
        .execute(&room, kind, &user, session, tx)
        .await
    {
        Ok((joined_at, members)) => {
            tracing::info!("User '{}' joined room '{}' (session {})", user, room, session);
            // If the handshake dies after the 101 the socket callback never
            // runs; drop the session registered above
            let cleanup_state = state.clone();
            let cleanup_room = room.clone();
            Ok(ws
                .on_failed_upgrade(move |e| {
                    tracing::warn!("Upgrade failed for session {}: {}", session, e);
                    spawn_session_cleanup(cleanup_state, cleanup_room, session);
                })
                .on_upgrade(move |socket| {
                    handle_socket(
                        socket, state, room, kind, user, session, rx, joined_at, members,
                    )
                }))
        }
        Err(e) => {
            tracing::error!("Failed to join room '{}': {}", room, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Unregister a session whose socket never materialized
fn spawn_session_cleanup(
    state: Arc<AppState>,
    room: RoomName,
    session: SessionId,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let remaining = state.leave_room_usecase.execute(&room, session).await;
        tracing::debug!(
            "Cleaned up session {} from '{}' ({} session(s) remaining)",
            session,
            room,
            remaining
        );
    })
}

/// Spawns a task that receives payloads from the rx channel and pushes them
/// to the WebSocket sender.
///
/// This is the outbound half of the relay: everything other sessions send
/// into the group lands here and goes out on this client's socket.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<Payload>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            let message = match payload {
                Payload::Text(text) => Message::Text(text.into()),
                Payload::Binary(bytes) => Message::Binary(bytes.into()),
            };
            if sender.send(message).await.is_err() {
                break;
            }
        }
    })
}

#[allow(clippy::too_many_arguments)]
async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    room: RoomName,
    kind: RoomKind,
    user: UserId,
    session: SessionId,
    rx: mpsc::UnboundedReceiver<Payload>,
    joined_at: Timestamp,
    members: Vec<UserId>,
) {
    let (mut sender, mut receiver) = socket.split();

    // Send the recorded member list to the newly connected client
    {
        let joined_frame = RoomJoinedFrame {
            r#type: FrameType::RoomJoined,
            room: room.as_str().to_string(),
            members: members.iter().map(|m| m.as_str().to_string()).collect(),
            joined_at: joined_at.value(),
        };

        let joined_json = serde_json::to_string(&joined_frame).unwrap();
        if let Err(e) = sender.send(Message::Text(joined_json.into())).await {
            tracing::error!("Failed to send room_joined to '{}': {}", user, e);
            state.leave_room_usecase.execute(&room, session).await;
            return;
        }
    }

    // Notify the rest of the group
    {
        let member_joined = MemberJoinedFrame {
            r#type: FrameType::MemberJoined,
            room: room.as_str().to_string(),
            user: user.as_str().to_string(),
            joined_at: joined_at.value(),
        };

        let member_joined_json = serde_json::to_string(&member_joined).unwrap();
        let notified = state
            .join_room_usecase
            .broadcast_member_joined(&room, session, &member_joined_json)
            .await;
        tracing::debug!("Notified {} session(s) of '{}' joining", notified, user);
    }

    let recv_room = room.clone();
    let recv_user = user.clone();
    let recv_state = state.clone();

    // Inbound half: persist and fan out everything this client sends
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on session {}: {}", session, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let body = match MessageBody::text(text.to_string()) {
                        Ok(body) => body,
                        Err(e) => {
                            tracing::warn!("Dropping text message from '{}': {}", recv_user, e);
                            continue;
                        }
                    };

                    // One timestamp for both the wire frame and the history
                    let sent_at = Timestamp::new(get_utc_timestamp());
                    let chat_frame = ChatFrame {
                        r#type: FrameType::Chat,
                        room: recv_room.as_str().to_string(),
                        sender: recv_user.as_str().to_string(),
                        content: text.to_string(),
                        sent_at: sent_at.value(),
                    };
                    let chat_json = serde_json::to_string(&chat_frame).unwrap();

                    match recv_state
                        .relay_message_usecase
                        .execute(
                            &recv_room,
                            kind,
                            session,
                            recv_user.clone(),
                            body,
                            sent_at,
                            Payload::Text(chat_json),
                        )
                        .await
                    {
                        Ok(delivered) => {
                            tracing::debug!(
                                "Relayed text from '{}' in '{}' to {} session(s)",
                                recv_user,
                                recv_room,
                                delivered
                            );
                        }
                        Err(e) => {
                            tracing::warn!("Failed to relay message: {}", e);
                        }
                    }
                }
                Message::Binary(bytes) => {
                    let body = match MessageBody::media(bytes.to_vec()) {
                        Ok(body) => body,
                        Err(e) => {
                            tracing::warn!("Dropping media message from '{}': {}", recv_user, e);
                            continue;
                        }
                    };

                    match recv_state
                        .relay_message_usecase
                        .execute(
                            &recv_room,
                            kind,
                            session,
                            recv_user.clone(),
                            body,
                            Timestamp::new(get_utc_timestamp()),
                            Payload::Binary(bytes.to_vec()),
                        )
                        .await
                    {
                        Ok(delivered) => {
                            tracing::debug!(
                                "Relayed {} media byte(s) from '{}' in '{}' to {} session(s)",
                                bytes.len(),
                                recv_user,
                                recv_room,
                                delivered
                            );
                        }
                        Err(e) => {
                            tracing::warn!("Failed to relay media message: {}", e);
                        }
                    }
                }
                Message::Ping(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                    tracing::debug!("Received ping on session {}", session);
                }
                Message::Close(_) => {
                    tracing::info!("Session {} requested close", session);
                    break;
                }
                _ => {}
            }
        }
    });

    // Outbound half: push group payloads onto this client's socket
    let mut send_task = pusher_loop(rx, sender);

    // If either task completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Discard the session and notify the remaining group members
    let remaining = state.leave_room_usecase.execute(&room, session).await;
    tracing::info!(
        "User '{}' left room '{}' ({} session(s) remaining)",
        user,
        room,
        remaining
    );

    let member_left = MemberLeftFrame {
        r#type: FrameType::MemberLeft,
        room: room.as_str().to_string(),
        user: user.as_str().to_string(),
        left_at: get_utc_timestamp(),
    };
    let member_left_json = serde_json::to_string(&member_left).unwrap();
    let notified = state
        .leave_room_usecase
        .broadcast_member_left(&room, &member_left_json)
        .await;
    tracing::debug!("Notified {} session(s) of '{}' leaving", notified, user);
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn no_token_query() -> ConnectQuery {
        ConnectQuery {
            token: None,
            kind: None,
        }
    }

    #[test]
    fn test_bearer_token_from_header() {
        // Test item: a well-formed Authorization header yields the token
        // given:
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );

        // when / then:
        assert_eq!(
            bearer_token(&headers, &no_token_query()),
            Ok("abc.def.ghi")
        );
    }

    #[test]
    fn test_bearer_scheme_is_case_insensitive() {
        // Test item: "bearer" in any casing is accepted
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("bearer abc"),
        );
        assert_eq!(bearer_token(&headers, &no_token_query()), Ok("abc"));
    }

    #[test]
    fn test_missing_credential_is_rejected() {
        // Test item: no header and no query parameter means no token
        let headers = HeaderMap::new();
        assert_eq!(
            bearer_token(&headers, &no_token_query()),
            Err(AuthError::MissingToken)
        );
    }

    #[test]
    fn test_malformed_header_is_rejected() {
        // Test item: a header without scheme or without a token part fails
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer"));
        assert_eq!(
            bearer_token(&headers, &no_token_query()),
            Err(AuthError::MalformedHeader)
        );

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );
        assert_eq!(
            bearer_token(&headers, &no_token_query()),
            Err(AuthError::MalformedHeader)
        );
    }

    #[test]
    fn test_query_parameter_fallback() {
        // Test item: without a header, the token query parameter is used
        let headers = HeaderMap::new();
        let query = ConnectQuery {
            token: Some("from-query".to_string()),
            kind: None,
        };
        assert_eq!(bearer_token(&headers, &query), Ok("from-query"));
    }

    #[test]
    fn test_header_takes_precedence_over_query() {
        // Test item: when both are present, the header wins
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );
        let query = ConnectQuery {
            token: Some("from-query".to_string()),
            kind: None,
        };
        assert_eq!(bearer_token(&headers, &query), Ok("from-header"));
    }

    #[test]
    fn test_empty_query_token_is_rejected() {
        // Test item: an empty token query parameter counts as missing
        let headers = HeaderMap::new();
        let query = ConnectQuery {
            token: Some(String::new()),
            kind: None,
        };
        assert_eq!(
            bearer_token(&headers, &query),
            Err(AuthError::MissingToken)
        );
    }

    #[tokio::test]
    async fn test_session_cleanup_unregisters_group_entry() {
        // Test item: the failed-upgrade cleanup removes the session that was
        // registered before the handshake
        // given:
        use crate::domain::GroupChannel;
        use crate::infrastructure::{InMemoryGroupChannel, InMemoryRoomStore, JwtTokenVerifier};
        use crate::usecase::{
            JoinRoomUseCase, LeaveRoomUseCase, RelayMessageUseCase, RoomQueryUseCase,
        };
        use campfire_shared::time::FixedClock;

        let store = Arc::new(InMemoryRoomStore::new(Arc::new(FixedClock::new(0))));
        let groups = Arc::new(InMemoryGroupChannel::new());
        let state = Arc::new(AppState {
            join_room_usecase: Arc::new(JoinRoomUseCase::new(store.clone(), groups.clone())),
            leave_room_usecase: Arc::new(LeaveRoomUseCase::new(groups.clone())),
            relay_message_usecase: Arc::new(RelayMessageUseCase::new(
                store.clone(),
                groups.clone(),
            )),
            room_query_usecase: Arc::new(RoomQueryUseCase::new(store)),
            token_verifier: Arc::new(JwtTokenVerifier::new("test-secret")),
        });
        let lobby = RoomName::new("lobby".to_string()).unwrap();
        let alice = UserId::new("alice".to_string()).unwrap();
        let session = SessionId::generate();
        let (tx, _rx) = mpsc::unbounded_channel();
        state
            .join_room_usecase
            .execute(&lobby, RoomKind::Chat, &alice, session, tx)
            .await
            .unwrap();
        assert_eq!(groups.session_count(&lobby).await, 1);

        // when:
        spawn_session_cleanup(state, lobby.clone(), session)
            .await
            .unwrap();

        // then:
        assert_eq!(groups.session_count(&lobby).await, 0);
    }
}
