//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::domain::TokenVerifier;
use crate::usecase::{JoinRoomUseCase, LeaveRoomUseCase, RelayMessageUseCase, RoomQueryUseCase};

use super::{
    handler::{get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat relay server
///
/// Encapsulates the wired usecases and the token verifier, and runs the
/// axum application.
pub struct Server {
    join_room_usecase: Arc<JoinRoomUseCase>,
    leave_room_usecase: Arc<LeaveRoomUseCase>,
    relay_message_usecase: Arc<RelayMessageUseCase>,
    room_query_usecase: Arc<RoomQueryUseCase>,
    token_verifier: Arc<dyn TokenVerifier>,
}

impl Server {
    pub fn new(
        join_room_usecase: Arc<JoinRoomUseCase>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
        relay_message_usecase: Arc<RelayMessageUseCase>,
        room_query_usecase: Arc<RoomQueryUseCase>,
        token_verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            join_room_usecase,
            leave_room_usecase,
            relay_message_usecase,
            room_query_usecase,
            token_verifier,
        }
    }

    /// Run the chat relay server.
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(
        self,
        host: String,
        port: u16,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let app_state = Arc::new(AppState {
            join_room_usecase: self.join_room_usecase,
            leave_room_usecase: self.leave_room_usecase,
            relay_message_usecase: self.relay_message_usecase,
            room_query_usecase: self.room_query_usecase,
            token_verifier: self.token_verifier,
        });

        let app = Router::new()
            // WebSocket endpoint
            .route("/ws/chat/{room}", get(websocket_handler))
            // HTTP endpoints
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{name}", get(get_room_detail))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat relay listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws/chat/{{room}}", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
