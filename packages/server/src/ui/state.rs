//! Server state shared across request handlers.

use std::sync::Arc;

use crate::domain::TokenVerifier;
use crate::usecase::{JoinRoomUseCase, LeaveRoomUseCase, RelayMessageUseCase, RoomQueryUseCase};

/// Shared application state
pub struct AppState {
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    pub relay_message_usecase: Arc<RelayMessageUseCase>,
    pub room_query_usecase: Arc<RoomQueryUseCase>,
    /// Verifier for the bearer token presented at upgrade time
    pub token_verifier: Arc<dyn TokenVerifier>,
}
