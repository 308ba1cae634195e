//! UseCase: leaving a room.
//!
//! Discards the session from the group. Recorded membership is kept; only
//! live presence changes.

use std::sync::Arc;

use crate::domain::{GroupChannel, Payload, RoomName, SessionId};

pub struct LeaveRoomUseCase {
    groups: Arc<dyn GroupChannel>,
}

impl LeaveRoomUseCase {
    pub fn new(groups: Arc<dyn GroupChannel>) -> Self {
        Self { groups }
    }

    /// Remove the session from the room's group.
    ///
    /// Returns the number of sessions still subscribed.
    pub async fn execute(&self, room: &RoomName, session: SessionId) -> usize {
        self.groups.group_discard(room, session).await;
        self.groups.session_count(room).await
    }

    /// Notify the remaining sessions that a member left.
    ///
    /// Returns the number of sessions the notification reached.
    pub async fn broadcast_member_left(&self, room: &RoomName, message: &str) -> usize {
        self.groups
            .group_send(room, None, Payload::Text(message.to_string()))
            .await
    }
}
