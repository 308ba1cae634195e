//! UseCase: joining a room.
//!
//! Resolves the room (creating it lazily), records the user's membership,
//! and subscribes the session to the room's group.

use std::sync::Arc;

use campfire_shared::time::get_utc_timestamp;

use crate::domain::{
    GroupChannel, GroupSender, Payload, RoomKind, RoomName, RoomStore, SessionId, Timestamp, UserId,
};

use super::error::JoinRoomError;

pub struct JoinRoomUseCase {
    store: Arc<dyn RoomStore>,
    groups: Arc<dyn GroupChannel>,
}

impl JoinRoomUseCase {
    pub fn new(store: Arc<dyn RoomStore>, groups: Arc<dyn GroupChannel>) -> Self {
        Self { store, groups }
    }

    /// Join a session to a room.
    ///
    /// # Arguments
    ///
    /// * `room` - room name from the upgrade URL
    /// * `kind` - kind to use if the room has to be created
    /// * `user` - authenticated user
    /// * `session` - id of this connection
    /// * `sender` - outbound channel for this connection
    ///
    /// # Returns
    ///
    /// The join time and the room's recorded members, sorted by user id.
    pub async fn execute(
        &self,
        room: &RoomName,
        kind: RoomKind,
        user: &UserId,
        session: SessionId,
        sender: GroupSender,
    ) -> Result<(Timestamp, Vec<UserId>), JoinRoomError> {
        // 1. Resolve the room, creating it on first contact
        self.store.find_or_create(room, kind).await;

        // 2. Record membership (kept after disconnect)
        self.store
            .add_member(room, user)
            .await
            .map_err(|_| JoinRoomError::MembershipNotRecorded(room.as_str().to_string()))?;

        // 3. Subscribe the session to the group
        self.groups.group_add(room, session, sender).await;

        let joined_at = Timestamp::new(get_utc_timestamp());
        let members = self.member_list(room).await;
        Ok((joined_at, members))
    }

    /// Recorded members of the room, sorted by user id for consistent ordering
    async fn member_list(&self, room: &RoomName) -> Vec<UserId> {
        let mut members = self.store.members(room).await.unwrap_or_default();
        members.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        members
    }

    /// Notify the rest of the group that a member joined.
    ///
    /// Returns the number of sessions the notification reached.
    pub async fn broadcast_member_joined(
        &self,
        room: &RoomName,
        joined_session: SessionId,
        message: &str,
    ) -> usize {
        self.groups
            .group_send(room, Some(joined_session), Payload::Text(message.to_string()))
            .await
    }
}
