//! UseCase: relaying one inbound message.
//!
//! Write-through: the message is appended to the room's history first; only
//! then is it fanned out to the other sessions in the group. A persistence
//! failure aborts the fan-out.

use std::sync::Arc;

use crate::domain::{
    GroupChannel, MessageBody, Payload, RoomKind, RoomName, RoomStore, SessionId, StoredMessage,
    Timestamp, UserId,
};

use super::error::RelayError;

pub struct RelayMessageUseCase {
    store: Arc<dyn RoomStore>,
    groups: Arc<dyn GroupChannel>,
}

impl RelayMessageUseCase {
    pub fn new(store: Arc<dyn RoomStore>, groups: Arc<dyn GroupChannel>) -> Self {
        Self { store, groups }
    }

    /// Persist and fan out one message.
    ///
    /// # Arguments
    ///
    /// * `room` - room the message was sent to
    /// * `kind` - kind to use if the room has to be created
    /// * `sender_session` - session the message arrived on (excluded from
    ///   the fan-out)
    /// * `from` - authenticated sender
    /// * `body` - validated message body to persist
    /// * `sent_at` - send time; the same value the caller put on the wire
    /// * `payload` - wire payload to deliver (JSON chat frame or raw bytes)
    ///
    /// # Returns
    ///
    /// The number of sessions the message was delivered to.
    pub async fn execute(
        &self,
        room: &RoomName,
        kind: RoomKind,
        sender_session: SessionId,
        from: UserId,
        body: MessageBody,
        sent_at: Timestamp,
        payload: Payload,
    ) -> Result<usize, RelayError> {
        // 1. Resolve the room; a write to an unseen name creates it
        self.store.find_or_create(room, kind).await;

        // 2. Append to the history before any delivery
        self.store
            .append_message(room, StoredMessage::new(from, body, sent_at))
            .await
            .map_err(|_| RelayError::PersistFailed(room.as_str().to_string()))?;

        // 3. Fan out to every other session in the group
        let delivered = self
            .groups
            .group_send(room, Some(sender_session), payload)
            .await;

        Ok(delivered)
    }
}
