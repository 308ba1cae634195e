//! In-process group channel implementation.
//!
//! Keeps a map of room name to the live sessions subscribed to it, each with
//! the sending half of its outbound channel. Socket writes happen in the
//! per-connection pusher task, so delivery here is just a channel send.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{GroupChannel, GroupSender, Payload, RoomName, SessionId};

/// Single-node [`GroupChannel`] over an in-memory session map
#[derive(Default)]
pub struct InMemoryGroupChannel {
    /// Live sessions per room name
    groups: Mutex<HashMap<RoomName, HashMap<SessionId, GroupSender>>>,
}

impl InMemoryGroupChannel {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GroupChannel for InMemoryGroupChannel {
    async fn group_add(&self, room: &RoomName, session: SessionId, sender: GroupSender) {
        let mut groups = self.groups.lock().await;
        groups
            .entry(room.clone())
            .or_default()
            .insert(session, sender);
        tracing::debug!("Session '{}' added to group '{}'", session, room);
    }

    async fn group_discard(&self, room: &RoomName, session: SessionId) {
        let mut groups = self.groups.lock().await;
        if let Some(sessions) = groups.get_mut(room) {
            sessions.remove(&session);
            if sessions.is_empty() {
                groups.remove(room);
            }
            tracing::debug!("Session '{}' discarded from group '{}'", session, room);
        }
    }

    async fn group_send(
        &self,
        room: &RoomName,
        exclude: Option<SessionId>,
        payload: Payload,
    ) -> usize {
        let groups = self.groups.lock().await;
        let Some(sessions) = groups.get(room) else {
            return 0;
        };

        let mut delivered = 0;
        for (session, sender) in sessions {
            if Some(*session) == exclude {
                continue;
            }
            // A send only fails when the receiving task is gone; tolerate it
            // and keep delivering to the rest of the group.
            if let Err(e) = sender.send(payload.clone()) {
                tracing::warn!(
                    "Failed to deliver to session '{}' in group '{}': {}",
                    session,
                    room,
                    e
                );
            } else {
                delivered += 1;
            }
        }

        delivered
    }

    async fn session_count(&self, room: &RoomName) -> usize {
        let groups = self.groups.lock().await;
        groups.get(room).map_or(0, HashMap::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn room(name: &str) -> RoomName {
        RoomName::new(name.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_group_add_and_count() {
        // Test item: added sessions are counted per room
        // given:
        let channel = InMemoryGroupChannel::new();
        let lobby = room("lobby");
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        // when:
        channel.group_add(&lobby, SessionId::generate(), tx1).await;
        channel.group_add(&lobby, SessionId::generate(), tx2).await;

        // then:
        assert_eq!(channel.session_count(&lobby).await, 2);
        assert_eq!(channel.session_count(&room("other")).await, 0);
    }

    #[tokio::test]
    async fn test_group_send_reaches_all_sessions() {
        // Test item: a payload with no exclusion reaches every session
        // given:
        let channel = InMemoryGroupChannel::new();
        let lobby = room("lobby");
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        channel.group_add(&lobby, SessionId::generate(), tx1).await;
        channel.group_add(&lobby, SessionId::generate(), tx2).await;

        // when:
        let delivered = channel
            .group_send(&lobby, None, Payload::Text("hi".to_string()))
            .await;

        // then:
        assert_eq!(delivered, 2);
        assert_eq!(rx1.recv().await, Some(Payload::Text("hi".to_string())));
        assert_eq!(rx2.recv().await, Some(Payload::Text("hi".to_string())));
    }

    #[tokio::test]
    async fn test_group_send_excludes_sender_session() {
        // Test item: the excluded session receives nothing
        // given:
        let channel = InMemoryGroupChannel::new();
        let lobby = room("lobby");
        let alice = SessionId::generate();
        let bob = SessionId::generate();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        channel.group_add(&lobby, alice, tx1).await;
        channel.group_add(&lobby, bob, tx2).await;

        // when:
        let delivered = channel
            .group_send(&lobby, Some(alice), Payload::Text("hi".to_string()))
            .await;

        // then:
        assert_eq!(delivered, 1);
        assert_eq!(rx2.recv().await, Some(Payload::Text("hi".to_string())));
        assert!(rx1.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_group_send_tolerates_closed_receiver() {
        // Test item: one dead session does not block delivery to the rest
        // given:
        let channel = InMemoryGroupChannel::new();
        let lobby = room("lobby");
        let (tx1, rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        channel.group_add(&lobby, SessionId::generate(), tx1).await;
        channel.group_add(&lobby, SessionId::generate(), tx2).await;
        drop(rx1);

        // when:
        let delivered = channel
            .group_send(&lobby, None, Payload::Text("hi".to_string()))
            .await;

        // then:
        assert_eq!(delivered, 1);
        assert_eq!(rx2.recv().await, Some(Payload::Text("hi".to_string())));
    }

    #[tokio::test]
    async fn test_group_send_to_unknown_room_delivers_nothing() {
        // Test item: sending to a room with no sessions is a no-op
        let channel = InMemoryGroupChannel::new();
        let delivered = channel
            .group_send(&room("empty"), None, Payload::Text("hi".to_string()))
            .await;
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn test_group_discard_is_idempotent_and_drops_empty_groups() {
        // Test item: discarding twice is harmless and empty groups vanish
        // given:
        let channel = InMemoryGroupChannel::new();
        let lobby = room("lobby");
        let session = SessionId::generate();
        let (tx, _rx) = mpsc::unbounded_channel();
        channel.group_add(&lobby, session, tx).await;

        // when:
        channel.group_discard(&lobby, session).await;
        channel.group_discard(&lobby, session).await;

        // then:
        assert_eq!(channel.session_count(&lobby).await, 0);
    }

    #[tokio::test]
    async fn test_binary_payload_roundtrip() {
        // Test item: binary payloads are delivered byte-for-byte
        // given:
        let channel = InMemoryGroupChannel::new();
        let lobby = room("lobby");
        let (tx, mut rx) = mpsc::unbounded_channel();
        channel.group_add(&lobby, SessionId::generate(), tx).await;

        // when:
        let delivered = channel
            .group_send(&lobby, None, Payload::Binary(vec![0xde, 0xad]))
            .await;

        // then:
        assert_eq!(delivered, 1);
        assert_eq!(rx.recv().await, Some(Payload::Binary(vec![0xde, 0xad])));
    }
}
