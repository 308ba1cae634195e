//! Domain entities: rooms and their persisted messages.

use serde::Deserialize;

use super::value_object::{MessageBody, RoomName, Timestamp, UserId};

/// Kind of room, mirroring the two conversation shapes the service knows.
/// Clients pick one via the `kind` query parameter at upgrade time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomKind {
    Chat,
    Group,
}

impl RoomKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Group => "group",
        }
    }
}

/// One persisted chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub sender: UserId,
    pub body: MessageBody,
    pub sent_at: Timestamp,
}

impl StoredMessage {
    pub fn new(sender: UserId, body: MessageBody, sent_at: Timestamp) -> Self {
        Self {
            sender,
            body,
            sent_at,
        }
    }
}

/// A named room: membership plus append-only message history.
///
/// Rooms are created lazily, the first time a client joins or writes to the
/// name. Membership is recorded per user and survives disconnects; live
/// presence is tracked separately by the group channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: RoomName,
    pub kind: RoomKind,
    pub created_at: Timestamp,
    pub members: Vec<UserId>,
    pub messages: Vec<StoredMessage>,
}

impl Room {
    pub fn new(name: RoomName, kind: RoomKind, created_at: Timestamp) -> Self {
        Self {
            name,
            kind,
            created_at,
            members: Vec::new(),
            messages: Vec::new(),
        }
    }

    /// Record a member. Idempotent; returns `true` if the user was new.
    pub fn add_member(&mut self, user: UserId) -> bool {
        if self.members.contains(&user) {
            return false;
        }
        self.members.push(user);
        true
    }

    /// Append a message to the room's history
    pub fn record_message(&mut self, message: StoredMessage) {
        self.messages.push(message);
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_room() -> Room {
        Room::new(
            RoomName::new("lobby".to_string()).unwrap(),
            RoomKind::Chat,
            Timestamp::new(1000),
        )
    }

    #[test]
    fn test_new_room_is_empty() {
        // Test item: a fresh room has no members and no messages
        let room = test_room();
        assert_eq!(room.member_count(), 0);
        assert_eq!(room.message_count(), 0);
        assert_eq!(room.kind, RoomKind::Chat);
    }

    #[test]
    fn test_add_member_is_idempotent() {
        // Test item: adding the same user twice records a single member
        // given:
        let mut room = test_room();
        let alice = UserId::new("alice".to_string()).unwrap();

        // when:
        let first = room.add_member(alice.clone());
        let second = room.add_member(alice.clone());

        // then:
        assert!(first);
        assert!(!second);
        assert_eq!(room.members, vec![alice]);
    }

    #[test]
    fn test_members_keep_insertion_order() {
        // Test item: members are listed in join order
        let mut room = test_room();
        let bob = UserId::new("bob".to_string()).unwrap();
        let alice = UserId::new("alice".to_string()).unwrap();

        room.add_member(bob.clone());
        room.add_member(alice.clone());

        assert_eq!(room.members, vec![bob, alice]);
    }

    #[test]
    fn test_record_message_appends() {
        // Test item: messages accumulate in send order
        let mut room = test_room();
        let alice = UserId::new("alice".to_string()).unwrap();

        room.record_message(StoredMessage::new(
            alice.clone(),
            MessageBody::text("first".to_string()).unwrap(),
            Timestamp::new(1),
        ));
        room.record_message(StoredMessage::new(
            alice.clone(),
            MessageBody::text("second".to_string()).unwrap(),
            Timestamp::new(2),
        ));

        assert_eq!(room.message_count(), 2);
        assert_eq!(room.messages[0].body.as_text(), Some("first"));
        assert_eq!(room.messages[1].body.as_text(), Some("second"));
    }

    #[test]
    fn test_room_kind_as_str() {
        assert_eq!(RoomKind::Chat.as_str(), "chat");
        assert_eq!(RoomKind::Group.as_str(), "group");
    }

    #[test]
    fn test_room_kind_deserializes_lowercase() {
        // Test item: the wire spelling of each kind parses back
        assert_eq!(
            serde_json::from_str::<RoomKind>("\"chat\"").unwrap(),
            RoomKind::Chat
        );
        assert_eq!(
            serde_json::from_str::<RoomKind>("\"group\"").unwrap(),
            RoomKind::Group
        );
    }
}
