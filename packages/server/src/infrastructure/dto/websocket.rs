//! JSON frames exchanged over the WebSocket connection.
//!
//! Inbound text frames carry the message content verbatim; everything the
//! server sends is one of the typed frames below. Media messages travel as
//! raw binary frames and have no JSON envelope.

use serde::{Deserialize, Serialize};

/// Discriminator for server-sent frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameType {
    RoomJoined,
    Chat,
    MemberJoined,
    MemberLeft,
}

/// First frame sent to a client after a successful join
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomJoinedFrame {
    pub r#type: FrameType,
    pub room: String,
    /// Recorded members of the room, sorted by user id
    pub members: Vec<String>,
    pub joined_at: i64,
}

/// A relayed chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatFrame {
    pub r#type: FrameType,
    pub room: String,
    pub sender: String,
    pub content: String,
    pub sent_at: i64,
}

/// Notification that another user joined the room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberJoinedFrame {
    pub r#type: FrameType,
    pub room: String,
    pub user: String,
    pub joined_at: i64,
}

/// Notification that a session left the room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberLeftFrame {
    pub r#type: FrameType,
    pub room: String,
    pub user: String,
    pub left_at: i64,
}
