//! Group channel interface: the runtime set of live sessions per room name.
//!
//! This mirrors the group-messaging primitive of a channel layer
//! (add-to-group, discard-from-group, group-send). The in-process
//! implementation lives in the infrastructure layer; a distributed layer
//! could implement the same trait.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{RoomName, SessionId};

/// One outbound delivery: either a JSON text frame or raw media bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Binary(Vec<u8>),
}

/// Sending half of a session's outbound channel.
///
/// The WebSocket handler owns the receiving half and pushes every payload
/// it gets onto the socket.
pub type GroupSender = mpsc::UnboundedSender<Payload>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupChannel: Send + Sync {
    /// Subscribe a session to a room name
    async fn group_add(&self, room: &RoomName, session: SessionId, sender: GroupSender);

    /// Remove a session from a room. Idempotent.
    async fn group_discard(&self, room: &RoomName, session: SessionId);

    /// Deliver a payload to every session in the room except `exclude`.
    ///
    /// A failed delivery to one session must not affect the others; the
    /// number of successful deliveries is returned.
    async fn group_send(
        &self,
        room: &RoomName,
        exclude: Option<SessionId>,
        payload: Payload,
    ) -> usize;

    /// Number of live sessions currently subscribed to the room
    async fn session_count(&self, room: &RoomName) -> usize;
}
