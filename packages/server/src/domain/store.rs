//! Persistence interface the relay depends on.
//!
//! The usecase layer talks to rooms only through this trait; the concrete
//! implementation lives in the infrastructure layer (dependency inversion).

use async_trait::async_trait;

use super::{Room, RoomKind, RoomName, StoredMessage, UserId};

/// Errors returned by a [`RoomStore`] implementation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("room '{0}' not found")]
    RoomNotFound(String),
}

/// Room persistence as seen by the relay.
///
/// `find_or_create` is the only way a room comes into existence: rooms are
/// created lazily under whatever name a client first joins or writes to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Resolve a room by name, creating it if it does not exist yet.
    /// Returns a snapshot of the room.
    async fn find_or_create(&self, name: &RoomName, kind: RoomKind) -> Room;

    /// Record a user as a member of the room. Idempotent.
    async fn add_member(&self, name: &RoomName, user: &UserId) -> Result<(), StoreError>;

    /// Append a message to the room's history
    async fn append_message(
        &self,
        name: &RoomName,
        message: StoredMessage,
    ) -> Result<(), StoreError>;

    /// List the recorded members of a room
    async fn members(&self, name: &RoomName) -> Result<Vec<UserId>, StoreError>;

    /// Get a snapshot of a single room
    async fn get_room(&self, name: &RoomName) -> Result<Room, StoreError>;

    /// Snapshots of all known rooms
    async fn list_rooms(&self) -> Vec<Room>;
}
