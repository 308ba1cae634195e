//! Domain layer: value objects, entities, and the interfaces the usecase
//! layer depends on. Concrete implementations live in the infrastructure
//! layer (dependency inversion).

mod auth;
mod entity;
mod group;
mod store;
mod value_object;

pub use auth::{AccessClaims, AuthError, TokenVerifier};
pub use entity::{Room, RoomKind, StoredMessage};
pub use group::{GroupChannel, GroupSender, Payload};
pub use store::{RoomStore, StoreError};
pub use value_object::{
    DomainError, MessageBody, RoomName, SessionId, Timestamp, UserId, MAX_MEDIA_BYTES,
    MAX_TEXT_CHARS,
};

#[cfg(test)]
pub use group::MockGroupChannel;
#[cfg(test)]
pub use store::MockRoomStore;
