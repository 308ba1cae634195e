//! Infrastructure layer: concrete implementations of the domain interfaces
//! plus the DTOs spoken on the wire.

pub mod auth;
pub mod dto;
pub mod group;
pub mod store;

pub use auth::JwtTokenVerifier;
pub use group::InMemoryGroupChannel;
pub use store::InMemoryRoomStore;
