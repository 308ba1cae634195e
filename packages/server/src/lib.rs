//! Token-authenticated WebSocket chat relay.
//!
//! Clients present a bearer token at upgrade time, join a named room, and
//! exchange messages that are persisted write-through and fanned out to every
//! other member of the room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
