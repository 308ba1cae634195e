//! In-memory room store implementation.
//!
//! Holds the Room domain models directly in a map keyed by room name. A
//! database-backed implementation would add a row/DTO conversion layer on
//! top of the same trait.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use campfire_shared::time::Clock;

use crate::domain::{Room, RoomKind, RoomName, RoomStore, StoreError, StoredMessage, Timestamp, UserId};

/// In-memory [`RoomStore`] keyed by room name
pub struct InMemoryRoomStore {
    rooms: Mutex<HashMap<RoomName, Room>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRoomStore {
    /// Create an empty store; `clock` stamps room creation times
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            clock,
        }
    }
}

#[async_trait]
impl RoomStore for InMemoryRoomStore {
    async fn find_or_create(&self, name: &RoomName, kind: RoomKind) -> Room {
        let mut rooms = self.rooms.lock().await;
        rooms
            .entry(name.clone())
            .or_insert_with(|| {
                tracing::info!("Room '{}' created ({})", name, kind.as_str());
                Room::new(
                    name.clone(),
                    kind,
                    Timestamp::new(self.clock.now_utc_millis()),
                )
            })
            .clone()
    }

    async fn add_member(&self, name: &RoomName, user: &UserId) -> Result<(), StoreError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(name)
            .ok_or_else(|| StoreError::RoomNotFound(name.as_str().to_string()))?;
        if room.add_member(user.clone()) {
            tracing::debug!("User '{}' recorded as member of '{}'", user, name);
        }
        Ok(())
    }

    async fn append_message(
        &self,
        name: &RoomName,
        message: StoredMessage,
    ) -> Result<(), StoreError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(name)
            .ok_or_else(|| StoreError::RoomNotFound(name.as_str().to_string()))?;
        room.record_message(message);
        Ok(())
    }

    async fn members(&self, name: &RoomName) -> Result<Vec<UserId>, StoreError> {
        let rooms = self.rooms.lock().await;
        let room = rooms
            .get(name)
            .ok_or_else(|| StoreError::RoomNotFound(name.as_str().to_string()))?;
        Ok(room.members.clone())
    }

    async fn get_room(&self, name: &RoomName) -> Result<Room, StoreError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::RoomNotFound(name.as_str().to_string()))
    }

    async fn list_rooms(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        rooms.values().cloned().collect()
    }
}
