//! Conversion logic between DTOs and domain entities.

use campfire_shared::time::timestamp_to_rfc3339;

use crate::domain::Room;
use crate::infrastructure::dto::http as dto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<Room> for dto::RoomSummaryDto {
    fn from(room: Room) -> Self {
        Self {
            name: room.name.as_str().to_string(),
            kind: room.kind.as_str().to_string(),
            members: room.members.iter().map(|m| m.as_str().to_string()).collect(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}

impl From<Room> for dto::RoomDetailDto {
    fn from(room: Room) -> Self {
        Self {
            name: room.name.as_str().to_string(),
            kind: room.kind.as_str().to_string(),
            members: room.members.iter().map(|m| m.as_str().to_string()).collect(),
            message_count: room.message_count(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}
