//! DTOs for the HTTP query surface.

use serde::{Deserialize, Serialize};

/// Room entry in the `/api/rooms` listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub name: String,
    pub kind: String,
    pub members: Vec<String>,
    pub created_at: String,
}

/// Response for `/api/rooms/{name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub name: String,
    pub kind: String,
    pub members: Vec<String>,
    pub message_count: usize,
    pub created_at: String,
}
