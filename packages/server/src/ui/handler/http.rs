//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::RoomName,
    infrastructure::dto::http::{RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.room_query_usecase.list().await;
    let summaries: Vec<RoomSummaryDto> = rooms.into_iter().map(Into::into).collect();
    Json(summaries)
}

/// Get room detail by name
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let name = RoomName::try_from(name).map_err(|_| StatusCode::BAD_REQUEST)?;
    match state.room_query_usecase.detail(&name).await {
        Ok(room) => Ok(Json(room.into())),
        Err(crate::usecase::RoomQueryError::RoomNotFound) => Err(StatusCode::NOT_FOUND),
    }
}
