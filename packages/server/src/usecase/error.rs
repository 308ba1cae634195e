//! Error types for the usecase layer.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JoinRoomError {
    #[error("failed to record membership in room '{0}'")]
    MembershipNotRecorded(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    #[error("failed to persist message in room '{0}'")]
    PersistFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomQueryError {
    #[error("room not found")]
    RoomNotFound,
}
