//! UseCase layer: the relay's operations, one type per operation.

mod error;
mod join_room;
mod leave_room;
mod relay_message;
mod room_query;

pub use error::{JoinRoomError, RelayError, RoomQueryError};
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use relay_message::RelayMessageUseCase;
pub use room_query::RoomQueryUseCase;
