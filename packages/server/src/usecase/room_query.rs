//! UseCase: querying rooms for the HTTP surface.

use std::sync::Arc;

use crate::domain::{Room, RoomName, RoomStore};

use super::error::RoomQueryError;

pub struct RoomQueryUseCase {
    store: Arc<dyn RoomStore>,
}

impl RoomQueryUseCase {
    pub fn new(store: Arc<dyn RoomStore>) -> Self {
        Self { store }
    }

    /// Snapshots of all known rooms, sorted by name
    pub async fn list(&self) -> Vec<Room> {
        let mut rooms = self.store.list_rooms().await;
        rooms.sort_by(|a, b| a.name.cmp(&b.name));
        rooms
    }

    /// Snapshot of one room
    pub async fn detail(&self, name: &RoomName) -> Result<Room, RoomQueryError> {
        self.store
            .get_room(name)
            .await
            .map_err(|_| RoomQueryError::RoomNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomKind;
    use crate::infrastructure::InMemoryRoomStore;
    use campfire_shared::time::FixedClock;

    fn create_test_store() -> Arc<InMemoryRoomStore> {
        Arc::new(InMemoryRoomStore::new(Arc::new(FixedClock::new(
            1_700_000_000_000,
        ))))
    }

    fn room(name: &str) -> RoomName {
        RoomName::new(name.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_list_returns_rooms_sorted_by_name() {
        // Test item: the listing is sorted by room name
        // given:
        let store = create_test_store();
        store.find_or_create(&room("zulu"), RoomKind::Chat).await;
        store.find_or_create(&room("alpha"), RoomKind::Chat).await;
        let usecase = RoomQueryUseCase::new(store);

        // when:
        let rooms = usecase.list().await;

        // then:
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].name.as_str(), "alpha");
        assert_eq!(rooms[1].name.as_str(), "zulu");
    }

    #[tokio::test]
    async fn test_detail_of_unknown_room_is_not_found() {
        // Test item: an unknown room maps to RoomNotFound
        let usecase = RoomQueryUseCase::new(create_test_store());
        let result = usecase.detail(&room("ghost")).await;
        assert_eq!(result, Err(RoomQueryError::RoomNotFound));
    }

    #[tokio::test]
    async fn test_detail_returns_snapshot() {
        // Test item: detail returns the room as stored
        // given:
        let store = create_test_store();
        store.find_or_create(&room("lobby"), RoomKind::Group).await;
        let usecase = RoomQueryUseCase::new(store);

        // when:
        let snapshot = usecase.detail(&room("lobby")).await.unwrap();

        // then:
        assert_eq!(snapshot.name.as_str(), "lobby");
        assert_eq!(snapshot.kind, RoomKind::Group);
    }
}
