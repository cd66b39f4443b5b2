//! Room repository interface

use async_trait::async_trait;

use super::model::{Room, RoomDraft, RoomStatus};
use crate::domain::DomainResult;

/// Filter for room listings
#[derive(Debug, Clone, Default)]
pub struct RoomFilter {
    pub status: Option<RoomStatus>,
    pub room_type: Option<String>,
}

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Insert a new room and return it with its assigned ID
    async fn save(&self, draft: RoomDraft) -> DomainResult<Room>;

    /// Update an existing room
    async fn update(&self, room: Room) -> DomainResult<()>;

    /// Delete a room by ID
    async fn delete(&self, id: i32) -> DomainResult<()>;

    /// Find room by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>>;

    /// Find room by its guest-facing number
    async fn find_by_number(&self, number: &str) -> DomainResult<Option<Room>>;

    /// Filtered page of rooms plus the total match count
    async fn find_page(
        &self,
        filter: &RoomFilter,
        page: u64,
        limit: u64,
    ) -> DomainResult<(Vec<Room>, u64)>;

    /// Number of rooms in a given status
    async fn count_by_status(&self, status: RoomStatus) -> DomainResult<u64>;
}
