//! Room catalog business logic service

use std::sync::Arc;

use tracing::info;

use crate::domain::room::{Room, RoomDraft, RoomFilter, RoomStatus};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::{validate_pagination, PaginatedResult};

/// Service for room catalog operations. Mutations are admin-gated at the
/// transport layer; listings are open to any authenticated user.
pub struct RoomService {
    repos: Arc<dyn RepositoryProvider>,
}

impl RoomService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create_room(&self, draft: RoomDraft) -> DomainResult<Room> {
        if let Some(existing) = self.repos.rooms().find_by_number(&draft.number).await? {
            return Err(DomainError::Conflict(format!(
                "Room number {} already exists (id {})",
                existing.number, existing.id
            )));
        }

        let room = self.repos.rooms().save(draft).await?;
        info!(room_id = room.id, number = %room.number, "Room created");
        Ok(room)
    }

    pub async fn get_room(&self, id: i32) -> DomainResult<Room> {
        self.repos
            .rooms()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::RoomNotFound(id))
    }

    pub async fn list_rooms(
        &self,
        filter: RoomFilter,
        page: u64,
        limit: u64,
    ) -> DomainResult<PaginatedResult<Room>> {
        let (page, limit) = validate_pagination(Some(page), Some(limit));
        let (items, total) = self.repos.rooms().find_page(&filter, page, limit).await?;
        Ok(PaginatedResult::new(items, total, page, limit))
    }

    pub async fn update_room(
        &self,
        id: i32,
        number: String,
        room_type: String,
        price_cents: i64,
    ) -> DomainResult<Room> {
        let mut room = self.get_room(id).await?;

        if room.number != number {
            if let Some(other) = self.repos.rooms().find_by_number(&number).await? {
                if other.id != id {
                    return Err(DomainError::Conflict(format!(
                        "Room number {} already exists (id {})",
                        number, other.id
                    )));
                }
            }
        }

        room.number = number;
        room.room_type = room_type;
        room.price_cents = price_cents;
        self.repos.rooms().update(room.clone()).await?;
        Ok(room)
    }

    /// Flip a room in or out of service. Taking an occupied room into
    /// maintenance is allowed; the active stay finishes normally and checkout
    /// restores Available.
    pub async fn set_room_status(&self, id: i32, status: RoomStatus) -> DomainResult<Room> {
        let mut room = self.get_room(id).await?;
        room.status = status;
        self.repos.rooms().update(room.clone()).await?;
        info!(room_id = id, status = %status, "Room status changed");
        Ok(room)
    }

    /// Delete a room. Refused while any live reservation references it.
    pub async fn delete_room(&self, id: i32) -> DomainResult<()> {
        // ensure a RoomNotFound beats the conflict check for unknown ids
        self.get_room(id).await?;

        let live = self.repos.reservations().count_live_for_room(id).await?;
        if live > 0 {
            return Err(DomainError::Conflict(format!(
                "Room {} has {} live reservation(s)",
                id, live
            )));
        }

        self.repos.rooms().delete(id).await?;
        info!(room_id = id, "Room deleted");
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    fn draft(number: &str) -> RoomDraft {
        RoomDraft {
            number: number.into(),
            room_type: "double".into(),
            price_cents: 12_000,
            status: RoomStatus::Available,
        }
    }

    fn service() -> RoomService {
        RoomService::new(Arc::new(InMemoryRepositoryProvider::new()))
    }

    #[tokio::test]
    async fn create_and_fetch_room() {
        let svc = service();
        let room = svc.create_room(draft("101")).await.unwrap();
        let fetched = svc.get_room(room.id).await.unwrap();
        assert_eq!(fetched.number, "101");
        assert_eq!(fetched.status, RoomStatus::Available);
    }

    #[tokio::test]
    async fn duplicate_room_number_is_a_conflict() {
        let svc = service();
        svc.create_room(draft("101")).await.unwrap();
        let err = svc.create_room(draft("101")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn unknown_room_is_not_found() {
        let svc = service();
        assert_eq!(
            svc.get_room(42).await.unwrap_err(),
            DomainError::RoomNotFound(42)
        );
        assert_eq!(
            svc.delete_room(42).await.unwrap_err(),
            DomainError::RoomNotFound(42)
        );
    }

    #[tokio::test]
    async fn update_rejects_stealing_another_rooms_number() {
        let svc = service();
        svc.create_room(draft("101")).await.unwrap();
        let second = svc.create_room(draft("102")).await.unwrap();

        let err = svc
            .update_room(second.id, "101".into(), "suite".into(), 20_000)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // keeping its own number is fine
        let updated = svc
            .update_room(second.id, "102".into(), "suite".into(), 20_000)
            .await
            .unwrap();
        assert_eq!(updated.room_type, "suite");
    }

    #[tokio::test]
    async fn delete_is_refused_while_reservations_are_live() {
        use crate::domain::reservation::ReservationDraft;
        use chrono::{TimeZone, Utc};

        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let svc = RoomService::new(repos.clone());
        let room = svc.create_room(draft("101")).await.unwrap();

        let day = |d: u32| Utc.with_ymd_and_hms(2024, 6, d, 12, 0, 0).unwrap();
        let res = repos
            .reservations()
            .admit(ReservationDraft {
                user_id: "u1".into(),
                room_id: room.id,
                check_in: day(15),
                check_out: day(20),
                created_at: day(1),
            })
            .await
            .unwrap();

        let err = svc.delete_room(room.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // once the reservation dies, deletion goes through
        repos
            .reservations()
            .transition(res.id, crate::domain::ReservationStatus::Cancelled)
            .await
            .unwrap();
        svc.delete_room(room.id).await.unwrap();
    }

    #[tokio::test]
    async fn list_rooms_filters_by_status() {
        let svc = service();
        svc.create_room(draft("101")).await.unwrap();
        let r2 = svc.create_room(draft("102")).await.unwrap();
        svc.set_room_status(r2.id, RoomStatus::Maintenance)
            .await
            .unwrap();

        let filter = RoomFilter {
            status: Some(RoomStatus::Available),
            ..Default::default()
        };
        let page = svc.list_rooms(filter, 1, 50).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].number, "101");
    }
}
