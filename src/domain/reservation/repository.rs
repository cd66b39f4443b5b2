//! Reservation repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{Reservation, ReservationDraft, ReservationStatus};
use crate::domain::DomainResult;

/// Filter for reservation listings
#[derive(Debug, Clone, Default)]
pub struct ReservationFilter {
    /// Status equality
    pub status: Option<ReservationStatus>,
    /// Room ID equality
    pub room_id: Option<i32>,
    /// Owner ID equality
    pub user_id: Option<String>,
    /// Date containment: check_in >= from
    pub from: Option<DateTime<Utc>>,
    /// Date containment: check_out <= to
    pub to: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Admit a new reservation: re-check availability for the draft's room
    /// and date range and insert it in status `Pending`, all in one atomic
    /// unit against the datastore. Under concurrent colliding admissions at
    /// most one call succeeds; the rest fail with `RoomNotAvailable`.
    async fn admit(&self, draft: ReservationDraft) -> DomainResult<Reservation>;

    /// Apply a lifecycle transition atomically. The current status is read
    /// fresh inside the same unit of work, validated against the transition
    /// table, and the room occupancy side effect (check-in occupies, check-out
    /// or cancel-from-checked-in frees) is applied in the same transaction.
    async fn transition(&self, id: i32, target: ReservationStatus)
        -> DomainResult<Reservation>;

    /// Find reservation by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>>;

    /// All live reservations for a room (the competing set for admission)
    async fn find_live_for_room(&self, room_id: i32) -> DomainResult<Vec<Reservation>>;

    /// Filtered page of reservations plus the total match count
    async fn find_page(
        &self,
        filter: &ReservationFilter,
        page: u64,
        limit: u64,
    ) -> DomainResult<(Vec<Reservation>, u64)>;

    /// Number of live reservations for a room (blocks room deletion)
    async fn count_live_for_room(&self, room_id: i32) -> DomainResult<u64>;

    /// Number of reservations in a given status
    async fn count_by_status(&self, status: ReservationStatus) -> DomainResult<u64>;

    /// Number of live reservations whose check-in falls in `[from, to)`
    async fn count_arrivals_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<u64>;
}
