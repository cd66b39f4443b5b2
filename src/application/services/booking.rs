//! Booking business logic service
//!
//! Front door of the reservation engine: validates input against the injected
//! clock, enforces the per-operation capability rules, and hands the atomic
//! work (admission, lifecycle transitions) to the repository layer. Guests act
//! on their own reservations; admins drive the lifecycle for everyone.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::clock::Clock;
use crate::domain::reservation::{
    Reservation, ReservationDraft, ReservationFilter, ReservationStatus,
};
use crate::domain::user::Actor;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::{validate_pagination, PaginatedResult};

/// Service for reservation admission and lifecycle operations
pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    clock: Arc<dyn Clock>,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, clock: Arc<dyn Clock>) -> Self {
        Self { repos, clock }
    }

    /// Input validation performed before any datastore interaction.
    fn validate_range(
        &self,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> DomainResult<()> {
        if check_out <= check_in {
            return Err(DomainError::InvalidRange {
                reason: "check-out must be after check-in".to_string(),
            });
        }
        if check_in < self.clock.now() {
            return Err(DomainError::InvalidRange {
                reason: "check-in must not be in the past".to_string(),
            });
        }
        Ok(())
    }

    fn authorize_owner_or_admin(&self, actor: &Actor, r: &Reservation) -> DomainResult<()> {
        if actor.is_admin() || r.user_id == actor.id {
            Ok(())
        } else {
            Err(DomainError::UnauthorizedAccess {
                requester_id: actor.id.clone(),
                reservation_id: r.id,
            })
        }
    }

    fn require_admin(&self, actor: &Actor, reservation_id: i32) -> DomainResult<()> {
        if actor.is_admin() {
            Ok(())
        } else {
            Err(DomainError::UnauthorizedAccess {
                requester_id: actor.id.clone(),
                reservation_id,
            })
        }
    }

    /// Availability probe for a room over `[check_in, check_out)`.
    ///
    /// Advisory only: creation re-runs this check inside the admission
    /// transaction, so a `true` here can still lose the race.
    pub async fn is_room_available(
        &self,
        room_id: i32,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> DomainResult<bool> {
        self.validate_range(check_in, check_out)?;

        let room = self
            .repos
            .rooms()
            .find_by_id(room_id)
            .await?
            .ok_or(DomainError::RoomNotFound(room_id))?;

        if !room.status.is_allocatable() {
            return Ok(false);
        }

        let live = self.repos.reservations().find_live_for_room(room_id).await?;
        Ok(crate::domain::is_room_available(
            &room, &live, check_in, check_out,
        ))
    }

    /// Create a reservation; the requester becomes its owner.
    pub async fn create_reservation(
        &self,
        actor: &Actor,
        room_id: i32,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> DomainResult<Reservation> {
        self.validate_range(check_in, check_out)?;

        let draft = ReservationDraft {
            user_id: actor.id.clone(),
            room_id,
            check_in,
            check_out,
            created_at: self.clock.now(),
        };
        let reservation = self.repos.reservations().admit(draft).await?;

        info!(
            reservation_id = reservation.id,
            room_id,
            user_id = %actor.id,
            "Reservation created"
        );
        Ok(reservation)
    }

    /// List reservations. Guests only ever see their own; admins see all and
    /// may filter by any owner ID.
    pub async fn list_reservations(
        &self,
        actor: &Actor,
        mut filter: ReservationFilter,
        page: u64,
        limit: u64,
    ) -> DomainResult<PaginatedResult<Reservation>> {
        if !actor.is_admin() {
            filter.user_id = Some(actor.id.clone());
        }

        let (page, limit) = validate_pagination(Some(page), Some(limit));
        let (items, total) = self
            .repos
            .reservations()
            .find_page(&filter, page, limit)
            .await?;
        Ok(PaginatedResult::new(items, total, page, limit))
    }

    /// Fetch a single reservation; owner or admin only.
    pub async fn get_reservation(&self, actor: &Actor, id: i32) -> DomainResult<Reservation> {
        let reservation = self
            .repos
            .reservations()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ReservationNotFound(id))?;
        self.authorize_owner_or_admin(actor, &reservation)?;
        Ok(reservation)
    }

    /// Confirm a pending reservation (admin only)
    pub async fn confirm(&self, actor: &Actor, id: i32) -> DomainResult<Reservation> {
        self.require_admin(actor, id)?;
        let r = self
            .repos
            .reservations()
            .transition(id, ReservationStatus::Confirmed)
            .await?;
        info!(reservation_id = id, "Reservation confirmed");
        Ok(r)
    }

    /// Check the guest in; marks the room occupied (admin only)
    pub async fn check_in(&self, actor: &Actor, id: i32) -> DomainResult<Reservation> {
        self.require_admin(actor, id)?;
        let r = self
            .repos
            .reservations()
            .transition(id, ReservationStatus::CheckedIn)
            .await?;
        info!(reservation_id = id, room_id = r.room_id, "Guest checked in");
        Ok(r)
    }

    /// Check the guest out; frees the room (admin only)
    pub async fn check_out(&self, actor: &Actor, id: i32) -> DomainResult<Reservation> {
        self.require_admin(actor, id)?;
        let r = self
            .repos
            .reservations()
            .transition(id, ReservationStatus::CheckedOut)
            .await?;
        info!(reservation_id = id, room_id = r.room_id, "Guest checked out");
        Ok(r)
    }

    /// Cancel a reservation; owner or admin. Frees the room when the stay was
    /// already checked in.
    pub async fn cancel(&self, actor: &Actor, id: i32) -> DomainResult<Reservation> {
        let reservation = self
            .repos
            .reservations()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ReservationNotFound(id))?;
        self.authorize_owner_or_admin(actor, &reservation)?;

        let r = self
            .repos
            .reservations()
            .transition(id, ReservationStatus::Cancelled)
            .await?;
        info!(reservation_id = id, "Reservation cancelled");
        Ok(r)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::domain::room::{RoomDraft, RoomStatus};
    use crate::domain::user::UserRole;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, d, 12, 0, 0).unwrap()
    }

    fn admin() -> Actor {
        Actor::new("staff-1", UserRole::Admin)
    }

    fn guest(id: &str) -> Actor {
        Actor::new(id, UserRole::Guest)
    }

    /// Service over the in-memory store, clock pinned to June 1st 2024.
    async fn service() -> (BookingService, Arc<dyn RepositoryProvider>, i32) {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
        let room = repos
            .rooms()
            .save(RoomDraft {
                number: "101".into(),
                room_type: "double".into(),
                price_cents: 15_000,
                status: RoomStatus::Available,
            })
            .await
            .unwrap();
        let svc = BookingService::new(repos.clone(), Arc::new(FixedClock(day(1))));
        (svc, repos, room.id)
    }

    async fn room_status(repos: &Arc<dyn RepositoryProvider>, room_id: i32) -> RoomStatus {
        repos
            .rooms()
            .find_by_id(room_id)
            .await
            .unwrap()
            .unwrap()
            .status
    }

    #[tokio::test]
    async fn reversed_range_fails_before_any_lookup() {
        let (svc, _repos, _room) = service().await;
        // room 999 does not exist; InvalidRange must win because validation
        // runs before any datastore access
        let err = svc
            .create_reservation(&guest("u1"), 999, day(20), day(15))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidRange { .. }));
    }

    #[tokio::test]
    async fn check_in_date_in_the_past_is_rejected() {
        let (svc, _repos, room) = service().await;
        // clock is pinned to June 1st; May 20th is in the past
        let err = svc
            .create_reservation(
                &guest("u1"),
                room,
                Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap(),
                day(25),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidRange { .. }));
    }

    #[tokio::test]
    async fn unknown_room_fails_with_not_found() {
        let (svc, _repos, _room) = service().await;
        let err = svc
            .create_reservation(&guest("u1"), 999, day(15), day(20))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::RoomNotFound(999));
    }

    #[tokio::test]
    async fn full_lifecycle_with_competing_guest() {
        let (svc, repos, room) = service().await;

        let res = svc
            .create_reservation(&guest("u1"), room, day(15), day(20))
            .await
            .unwrap();
        assert_eq!(res.status, ReservationStatus::Pending);

        // overlapping request from another guest is turned away
        let err = svc
            .create_reservation(&guest("u2"), room, day(17), day(22))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::RoomNotAvailable { .. }));

        let res = svc.confirm(&admin(), res.id).await.unwrap();
        assert_eq!(res.status, ReservationStatus::Confirmed);

        let res = svc.check_in(&admin(), res.id).await.unwrap();
        assert_eq!(res.status, ReservationStatus::CheckedIn);
        assert_eq!(room_status(&repos, room).await, RoomStatus::Occupied);

        // still blocked while the stay is live
        let err = svc
            .create_reservation(&guest("u2"), room, day(15), day(20))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::RoomNotAvailable { .. }));

        let res = svc.check_out(&admin(), res.id).await.unwrap();
        assert_eq!(res.status, ReservationStatus::CheckedOut);
        assert_eq!(room_status(&repos, room).await, RoomStatus::Available);

        // the finished stay no longer blocks the identical range
        let rebook = svc
            .create_reservation(&guest("u2"), room, day(15), day(20))
            .await
            .unwrap();
        assert_eq!(rebook.status, ReservationStatus::Pending);
    }

    #[tokio::test]
    async fn back_to_back_bookings_are_admitted() {
        let (svc, _repos, room) = service().await;
        svc.create_reservation(&guest("u1"), room, day(15), day(20))
            .await
            .unwrap();
        // checks in exactly when the first stay checks out
        svc.create_reservation(&guest("u2"), room, day(20), day(25))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn maintenance_room_admits_nothing() {
        let (svc, repos, _room) = service().await;
        let blocked = repos
            .rooms()
            .save(RoomDraft {
                number: "102".into(),
                room_type: "single".into(),
                price_cents: 9_000,
                status: RoomStatus::Maintenance,
            })
            .await
            .unwrap();

        assert!(!svc
            .is_room_available(blocked.id, day(15), day(20))
            .await
            .unwrap());
        let err = svc
            .create_reservation(&guest("u1"), blocked.id, day(15), day(20))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::RoomNotAvailable { .. }));
    }

    #[tokio::test]
    async fn guest_cannot_cancel_someone_elses_reservation() {
        let (svc, _repos, room) = service().await;
        let res = svc
            .create_reservation(&guest("u1"), room, day(15), day(20))
            .await
            .unwrap();

        let err = svc.cancel(&guest("u2"), res.id).await.unwrap_err();
        assert_eq!(
            err,
            DomainError::UnauthorizedAccess {
                requester_id: "u2".to_string(),
                reservation_id: res.id,
            }
        );

        // the same call by an admin succeeds
        let cancelled = svc.cancel(&admin(), res.id).await.unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    }

    #[tokio::test]
    async fn lifecycle_transitions_are_admin_only() {
        let (svc, _repos, room) = service().await;
        let owner = guest("u1");
        let res = svc
            .create_reservation(&owner, room, day(15), day(20))
            .await
            .unwrap();

        // even the owner cannot confirm or check in
        for err in [
            svc.confirm(&owner, res.id).await.unwrap_err(),
            svc.check_in(&owner, res.id).await.unwrap_err(),
            svc.check_out(&owner, res.id).await.unwrap_err(),
        ] {
            assert!(matches!(err, DomainError::UnauthorizedAccess { .. }));
        }
    }

    #[tokio::test]
    async fn second_cancel_fails_and_leaves_status_terminal() {
        let (svc, _repos, room) = service().await;
        let res = svc
            .create_reservation(&guest("u1"), room, day(15), day(20))
            .await
            .unwrap();

        svc.cancel(&guest("u1"), res.id).await.unwrap();
        let err = svc.cancel(&guest("u1"), res.id).await.unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidStatusTransition {
                from: ReservationStatus::Cancelled,
                to: ReservationStatus::Cancelled,
            }
        );

        let after = svc.get_reservation(&admin(), res.id).await.unwrap();
        assert_eq!(after.status, ReservationStatus::Cancelled);
    }

    #[tokio::test]
    async fn cancel_before_check_in_leaves_room_untouched() {
        let (svc, repos, room) = service().await;
        let res = svc
            .create_reservation(&guest("u1"), room, day(15), day(20))
            .await
            .unwrap();
        svc.cancel(&guest("u1"), res.id).await.unwrap();
        assert_eq!(room_status(&repos, room).await, RoomStatus::Available);
    }

    #[tokio::test]
    async fn cancel_after_check_in_frees_the_room() {
        let (svc, repos, room) = service().await;
        let res = svc
            .create_reservation(&guest("u1"), room, day(15), day(20))
            .await
            .unwrap();
        svc.confirm(&admin(), res.id).await.unwrap();
        svc.check_in(&admin(), res.id).await.unwrap();
        assert_eq!(room_status(&repos, room).await, RoomStatus::Occupied);

        svc.cancel(&admin(), res.id).await.unwrap();
        assert_eq!(room_status(&repos, room).await, RoomStatus::Available);
    }

    #[tokio::test]
    async fn confirming_twice_is_rejected() {
        let (svc, _repos, room) = service().await;
        let res = svc
            .create_reservation(&guest("u1"), room, day(15), day(20))
            .await
            .unwrap();
        svc.confirm(&admin(), res.id).await.unwrap();

        let err = svc.confirm(&admin(), res.id).await.unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidStatusTransition {
                from: ReservationStatus::Confirmed,
                to: ReservationStatus::Confirmed,
            }
        );
    }

    #[tokio::test]
    async fn guests_list_only_their_own_reservations() {
        let (svc, _repos, room) = service().await;
        svc.create_reservation(&guest("u1"), room, day(10), day(12))
            .await
            .unwrap();
        svc.create_reservation(&guest("u2"), room, day(12), day(14))
            .await
            .unwrap();

        let own = svc
            .list_reservations(&guest("u1"), ReservationFilter::default(), 1, 50)
            .await
            .unwrap();
        assert_eq!(own.total, 1);
        assert!(own.items.iter().all(|r| r.user_id == "u1"));

        // a guest asking for someone else's bookings still gets their own
        let filter = ReservationFilter {
            user_id: Some("u2".to_string()),
            ..Default::default()
        };
        let own = svc
            .list_reservations(&guest("u1"), filter, 1, 50)
            .await
            .unwrap();
        assert!(own.items.iter().all(|r| r.user_id == "u1"));

        // admins see everything and may filter by owner
        let all = svc
            .list_reservations(&admin(), ReservationFilter::default(), 1, 50)
            .await
            .unwrap();
        assert_eq!(all.total, 2);

        let filter = ReservationFilter {
            user_id: Some("u2".to_string()),
            ..Default::default()
        };
        let theirs = svc.list_reservations(&admin(), filter, 1, 50).await.unwrap();
        assert_eq!(theirs.total, 1);
        assert_eq!(theirs.items[0].user_id, "u2");
    }

    #[tokio::test]
    async fn get_reservation_is_owner_or_admin() {
        let (svc, _repos, room) = service().await;
        let res = svc
            .create_reservation(&guest("u1"), room, day(15), day(20))
            .await
            .unwrap();

        assert!(svc.get_reservation(&guest("u1"), res.id).await.is_ok());
        assert!(svc.get_reservation(&admin(), res.id).await.is_ok());

        let err = svc.get_reservation(&guest("u2"), res.id).await.unwrap_err();
        assert!(matches!(err, DomainError::UnauthorizedAccess { .. }));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_colliding_creates_admit_exactly_one() {
        let (svc, _repos, room) = service().await;
        let svc = Arc::new(svc);

        let mut handles = Vec::new();
        for i in 0..8 {
            let svc = svc.clone();
            let actor = guest(&format!("u{}", i));
            handles.push(tokio::spawn(async move {
                svc.create_reservation(&actor, room, day(15), day(20)).await
            }));
        }

        let mut admitted = 0;
        let mut rejected = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => admitted += 1,
                Err(DomainError::RoomNotAvailable { .. }) => rejected += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(admitted, 1);
        assert_eq!(rejected, 7);
    }
}
