//! Occupancy dashboard aggregation

use std::sync::Arc;

use chrono::Duration;

use crate::domain::clock::Clock;
use crate::domain::reservation::ReservationStatus;
use crate::domain::room::RoomStatus;
use crate::domain::{DomainResult, RepositoryProvider};

/// Aggregate counts for the admin dashboard
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub rooms_available: u64,
    pub rooms_occupied: u64,
    pub rooms_maintenance: u64,
    pub reservations_pending: u64,
    pub reservations_confirmed: u64,
    pub current_stays: u64,
    pub arrivals_next_week: u64,
}

pub struct DashboardService {
    repos: Arc<dyn RepositoryProvider>,
    clock: Arc<dyn Clock>,
}

impl DashboardService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, clock: Arc<dyn Clock>) -> Self {
        Self { repos, clock }
    }

    pub async fn summary(&self) -> DomainResult<DashboardSummary> {
        let rooms = self.repos.rooms();
        let reservations = self.repos.reservations();

        let now = self.clock.now();
        Ok(DashboardSummary {
            rooms_available: rooms.count_by_status(RoomStatus::Available).await?,
            rooms_occupied: rooms.count_by_status(RoomStatus::Occupied).await?,
            rooms_maintenance: rooms.count_by_status(RoomStatus::Maintenance).await?,
            reservations_pending: reservations
                .count_by_status(ReservationStatus::Pending)
                .await?,
            reservations_confirmed: reservations
                .count_by_status(ReservationStatus::Confirmed)
                .await?,
            current_stays: reservations
                .count_by_status(ReservationStatus::CheckedIn)
                .await?,
            arrivals_next_week: reservations
                .count_arrivals_between(now, now + Duration::days(7))
                .await?,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::domain::reservation::ReservationDraft;
    use crate::domain::room::RoomDraft;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use chrono::{DateTime, TimeZone, Utc};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, d, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn summary_counts_rooms_and_arrivals() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());

        let room = repos
            .rooms()
            .save(RoomDraft {
                number: "101".into(),
                room_type: "double".into(),
                price_cents: 10_000,
                status: RoomStatus::Available,
            })
            .await
            .unwrap();
        repos
            .rooms()
            .save(RoomDraft {
                number: "102".into(),
                room_type: "single".into(),
                price_cents: 8_000,
                status: RoomStatus::Maintenance,
            })
            .await
            .unwrap();

        // one arrival inside the 7-day window, one beyond it
        for (from, to) in [(day(3), day(5)), (day(20), day(25))] {
            repos
                .reservations()
                .admit(ReservationDraft {
                    user_id: "u1".into(),
                    room_id: room.id,
                    check_in: from,
                    check_out: to,
                    created_at: day(1),
                })
                .await
                .unwrap();
        }

        let svc = DashboardService::new(repos, Arc::new(FixedClock(day(1))));
        let summary = svc.summary().await.unwrap();

        assert_eq!(summary.rooms_available, 1);
        assert_eq!(summary.rooms_maintenance, 1);
        assert_eq!(summary.rooms_occupied, 0);
        assert_eq!(summary.reservations_pending, 2);
        assert_eq!(summary.current_stays, 0);
        assert_eq!(summary.arrivals_next_week, 1);
    }
}
