//! Room availability decision
//!
//! Pure admission check over already-loaded state. Callers are responsible
//! for loading the room and its live reservations inside the same database
//! transaction as the subsequent insert, otherwise the decision is stale by
//! the time it is acted upon.

use chrono::{DateTime, Utc};

use super::model::Reservation;
use crate::domain::room::Room;

/// True iff the room is in an allocatable base state and no live reservation
/// overlaps `[check_in, check_out)`.
///
/// Cancelled and checked-out reservations never block, even over the identical
/// range: re-booking a room the same day it frees up is expected behavior.
pub fn is_room_available(
    room: &Room,
    reservations: &[Reservation],
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
) -> bool {
    if !room.status.is_allocatable() {
        return false;
    }
    !reservations.iter().any(|r| r.blocks(check_in, check_out))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reservation::ReservationStatus;
    use crate::domain::room::RoomStatus;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, d, 0, 0, 0).unwrap()
    }

    fn room(status: RoomStatus) -> Room {
        Room {
            id: 7,
            number: "101".into(),
            room_type: "double".into(),
            price_cents: 12_000,
            status,
            created_at: day(1),
        }
    }

    fn reservation(status: ReservationStatus, from: u32, to: u32) -> Reservation {
        Reservation {
            id: 1,
            user_id: "user-1".into(),
            room_id: 7,
            check_in: day(from),
            check_out: day(to),
            status,
            created_at: day(1),
        }
    }

    #[test]
    fn free_room_is_available() {
        assert!(is_room_available(
            &room(RoomStatus::Available),
            &[],
            day(15),
            day(20)
        ));
    }

    #[test]
    fn non_allocatable_room_is_unavailable_without_reservations() {
        for status in [RoomStatus::Occupied, RoomStatus::Maintenance] {
            assert!(!is_room_available(&room(status), &[], day(15), day(20)));
        }
    }

    #[test]
    fn live_overlap_blocks_admission() {
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            ReservationStatus::CheckedIn,
        ] {
            let existing = [reservation(status, 15, 20)];
            assert!(!is_room_available(
                &room(RoomStatus::Available),
                &existing,
                day(17),
                day(22)
            ));
        }
    }

    #[test]
    fn finished_reservation_with_identical_range_does_not_block() {
        for status in [ReservationStatus::Cancelled, ReservationStatus::CheckedOut] {
            let existing = [reservation(status, 15, 20)];
            assert!(is_room_available(
                &room(RoomStatus::Available),
                &existing,
                day(15),
                day(20)
            ));
        }
    }

    #[test]
    fn back_to_back_stay_is_admitted() {
        let existing = [reservation(ReservationStatus::Confirmed, 10, 15)];
        assert!(is_room_available(
            &room(RoomStatus::Available),
            &existing,
            day(15),
            day(20)
        ));
    }
}
