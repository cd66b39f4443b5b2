//! Reservation domain entity and lifecycle rules

use chrono::{DateTime, Utc};

/// Reservation lifecycle status
///
/// Transitions form a directed graph with two terminal states:
///
/// ```text
/// Pending ──> Confirmed ──> CheckedIn ──> CheckedOut
///    │            │             │
///    └────────────┴─────────────┴──────> Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Created, awaiting admin confirmation
    Pending,
    /// Confirmed by an admin
    Confirmed,
    /// Guest has checked in; the room is occupied
    CheckedIn,
    /// Guest has checked out (terminal)
    CheckedOut,
    /// Cancelled by owner or admin (terminal)
    Cancelled,
}

impl ReservationStatus {
    /// Statuses that count toward room availability
    pub const LIVE: [ReservationStatus; 3] = [Self::Pending, Self::Confirmed, Self::CheckedIn];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::CheckedIn => "CheckedIn",
            Self::CheckedOut => "CheckedOut",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Lenient parse for trusted stored values; unknown input maps to the
    /// terminal Cancelled so it can never count as live.
    pub fn from_str(s: &str) -> Self {
        Self::try_from_str(s).unwrap_or(Self::Cancelled)
    }

    /// Strict parse for user-supplied filter values
    pub fn try_from_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "Confirmed" => Some(Self::Confirmed),
            "CheckedIn" => Some(Self::CheckedIn),
            "CheckedOut" => Some(Self::CheckedOut),
            "Cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// A live reservation blocks overlapping admissions for its room
    pub fn is_live(&self) -> bool {
        Self::LIVE.contains(self)
    }

    /// Terminal statuses have no outgoing transitions
    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// The transition table. Exhaustive over source states, so adding a
    /// status without deciding its outgoing edges fails to compile.
    pub fn allowed_transitions(&self) -> &'static [ReservationStatus] {
        match self {
            Self::Pending => &[Self::Confirmed, Self::Cancelled],
            Self::Confirmed => &[Self::CheckedIn, Self::Cancelled],
            Self::CheckedIn => &[Self::CheckedOut, Self::Cancelled],
            Self::CheckedOut => &[],
            Self::Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, target: ReservationStatus) -> bool {
        self.allowed_transitions().contains(&target)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Half-open interval overlap: does `[a_start, a_end)` intersect `[b_start, b_end)`?
///
/// Ranges that merely touch do not overlap, so a checkout on day N and a new
/// check-in on day N for the same room never conflict.
pub fn ranges_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Room reservation
#[derive(Debug, Clone)]
pub struct Reservation {
    /// Unique reservation ID
    pub id: i32,
    /// Owning guest (user ID)
    pub user_id: String,
    /// Reserved room ID
    pub room_id: i32,
    /// Check-in instant (inclusive)
    pub check_in: DateTime<Utc>,
    /// Check-out instant (exclusive), strictly after check-in
    pub check_out: DateTime<Utc>,
    /// Current lifecycle status
    pub status: ReservationStatus,
    /// When the reservation was created
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Whether this reservation blocks a candidate range for its room:
    /// it must be live and its range must overlap the candidate's.
    pub fn blocks(&self, check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> bool {
        self.status.is_live() && ranges_overlap(self.check_in, self.check_out, check_in, check_out)
    }
}

/// A reservation request that passed input validation but has not been
/// admitted yet. Admission assigns the ID and the Pending status.
#[derive(Debug, Clone)]
pub struct ReservationDraft {
    pub user_id: String,
    pub room_id: i32,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, d, 0, 0, 0).unwrap()
    }

    fn sample(status: ReservationStatus) -> Reservation {
        Reservation {
            id: 1,
            user_id: "user-1".into(),
            room_id: 7,
            check_in: day(15),
            check_out: day(20),
            status,
            created_at: day(1),
        }
    }

    const ALL: [ReservationStatus; 5] = [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::CheckedIn,
        ReservationStatus::CheckedOut,
        ReservationStatus::Cancelled,
    ];

    #[test]
    fn transition_table_matches_lifecycle() {
        use ReservationStatus::*;
        let legal = [
            (Pending, Confirmed),
            (Pending, Cancelled),
            (Confirmed, CheckedIn),
            (Confirmed, Cancelled),
            (CheckedIn, CheckedOut),
            (CheckedIn, Cancelled),
        ];

        for from in ALL {
            for to in ALL {
                let expected = legal.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "transition {} -> {}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn terminal_states_have_no_exits() {
        assert!(ReservationStatus::CheckedOut.is_terminal());
        assert!(ReservationStatus::Cancelled.is_terminal());
        assert!(!ReservationStatus::Pending.is_terminal());
        assert!(!ReservationStatus::Confirmed.is_terminal());
        assert!(!ReservationStatus::CheckedIn.is_terminal());
    }

    #[test]
    fn live_statuses() {
        assert!(ReservationStatus::Pending.is_live());
        assert!(ReservationStatus::Confirmed.is_live());
        assert!(ReservationStatus::CheckedIn.is_live());
        assert!(!ReservationStatus::CheckedOut.is_live());
        assert!(!ReservationStatus::Cancelled.is_live());
    }

    #[test]
    fn status_display_roundtrip() {
        for status in ALL {
            assert_eq!(ReservationStatus::from_str(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_status_defaults_to_cancelled() {
        assert_eq!(
            ReservationStatus::from_str("Unknown"),
            ReservationStatus::Cancelled
        );
    }

    #[test]
    fn overlap_partial_and_contained() {
        // partial overlap on either edge
        assert!(ranges_overlap(day(15), day(20), day(17), day(22)));
        assert!(ranges_overlap(day(17), day(22), day(15), day(20)));
        // candidate fully inside existing
        assert!(ranges_overlap(day(16), day(18), day(15), day(20)));
        // existing fully inside candidate
        assert!(ranges_overlap(day(15), day(20), day(16), day(18)));
        // disjoint
        assert!(!ranges_overlap(day(15), day(17), day(20), day(22)));
    }

    #[test]
    fn overlap_is_symmetric() {
        let ranges = [
            (day(15), day(20)),
            (day(17), day(22)),
            (day(20), day(25)),
            (day(1), day(2)),
            (day(16), day(18)),
        ];
        for (a_start, a_end) in ranges {
            for (b_start, b_end) in ranges {
                assert_eq!(
                    ranges_overlap(a_start, a_end, b_start, b_end),
                    ranges_overlap(b_start, b_end, a_start, a_end),
                );
            }
        }
    }

    #[test]
    fn touching_ranges_do_not_overlap() {
        // back-to-back stays: one checks out exactly when the other checks in
        assert!(!ranges_overlap(day(10), day(15), day(15), day(20)));
        assert!(!ranges_overlap(day(15), day(20), day(10), day(15)));
    }

    #[test]
    fn live_reservation_blocks_overlapping_range() {
        let r = sample(ReservationStatus::Confirmed);
        assert!(r.blocks(day(17), day(22)));
        assert!(!r.blocks(day(20), day(25)));
    }

    #[test]
    fn finished_reservation_never_blocks() {
        // identical range, but the stay is over or cancelled
        for status in [ReservationStatus::CheckedOut, ReservationStatus::Cancelled] {
            let r = sample(status);
            assert!(!r.blocks(day(15), day(20)));
        }
    }
}
