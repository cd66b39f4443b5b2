//! Room domain entity

use chrono::{DateTime, Utc};

/// Room base allocation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    /// Free for new bookings
    Available,
    /// Held by an active stay (set on check-in, cleared on check-out)
    Occupied,
    /// Taken out of service by an admin
    Maintenance,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Occupied => "Occupied",
            Self::Maintenance => "Maintenance",
        }
    }

    /// Lenient parse for trusted stored values; unknown input maps to
    /// Maintenance so an unreadable room never admits bookings.
    pub fn from_str(s: &str) -> Self {
        Self::try_from_str(s).unwrap_or(Self::Maintenance)
    }

    /// Strict parse for user-supplied filter values
    pub fn try_from_str(s: &str) -> Option<Self> {
        match s {
            "Available" => Some(Self::Available),
            "Occupied" => Some(Self::Occupied),
            "Maintenance" => Some(Self::Maintenance),
            _ => None,
        }
    }

    /// Only allocatable rooms accept new reservations
    pub fn is_allocatable(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl Default for RoomStatus {
    fn default() -> Self {
        Self::Available
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Hotel room
#[derive(Debug, Clone)]
pub struct Room {
    /// Unique room ID
    pub id: i32,
    /// Room number shown to guests (unique)
    pub number: String,
    /// Room category, e.g. "single", "double", "suite"
    pub room_type: String,
    /// Nightly rate in minor currency units (display metadata only)
    pub price_cents: i64,
    /// Current allocation status
    pub status: RoomStatus,
    /// When the room record was created
    pub created_at: DateTime<Utc>,
}

/// A room record before insertion; the store assigns the ID.
#[derive(Debug, Clone)]
pub struct RoomDraft {
    pub number: String,
    pub room_type: String,
    pub price_cents: i64,
    pub status: RoomStatus,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_available_rooms_are_allocatable() {
        assert!(RoomStatus::Available.is_allocatable());
        assert!(!RoomStatus::Occupied.is_allocatable());
        assert!(!RoomStatus::Maintenance.is_allocatable());
    }

    #[test]
    fn status_display_roundtrip() {
        for status in [
            RoomStatus::Available,
            RoomStatus::Occupied,
            RoomStatus::Maintenance,
        ] {
            assert_eq!(RoomStatus::from_str(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_status_defaults_to_maintenance() {
        // an unreadable status must never admit bookings
        assert_eq!(RoomStatus::from_str("???"), RoomStatus::Maintenance);
    }
}
