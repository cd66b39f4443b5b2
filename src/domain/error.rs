//! Domain errors

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::reservation::ReservationStatus;

/// Domain-level error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Malformed or semantically invalid date range
    #[error("Invalid date range: {reason}")]
    InvalidRange { reason: String },

    /// Room not found
    #[error("Room not found: {0}")]
    RoomNotFound(i32),

    /// Reservation not found
    #[error("Reservation not found: {0}")]
    ReservationNotFound(i32),

    /// Admission denied: overlapping live reservation or room not allocatable
    #[error("Room {room_id} is not available from {check_in} to {check_out}")]
    RoomNotAvailable {
        room_id: i32,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    },

    /// Attempted lifecycle transition not in the transition table
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidStatusTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },

    /// Requester lacks the capability for this operation on this reservation
    #[error("User {requester_id} is not allowed to access reservation {reservation_id}")]
    UnauthorizedAccess {
        requester_id: String,
        reservation_id: i32,
    },

    /// Conflict with existing data (duplicate key, entity still referenced)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Underlying datastore failure. The only wrapping kind; the whole
    /// operation is safe to retry since no partial state is left committed.
    #[error("Database error: {0}")]
    Persistence(String),
}

impl DomainError {
    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Persistence(_))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
