//! Core business entities, rules and repository interfaces

pub mod clock;
pub mod error;
pub mod repositories;
pub mod reservation;
pub mod room;
pub mod user;

// Re-export commonly used types
pub use clock::{Clock, SystemClock};
pub use error::{DomainError, DomainResult};
pub use repositories::RepositoryProvider;
pub use reservation::{
    is_room_available, ranges_overlap, Reservation, ReservationDraft, ReservationFilter,
    ReservationStatus,
};
pub use room::{Room, RoomDraft, RoomFilter, RoomStatus};
pub use user::{Actor, User, UserRole};
