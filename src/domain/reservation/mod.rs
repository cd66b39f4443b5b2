//! Reservation domain: entity, lifecycle state machine, availability rules

pub mod availability;
pub mod model;
pub mod repository;

pub use availability::is_room_available;
pub use model::{ranges_overlap, Reservation, ReservationDraft, ReservationStatus};
pub use repository::{ReservationFilter, ReservationRepository};
