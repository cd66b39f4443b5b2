//! Business logic services

pub mod booking;
pub mod dashboard;
pub mod room;

pub use booking::BookingService;
pub use dashboard::{DashboardService, DashboardSummary};
pub use room::RoomService;
